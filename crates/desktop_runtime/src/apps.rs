use system_shell_contract::AppListing;

use crate::{
    geometry::GeometryConfig,
    model::{AppId, Viewport, WindowRect},
};

/// Where a window kind first appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultPosition {
    Fixed { x: i32, y: i32 },
    /// Offset up/left from the viewport center.
    Centered { offset_x: i32, offset_y: i32 },
}

/// Static metadata for one window kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    pub app_id: AppId,
    pub title: &'static str,
    /// Label shown by the terminal `apps` listing. `None` keeps the app out of the listing and
    /// out of `open <id>`.
    pub launcher_summary: Option<&'static str>,
    pub default_position: DefaultPosition,
}

const APP_REGISTRY: [AppDescriptor; 6] = [
    AppDescriptor {
        app_id: AppId::Motd,
        title: "Message of the Day",
        launcher_summary: None,
        default_position: DefaultPosition::Centered {
            offset_x: 250,
            offset_y: 200,
        },
    },
    AppDescriptor {
        app_id: AppId::Bounties,
        title: "💰 Bounties",
        launcher_summary: Some("💰 Browse open coding challenges"),
        default_position: DefaultPosition::Fixed { x: 120, y: 120 },
    },
    AppDescriptor {
        app_id: AppId::Gallery,
        title: "🚀 Gallery",
        launcher_summary: Some("🚀 See student projects"),
        default_position: DefaultPosition::Fixed { x: 360, y: 160 },
    },
    AppDescriptor {
        app_id: AppId::Leaderboard,
        title: "🏆 Leaderboard",
        launcher_summary: Some("🏆 Top contributors"),
        default_position: DefaultPosition::Fixed { x: 220, y: 220 },
    },
    AppDescriptor {
        app_id: AppId::Events,
        title: "📅 Events",
        launcher_summary: Some("📅 Upcoming meetups"),
        default_position: DefaultPosition::Fixed { x: 500, y: 120 },
    },
    AppDescriptor {
        app_id: AppId::About,
        title: "ℹ️ About",
        launcher_summary: Some("ℹ️  Learn about HackBU"),
        default_position: DefaultPosition::Fixed { x: 80, y: 80 },
    },
];

pub fn app_registry() -> &'static [AppDescriptor] {
    &APP_REGISTRY
}

pub fn app_descriptor(app_id: AppId) -> &'static AppDescriptor {
    // One entry per `AppId` variant, in declaration order.
    &APP_REGISTRY[app_id as usize]
}

/// Catalog handed to the terminal dispatcher.
pub fn launcher_listings() -> Vec<AppListing> {
    app_registry()
        .iter()
        .filter_map(|entry| {
            entry.launcher_summary.map(|summary| AppListing {
                id: entry.app_id.canonical_id().to_string(),
                summary: summary.to_string(),
            })
        })
        .collect()
}

/// Initial geometry for a freshly opened window.
pub fn default_rect(app_id: AppId, viewport: Viewport, config: &GeometryConfig) -> WindowRect {
    let (x, y) = match app_descriptor(app_id).default_position {
        DefaultPosition::Fixed { x, y } => (x, y),
        DefaultPosition::Centered { offset_x, offset_y } => {
            (viewport.width / 2 - offset_x, viewport.height / 2 - offset_y)
        }
    };
    WindowRect {
        x,
        y,
        w: config.default_width,
        h: config.default_height,
    }
    .clamped_min(config.min_width, config.min_height)
}
