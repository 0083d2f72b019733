use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Collapsed height reported for a minimized window (title bar only).
pub const MINIMIZED_TITLEBAR_HEIGHT: i32 = 52;

/// Identity of a window kind. At most one window per kind is open at a time, so this is also the
/// open-window key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppId {
    Motd,
    Bounties,
    Gallery,
    Leaderboard,
    Events,
    About,
}

impl AppId {
    pub const ALL: [AppId; 6] = [
        Self::Motd,
        Self::Bounties,
        Self::Gallery,
        Self::Leaderboard,
        Self::Events,
        Self::About,
    ];

    pub fn canonical_id(self) -> &'static str {
        match self {
            Self::Motd => "motd",
            Self::Bounties => "bounties",
            Self::Gallery => "gallery",
            Self::Leaderboard => "leaderboard",
            Self::Events => "events",
            Self::About => "about",
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown app id `{0}`")]
pub struct UnknownAppId(pub String);

impl FromStr for AppId {
    type Err = UnknownAppId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|app_id| app_id.canonical_id() == raw)
            .ok_or_else(|| UnknownAppId(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, delta: PointerDelta) -> Self {
        Self {
            x: self.x.saturating_add(delta.dx),
            y: self.y.saturating_add(delta.dy),
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Live chrome measurements from the render layer. `None` means the element was not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChromeMetrics {
    /// Rendered height of the fixed top bar.
    pub header_height: Option<i32>,
    /// Top edge of the dock in viewport coordinates.
    pub dock_top: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

impl fmt::Display for WindowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Minimized => "minimized",
            Self::Maximized => "maximized",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub app_id: AppId,
    pub title: String,
    pub rect: WindowRect,
    /// Pre-maximize geometry. Only populated while `mode == Maximized`.
    pub restore_rect: Option<WindowRect>,
    pub mode: WindowMode,
    pub z_index: u32,
}

/// Process-wide window manager state for one page session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    /// Open windows in insertion order (oldest first).
    pub windows: Vec<WindowRecord>,
    /// Next z-index handed out by open/focus. Strictly greater than every assigned z-index.
    pub next_z_index: u32,
    pub terminal_open: bool,
}

impl Default for DesktopState {
    fn default() -> Self {
        Self {
            windows: Vec::new(),
            next_z_index: 1,
            terminal_open: false,
        }
    }
}

impl DesktopState {
    /// Returns the open window with the highest z-index.
    pub fn focused_window_id(&self) -> Option<AppId> {
        self.windows
            .iter()
            .max_by_key(|w| w.z_index)
            .map(|w| w.app_id)
    }

    pub fn window(&self, app_id: AppId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.app_id == app_id)
    }

    pub fn window_mut(&mut self, app_id: AppId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.app_id == app_id)
    }

    pub fn is_open(&self, app_id: AppId) -> bool {
        self.window(app_id).is_some()
    }

    /// Open window ids in insertion order.
    pub fn open_ids(&self) -> Vec<AppId> {
        self.windows.iter().map(|w| w.app_id).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub fn delta_from(self, start: PointerPosition) -> PointerDelta {
        PointerDelta {
            dx: self.x.saturating_sub(start.x),
            dy: self.y.saturating_sub(start.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerDelta {
    pub dx: i32,
    pub dy: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    pub fn moves_west_edge(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    pub fn moves_east_edge(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn moves_north_edge(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn moves_south_edge(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub app_id: AppId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub app_id: AppId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

/// Modal pointer gesture state. At most one of the two sessions is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
}

impl InteractionState {
    pub fn gesture_active(&self) -> bool {
        self.dragging.is_some() || self.resizing.is_some()
    }

    pub fn clear(&mut self) {
        self.dragging = None;
        self.resizing = None;
    }
}

/// Render-facing projection of one open window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowView {
    pub app_id: AppId,
    pub title: String,
    pub rect: WindowRect,
    pub z_index: u32,
    pub is_focused: bool,
    pub mode: WindowMode,
    pub content_visible: bool,
    pub resize_handles: bool,
}

/// Render-facing projection of the whole desktop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesktopView {
    pub windows: Vec<WindowView>,
    pub focused: Option<AppId>,
    pub terminal_open: bool,
    pub terminal_transcript: Vec<String>,
}
