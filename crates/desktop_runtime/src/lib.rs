//! Window-management core for the community desktop: geometry, per-window lifecycle, stacking,
//! and the terminal command bridge.

pub mod apps;
pub mod config;
pub mod content;
pub mod geometry;
pub mod model;
pub mod reducer;
pub mod runtime;
pub mod window;
pub mod window_manager;

pub use config::{load_desktop_config, ConfigError, ConfigLoader, DesktopConfig};
pub use content::{ContentError, DesktopContent};
pub use geometry::GeometryConfig;
pub use model::*;
pub use reducer::{
    reduce_desktop, DesktopAction, DesktopEnvironment, ReducerError, RuntimeEffect,
};
pub use runtime::{is_overlay_hotkey, DesktopRuntime};
pub use window::WindowError;
