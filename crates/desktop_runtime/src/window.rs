//! Per-window lifecycle transitions between normal, minimized, and maximized modes.
//!
//! The record's geometry is only swapped on the maximize/restore edges. Minimizing keeps the
//! geometry as-is so that un-minimizing returns to the same layout.

use thiserror::Error;

use crate::model::{WindowMode, WindowRecord, WindowRect};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    #[error("cannot transition window from {from} to {to}")]
    InvalidTransition { from: WindowMode, to: WindowMode },
}

impl WindowRecord {
    /// Whether title-bar drag and edge resize apply to this window.
    pub fn accepts_gestures(&self) -> bool {
        self.mode == WindowMode::Normal
    }

    /// Enters `Minimized`. A maximized window is restored first, so a later un-minimize brings
    /// back the pre-maximize layout.
    pub fn minimize(&mut self) {
        if self.mode == WindowMode::Maximized {
            self.leave_maximized();
        }
        self.mode = WindowMode::Minimized;
    }

    /// Enters `Maximized` with `bounds`, saving the current geometry.
    ///
    /// Maximizing an already maximized window is a no-op so the saved geometry is never
    /// overwritten with maximized bounds.
    pub fn maximize(&mut self, bounds: WindowRect) -> Result<(), WindowError> {
        match self.mode {
            WindowMode::Maximized => Ok(()),
            WindowMode::Minimized => Err(WindowError::InvalidTransition {
                from: WindowMode::Minimized,
                to: WindowMode::Maximized,
            }),
            WindowMode::Normal => {
                self.restore_rect = Some(self.rect);
                self.rect = bounds;
                self.mode = WindowMode::Maximized;
                Ok(())
            }
        }
    }

    /// Returns to `Normal` from either non-normal mode.
    pub fn restore(&mut self) {
        match self.mode {
            WindowMode::Maximized => self.leave_maximized(),
            WindowMode::Minimized => self.mode = WindowMode::Normal,
            WindowMode::Normal => {}
        }
    }

    /// Minimize-button behavior.
    pub fn toggle_minimize(&mut self) {
        if self.mode == WindowMode::Minimized {
            self.restore();
        } else {
            self.minimize();
        }
    }

    /// Maximize-button behavior.
    pub fn toggle_maximize(&mut self, bounds: WindowRect) -> Result<(), WindowError> {
        if self.mode == WindowMode::Maximized {
            self.restore();
            Ok(())
        } else {
            self.maximize(bounds)
        }
    }

    /// Replaces the maximized geometry, e.g. after a viewport resize. Other modes are untouched.
    pub fn refit_maximized(&mut self, bounds: WindowRect) {
        if self.mode == WindowMode::Maximized {
            self.rect = bounds;
        }
    }

    fn leave_maximized(&mut self) {
        if let Some(restore_rect) = self.restore_rect.take() {
            self.rect = restore_rect;
        }
        self.mode = WindowMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::AppId;

    const NORMAL_RECT: WindowRect = WindowRect {
        x: 80,
        y: 80,
        w: 600,
        h: 400,
    };
    const MAX_RECT: WindowRect = WindowRect {
        x: 20,
        y: 56,
        w: 1880,
        h: 936,
    };

    fn window() -> WindowRecord {
        WindowRecord {
            app_id: AppId::Bounties,
            title: "Bounties".to_string(),
            rect: NORMAL_RECT,
            restore_rect: None,
            mode: WindowMode::Normal,
            z_index: 11,
        }
    }

    #[test]
    fn maximize_then_restore_returns_exact_geometry() {
        let mut win = window();
        win.maximize(MAX_RECT).unwrap();
        assert_eq!(win.mode, WindowMode::Maximized);
        assert_eq!(win.rect, MAX_RECT);
        assert_eq!(win.restore_rect, Some(NORMAL_RECT));

        win.restore();
        assert_eq!(win.mode, WindowMode::Normal);
        assert_eq!(win.rect, NORMAL_RECT);
        assert_eq!(win.restore_rect, None);
    }

    #[test]
    fn second_maximize_keeps_original_saved_geometry() {
        let mut win = window();
        win.maximize(MAX_RECT).unwrap();
        win.maximize(WindowRect { w: 10, ..MAX_RECT }).unwrap();
        win.restore();
        assert_eq!(win.rect, NORMAL_RECT);
    }

    #[test]
    fn minimizing_maximized_window_restores_first() {
        let mut win = window();
        win.maximize(MAX_RECT).unwrap();
        win.minimize();
        assert_eq!(win.mode, WindowMode::Minimized);
        assert_eq!(win.rect, NORMAL_RECT);
        assert_eq!(win.restore_rect, None);

        win.toggle_minimize();
        assert_eq!(win.mode, WindowMode::Normal);
        assert_eq!(win.rect, NORMAL_RECT);
    }

    #[test]
    fn maximize_while_minimized_is_rejected_without_side_effects() {
        let mut win = window();
        win.minimize();
        let before = win.clone();
        assert_eq!(
            win.toggle_maximize(MAX_RECT),
            Err(WindowError::InvalidTransition {
                from: WindowMode::Minimized,
                to: WindowMode::Maximized,
            })
        );
        assert_eq!(win, before);
    }

    #[test]
    fn gestures_only_accepted_in_normal_mode() {
        let mut win = window();
        assert!(win.accepts_gestures());
        win.toggle_maximize(MAX_RECT).unwrap();
        assert!(!win.accepts_gestures());
        win.toggle_maximize(MAX_RECT).unwrap();
        win.minimize();
        assert!(!win.accepts_gestures());
    }

    #[test]
    fn refit_only_touches_maximized_windows() {
        let mut win = window();
        win.refit_maximized(MAX_RECT);
        assert_eq!(win.rect, NORMAL_RECT);

        win.maximize(MAX_RECT).unwrap();
        let smaller = WindowRect { w: 900, ..MAX_RECT };
        win.refit_maximized(smaller);
        assert_eq!(win.rect, smaller);
        win.restore();
        assert_eq!(win.rect, NORMAL_RECT);
    }
}
