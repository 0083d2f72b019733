//! Pure geometry transforms for dragging, resizing, and maximizing windows.
//!
//! Every function here is total: out-of-range input is clamped, never rejected.

use serde::{Deserialize, Serialize};

use crate::model::{ChromeMetrics, PointerDelta, ResizeEdge, Viewport, WindowMode, WindowRect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gutters {
    pub left: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Default for Gutters {
    fn default() -> Self {
        Self {
            left: 20,
            right: 20,
            bottom: 8,
        }
    }
}

/// Geometry limits and chrome fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub min_width: i32,
    pub min_height: i32,
    pub default_width: i32,
    pub default_height: i32,
    /// Horizontal strip of a dragged window that must stay on screen.
    pub visible_margin_x: i32,
    /// Vertical strip of a dragged window (the title bar) that must stay on screen.
    pub visible_margin_y: i32,
    /// Used when the render layer cannot measure the top bar.
    pub header_height_fallback: i32,
    /// Dock top is estimated as `viewport.height - dock_offset_fallback` when unmeasured.
    pub dock_offset_fallback: i32,
    pub gutters: Gutters,
    pub min_maximized_height: i32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_width: 300,
            min_height: 200,
            default_width: 600,
            default_height: 400,
            visible_margin_x: 200,
            visible_margin_y: 60,
            header_height_fallback: 56,
            dock_offset_fallback: 80,
            gutters: Gutters::default(),
            min_maximized_height: 120,
        }
    }
}

impl GeometryConfig {
    pub fn header_height(&self, chrome: ChromeMetrics) -> i32 {
        chrome.header_height.unwrap_or(self.header_height_fallback)
    }

    pub fn dock_top(&self, viewport: Viewport, chrome: ChromeMetrics) -> i32 {
        chrome
            .dock_top
            .unwrap_or(viewport.height.saturating_sub(self.dock_offset_fallback))
    }

    pub fn drag_bounds(&self, viewport: Viewport, chrome: ChromeMetrics) -> DragBounds {
        let min_y = self.header_height(chrome);
        DragBounds {
            min_x: 0,
            max_x: viewport.width.saturating_sub(self.visible_margin_x).max(0),
            min_y,
            max_y: viewport
                .height
                .saturating_sub(self.visible_margin_y)
                .max(min_y),
        }
    }
}

/// Allowed range for a dragged window's top-left corner. `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

/// Applies a drag delta to the gesture-start geometry and clamps the top-left corner into
/// `bounds`. Size is untouched.
pub fn drag_to(start: WindowRect, delta: PointerDelta, bounds: DragBounds) -> WindowRect {
    let moved = start.offset(delta);
    WindowRect {
        x: moved.x.clamp(bounds.min_x, bounds.max_x),
        y: moved.y.clamp(bounds.min_y, bounds.max_y),
        ..moved
    }
}

/// Applies a resize delta for a given edge/corner drag.
///
/// East/south edges grow by the delta and clamp at the minimum. West/north edges move the origin
/// and shrink the size together, and only when the new size stays at or above the minimum;
/// otherwise that axis keeps its start geometry.
pub fn resize_rect(
    start: WindowRect,
    delta: PointerDelta,
    edge: ResizeEdge,
    config: &GeometryConfig,
) -> WindowRect {
    let mut rect = start;

    if edge.moves_east_edge() {
        rect.w = start.w.saturating_add(delta.dx).max(config.min_width);
    } else if edge.moves_west_edge() {
        let w = start.w.saturating_sub(delta.dx);
        if w >= config.min_width {
            rect.x = start.x.saturating_add(delta.dx);
            rect.w = w;
        }
    }

    if edge.moves_south_edge() {
        rect.h = start.h.saturating_add(delta.dy).max(config.min_height);
    } else if edge.moves_north_edge() {
        let h = start.h.saturating_sub(delta.dy);
        if h >= config.min_height {
            rect.y = start.y.saturating_add(delta.dy);
            rect.h = h;
        }
    }

    rect
}

/// Fills the desktop area below the top bar and above the dock, with side gutters.
pub fn maximize_bounds(
    viewport: Viewport,
    chrome: ChromeMetrics,
    config: &GeometryConfig,
) -> WindowRect {
    let header_height = config.header_height(chrome);
    let dock_top = config.dock_top(viewport, chrome);
    let gutters = config.gutters;
    WindowRect {
        x: gutters.left,
        y: header_height,
        w: viewport
            .width
            .saturating_sub(gutters.left.saturating_add(gutters.right))
            .max(0),
        h: dock_top
            .saturating_sub(header_height)
            .saturating_sub(gutters.bottom)
            .max(config.min_maximized_height),
    }
}

/// Refits a maximized window to a new viewport. Other modes keep their geometry.
pub fn recompute_on_viewport_resize(
    rect: WindowRect,
    mode: WindowMode,
    viewport: Viewport,
    chrome: ChromeMetrics,
    config: &GeometryConfig,
) -> WindowRect {
    match mode {
        WindowMode::Maximized => maximize_bounds(viewport, chrome, config),
        WindowMode::Normal | WindowMode::Minimized => rect,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const START: WindowRect = WindowRect {
        x: 80,
        y: 80,
        w: 600,
        h: 400,
    };

    fn delta(dx: i32, dy: i32) -> PointerDelta {
        PointerDelta { dx, dy }
    }

    fn bounds() -> DragBounds {
        GeometryConfig::default().drag_bounds(
            Viewport {
                width: 1280,
                height: 800,
            },
            ChromeMetrics::default(),
        )
    }

    #[test]
    fn drag_applies_delta_inside_bounds() {
        assert_eq!(
            drag_to(START, delta(25, 40), bounds()),
            WindowRect {
                x: 105,
                y: 120,
                ..START
            }
        );
    }

    #[test]
    fn drag_clamps_to_top_bar_and_visible_margins() {
        let bounds = bounds();
        assert_eq!(bounds.min_y, 56);
        assert_eq!(bounds.max_x, 1080);
        assert_eq!(bounds.max_y, 740);

        let far_up_left = drag_to(START, delta(-5_000, -5_000), bounds);
        assert_eq!((far_up_left.x, far_up_left.y), (0, 56));

        let far_down_right = drag_to(START, delta(5_000, 5_000), bounds);
        assert_eq!((far_down_right.x, far_down_right.y), (1080, 740));
    }

    #[test]
    fn drag_bounds_stay_ordered_on_tiny_viewports() {
        let bounds = GeometryConfig::default().drag_bounds(
            Viewport {
                width: 100,
                height: 50,
            },
            ChromeMetrics {
                header_height: Some(40),
                dock_top: None,
            },
        );
        assert!(bounds.min_x <= bounds.max_x);
        assert!(bounds.min_y <= bounds.max_y);
        let moved = drag_to(START, delta(10, 10), bounds);
        assert_eq!((moved.x, moved.y), (0, 40));
    }

    #[test]
    fn east_and_south_grow_and_clamp_at_minimum() {
        let config = GeometryConfig::default();
        assert_eq!(
            resize_rect(START, delta(50, 30), ResizeEdge::SouthEast, &config),
            WindowRect {
                w: 650,
                h: 430,
                ..START
            }
        );
        assert_eq!(
            resize_rect(START, delta(-900, -900), ResizeEdge::SouthEast, &config),
            WindowRect {
                w: 300,
                h: 200,
                ..START
            }
        );
    }

    #[test]
    fn west_and_north_move_origin_while_shrinking() {
        let config = GeometryConfig::default();
        assert_eq!(
            resize_rect(START, delta(100, 50), ResizeEdge::NorthWest, &config),
            WindowRect {
                x: 180,
                y: 130,
                w: 500,
                h: 350,
            }
        );
        assert_eq!(
            resize_rect(START, delta(-20, 0), ResizeEdge::West, &config),
            WindowRect {
                x: 60,
                w: 620,
                ..START
            }
        );
    }

    #[test]
    fn west_past_minimum_is_a_no_op_for_that_axis_only() {
        let config = GeometryConfig::default();
        let resized = resize_rect(START, delta(301, -10), ResizeEdge::SouthWest, &config);
        assert_eq!(resized.x, START.x);
        assert_eq!(resized.w, START.w);
        assert_eq!(resized.h, 390);

        let exact = resize_rect(START, delta(300, 0), ResizeEdge::West, &config);
        assert_eq!((exact.x, exact.w), (380, 300));
    }

    #[test]
    fn north_past_minimum_keeps_start_geometry() {
        let config = GeometryConfig::default();
        let resized = resize_rect(START, delta(0, 250), ResizeEdge::North, &config);
        assert_eq!(resized, START);
    }

    #[test]
    fn extreme_deltas_saturate_instead_of_wrapping() {
        let config = GeometryConfig::default();
        let bounds = bounds();

        let right = drag_to(START, delta(i32::MAX, i32::MAX), bounds);
        assert_eq!((right.x, right.y), (bounds.max_x, bounds.max_y));
        let left = drag_to(START, delta(i32::MIN, i32::MIN), bounds);
        assert_eq!((left.x, left.y), (bounds.min_x, bounds.min_y));

        let grown = resize_rect(START, delta(i32::MAX, i32::MAX), ResizeEdge::SouthEast, &config);
        assert_eq!((grown.w, grown.h), (i32::MAX, i32::MAX));

        let west = resize_rect(START, delta(i32::MIN, i32::MIN), ResizeEdge::NorthWest, &config);
        assert_eq!((west.w, west.h), (i32::MAX, i32::MAX));
        assert_eq!((west.x, west.y), (i32::MIN + 80, i32::MIN + 80));

        let collapsed = resize_rect(START, delta(i32::MAX, i32::MAX), ResizeEdge::NorthWest, &config);
        assert_eq!(collapsed, START);
    }

    #[test]
    fn extreme_viewports_keep_bounds_ordered() {
        let config = GeometryConfig::default();
        for viewport in [
            Viewport {
                width: i32::MIN,
                height: i32::MIN,
            },
            Viewport {
                width: i32::MAX,
                height: i32::MAX,
            },
        ] {
            let bounds = config.drag_bounds(viewport, ChromeMetrics::default());
            assert!(bounds.min_x <= bounds.max_x);
            assert!(bounds.min_y <= bounds.max_y);
            let rect = maximize_bounds(viewport, ChromeMetrics::default(), &config);
            assert!(rect.w >= 0);
            assert!(rect.h >= config.min_maximized_height);
        }
    }

    #[test]
    fn maximize_fills_area_between_header_and_dock() {
        let config = GeometryConfig::default();
        let viewport = Viewport {
            width: 1280,
            height: 800,
        };
        assert_eq!(
            maximize_bounds(viewport, ChromeMetrics::default(), &config),
            WindowRect {
                x: 20,
                y: 56,
                w: 1240,
                h: 800 - 80 - 56 - 8,
            }
        );
        assert_eq!(
            maximize_bounds(
                viewport,
                ChromeMetrics {
                    header_height: Some(64),
                    dock_top: Some(700),
                },
                &config
            ),
            WindowRect {
                x: 20,
                y: 64,
                w: 1240,
                h: 628,
            }
        );
    }

    #[test]
    fn maximize_height_is_floored() {
        let config = GeometryConfig::default();
        let rect = maximize_bounds(
            Viewport {
                width: 30,
                height: 100,
            },
            ChromeMetrics::default(),
            &config,
        );
        assert_eq!(rect.h, 120);
        assert_eq!(rect.w, 0);
    }

    #[test]
    fn viewport_resize_only_refits_maximized_windows() {
        let config = GeometryConfig::default();
        let viewport = Viewport {
            width: 1000,
            height: 700,
        };
        let chrome = ChromeMetrics::default();
        assert_eq!(
            recompute_on_viewport_resize(START, WindowMode::Normal, viewport, chrome, &config),
            START
        );
        assert_eq!(
            recompute_on_viewport_resize(START, WindowMode::Minimized, viewport, chrome, &config),
            START
        );
        assert_eq!(
            recompute_on_viewport_resize(START, WindowMode::Maximized, viewport, chrome, &config),
            maximize_bounds(viewport, chrome, &config)
        );
    }
}
