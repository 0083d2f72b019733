//! Stacking coordinator used by the desktop reducer: the open set, z-order, and capacity
//! eviction.
//!
//! Z-indices only grow. Focus hands out the next counter value, so the focused window is always
//! the unique maximum and no other window's relative order changes.

use tracing::debug;

use crate::{
    apps,
    model::{AppId, DesktopState, WindowMode, WindowRecord, WindowRect},
};

/// Result of an open request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A new window was inserted; `evicted` lists windows removed to respect the capacity.
    Opened { evicted: Vec<AppId> },
    /// The window was already open and has been raised instead.
    Raised,
}

/// Opens `app_id` at `rect`, or raises it if already open.
///
/// When `capacity` would be exceeded, the oldest-opened windows are removed first. Removal from
/// the open set and of the z-index entry is one operation, since the z-index lives on the record.
pub fn open_window(
    state: &mut DesktopState,
    app_id: AppId,
    rect: WindowRect,
    capacity: Option<usize>,
) -> OpenOutcome {
    if focus_window(state, app_id) {
        return OpenOutcome::Raised;
    }

    let mut evicted = Vec::new();
    if let Some(capacity) = capacity {
        while !state.windows.is_empty() && state.windows.len() >= capacity {
            let oldest = state.windows.remove(0);
            debug!(app_id = %oldest.app_id, "evicting oldest window to respect capacity");
            evicted.push(oldest.app_id);
        }
    }

    let z_index = next_z_index(state);
    state.windows.push(WindowRecord {
        app_id,
        title: apps::app_descriptor(app_id).title.to_string(),
        rect,
        restore_rect: None,
        mode: WindowMode::Normal,
        z_index,
    });
    debug!(%app_id, z_index, "window opened");
    OpenOutcome::Opened { evicted }
}

/// Raises `app_id` above every other open window.
///
/// Returns `false` when the window is not open.
pub fn focus_window(state: &mut DesktopState, app_id: AppId) -> bool {
    if !state.is_open(app_id) {
        return false;
    }
    let z_index = next_z_index(state);
    if let Some(window) = state.window_mut(app_id) {
        window.z_index = z_index;
    }
    debug!(%app_id, z_index, "window focused");
    true
}

/// Removes `app_id` from the open set. Returns `false` when it was not open.
pub fn close_window(state: &mut DesktopState, app_id: AppId) -> bool {
    let before_len = state.windows.len();
    state.windows.retain(|w| w.app_id != app_id);
    let closed = state.windows.len() != before_len;
    if closed {
        debug!(%app_id, "window closed");
    }
    closed
}

/// Renumbers z-indices to `1..=n` preserving order, and resets the counter above them.
pub fn normalize_window_stack(state: &mut DesktopState) {
    let mut order: Vec<usize> = (0..state.windows.len()).collect();
    order.sort_by_key(|&idx| state.windows[idx].z_index);
    for (rank, idx) in order.into_iter().enumerate() {
        state.windows[idx].z_index = rank as u32 + 1;
    }
    state.next_z_index = state.windows.len() as u32 + 1;
}

fn next_z_index(state: &mut DesktopState) -> u32 {
    if state.next_z_index == u32::MAX {
        normalize_window_stack(state);
    }
    let z_index = state.next_z_index;
    state.next_z_index += 1;
    z_index
}
