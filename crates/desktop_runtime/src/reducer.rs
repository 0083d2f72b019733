//! Reducer actions, side-effect intents, and transition logic for the desktop runtime.

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    apps,
    config::DesktopConfig,
    geometry::{drag_to, maximize_bounds, recompute_on_viewport_resize, resize_rect},
    model::{
        AppId, ChromeMetrics, DesktopState, DragSession, InteractionState, PointerPosition,
        ResizeEdge, ResizeSession, Viewport, WindowMode, WindowRecord,
    },
    window::WindowError,
    window_manager::{self, OpenOutcome},
};

/// Measurements and settings the reducer reads but never mutates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DesktopEnvironment {
    pub config: DesktopConfig,
    pub viewport: Viewport,
    pub chrome: ChromeMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Open a window, or raise it if already open.
    OpenWindow { app_id: AppId },
    /// Close a window.
    CloseWindow { app_id: AppId },
    /// Raise a window above all others.
    FocusWindow { app_id: AppId },
    /// Minimize a window; a maximized window is restored on the way.
    MinimizeWindow { app_id: AppId },
    /// Minimize button: minimize, or un-minimize if already minimized.
    ToggleMinimize { app_id: AppId },
    /// Maximize a normal window into the desktop area.
    MaximizeWindow { app_id: AppId },
    /// Maximize button: maximize, or restore if already maximized.
    ToggleMaximize { app_id: AppId },
    /// Return a minimized or maximized window to normal.
    RestoreWindow { app_id: AppId },
    /// Global hotkey toggle of the terminal overlay.
    ToggleOverlay,
    /// Show or hide the terminal overlay.
    SetOverlayOpen { open: bool },
    /// Pointer down on a title bar.
    BeginMove {
        app_id: AppId,
        pointer: PointerPosition,
    },
    /// Pointer move during a drag.
    UpdateMove { pointer: PointerPosition },
    /// Pointer down on a resize handle.
    BeginResize {
        app_id: AppId,
        edge: ResizeEdge,
        pointer: PointerPosition,
    },
    /// Pointer move during a resize.
    UpdateResize { pointer: PointerPosition },
    /// Pointer up anywhere. Ends whichever gesture is active and keeps its last geometry.
    EndGesture,
    /// The environment's viewport or chrome changed; refit maximized windows.
    ViewportResized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the render layer to observe.
pub enum RuntimeEffect {
    WindowOpened(AppId),
    WindowClosed(AppId),
    /// Removed to make room under the open-window limit.
    WindowEvicted(AppId),
    /// Move keyboard focus into the newly raised window.
    FocusWindowInput(AppId),
    OverlayVisibilityChanged { open: bool },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for rejected actions. A rejected action leaves state untouched.
pub enum ReducerError {
    #[error("window `{0}` is not open")]
    WindowNotFound(AppId),
    #[error(transparent)]
    InvalidTransition(#[from] WindowError),
    #[error("another pointer gesture is already active")]
    GestureInProgress,
    #[error("window `{app_id}` does not accept pointer gestures while {mode}")]
    GestureNotPermitted { app_id: AppId, mode: WindowMode },
}

/// Applies a [`DesktopAction`] to the desktop state and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when the action targets a window that is not open, requests an
/// undefined mode transition, or starts a gesture that is not allowed.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    env: &DesktopEnvironment,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    let geometry = &env.config.geometry;
    match action {
        DesktopAction::OpenWindow { app_id } => {
            let rect = apps::default_rect(app_id, env.viewport, geometry);
            match window_manager::open_window(state, app_id, rect, env.config.max_open_windows) {
                OpenOutcome::Opened { evicted } => {
                    for evicted_id in evicted {
                        drop_gesture_for(interaction, evicted_id);
                        effects.push(RuntimeEffect::WindowEvicted(evicted_id));
                    }
                    effects.push(RuntimeEffect::WindowOpened(app_id));
                }
                OpenOutcome::Raised => {}
            }
            effects.push(RuntimeEffect::FocusWindowInput(app_id));
        }
        DesktopAction::CloseWindow { app_id } => {
            if !window_manager::close_window(state, app_id) {
                return Err(not_found(app_id));
            }
            drop_gesture_for(interaction, app_id);
            effects.push(RuntimeEffect::WindowClosed(app_id));
        }
        DesktopAction::FocusWindow { app_id } => {
            focus(state, app_id)?;
            effects.push(RuntimeEffect::FocusWindowInput(app_id));
        }
        DesktopAction::MinimizeWindow { app_id } => {
            find_window_mut(state, app_id)?.minimize();
        }
        DesktopAction::ToggleMinimize { app_id } => {
            find_window_mut(state, app_id)?.toggle_minimize();
        }
        DesktopAction::MaximizeWindow { app_id } => {
            let bounds = maximize_bounds(env.viewport, env.chrome, geometry);
            find_window_mut(state, app_id)?
                .maximize(bounds)
                .inspect_err(|err| warn!(%app_id, error = %err, "window transition rejected"))?;
            focus(state, app_id)?;
        }
        DesktopAction::ToggleMaximize { app_id } => {
            let bounds = maximize_bounds(env.viewport, env.chrome, geometry);
            find_window_mut(state, app_id)?
                .toggle_maximize(bounds)
                .inspect_err(|err| warn!(%app_id, error = %err, "window transition rejected"))?;
            focus(state, app_id)?;
        }
        DesktopAction::RestoreWindow { app_id } => {
            find_window_mut(state, app_id)?.restore();
            focus(state, app_id)?;
        }
        DesktopAction::ToggleOverlay => {
            state.terminal_open = !state.terminal_open;
            effects.push(RuntimeEffect::OverlayVisibilityChanged {
                open: state.terminal_open,
            });
        }
        DesktopAction::SetOverlayOpen { open } => {
            if state.terminal_open != open {
                state.terminal_open = open;
                effects.push(RuntimeEffect::OverlayVisibilityChanged { open });
            }
        }
        DesktopAction::BeginMove { app_id, pointer } => {
            let rect_start = gesture_target(state, interaction, app_id)?.rect;
            focus(state, app_id)?;
            debug!(%app_id, "drag started");
            interaction.dragging = Some(DragSession {
                app_id,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateMove { pointer } => {
            if let Some(session) = interaction.dragging.clone() {
                let bounds = geometry.drag_bounds(env.viewport, env.chrome);
                match state.window_mut(session.app_id) {
                    Some(window) if window.accepts_gestures() => {
                        let delta = pointer.delta_from(session.pointer_start);
                        window.rect = drag_to(session.rect_start, delta, bounds);
                        trace!(app_id = %session.app_id, x = window.rect.x, y = window.rect.y, "drag update");
                    }
                    Some(_) => {}
                    None => interaction.dragging = None,
                }
            }
        }
        DesktopAction::BeginResize {
            app_id,
            edge,
            pointer,
        } => {
            let rect_start = gesture_target(state, interaction, app_id)?.rect;
            focus(state, app_id)?;
            debug!(%app_id, ?edge, "resize started");
            interaction.resizing = Some(ResizeSession {
                app_id,
                edge,
                pointer_start: pointer,
                rect_start,
            });
        }
        DesktopAction::UpdateResize { pointer } => {
            if let Some(session) = interaction.resizing.clone() {
                match state.window_mut(session.app_id) {
                    Some(window) if window.accepts_gestures() => {
                        let delta = pointer.delta_from(session.pointer_start);
                        window.rect = resize_rect(session.rect_start, delta, session.edge, geometry);
                        trace!(app_id = %session.app_id, w = window.rect.w, h = window.rect.h, "resize update");
                    }
                    Some(_) => {}
                    None => interaction.resizing = None,
                }
            }
        }
        DesktopAction::EndGesture => {
            if interaction.gesture_active() {
                debug!("pointer gesture ended");
            }
            interaction.clear();
        }
        DesktopAction::ViewportResized => {
            for window in &mut state.windows {
                let bounds = recompute_on_viewport_resize(
                    window.rect,
                    window.mode,
                    env.viewport,
                    env.chrome,
                    geometry,
                );
                window.refit_maximized(bounds);
            }
        }
    }

    Ok(effects)
}

fn not_found(app_id: AppId) -> ReducerError {
    warn!(%app_id, "action targets a window that is not open");
    ReducerError::WindowNotFound(app_id)
}

fn find_window_mut(
    state: &mut DesktopState,
    app_id: AppId,
) -> Result<&mut WindowRecord, ReducerError> {
    state.window_mut(app_id).ok_or_else(|| not_found(app_id))
}

fn focus(state: &mut DesktopState, app_id: AppId) -> Result<(), ReducerError> {
    if window_manager::focus_window(state, app_id) {
        Ok(())
    } else {
        Err(not_found(app_id))
    }
}

fn gesture_target<'a>(
    state: &'a DesktopState,
    interaction: &InteractionState,
    app_id: AppId,
) -> Result<&'a WindowRecord, ReducerError> {
    if interaction.gesture_active() {
        warn!(%app_id, "gesture rejected while another is active");
        return Err(ReducerError::GestureInProgress);
    }
    let window = state.window(app_id).ok_or_else(|| not_found(app_id))?;
    if !window.accepts_gestures() {
        return Err(ReducerError::GestureNotPermitted {
            app_id,
            mode: window.mode,
        });
    }
    Ok(window)
}

fn drop_gesture_for(interaction: &mut InteractionState, app_id: AppId) {
    if interaction
        .dragging
        .as_ref()
        .is_some_and(|session| session.app_id == app_id)
    {
        interaction.dragging = None;
    }
    if interaction
        .resizing
        .as_ref()
        .is_some_and(|session| session.app_id == app_id)
    {
        interaction.resizing = None;
    }
}
