//! Single-owner container that wires the reducer, terminal session, and effect queue together.
//!
//! The render layer talks to the desktop only through this type: it forwards pointer and
//! chrome signals in, then reads [`DesktopRuntime::render_view`] and drains effects out.

use std::collections::VecDeque;

use system_shell::{ShellEngine, TerminalSession};
use system_shell_contract::{CommandOutcome, ShellAction, ShellRequest, StatusReport};
use tracing::{debug, warn};

use crate::{
    apps,
    config::{ConfigError, DesktopConfig},
    content::DesktopContent,
    model::{
        AppId, ChromeMetrics, DesktopState, DesktopView, InteractionState, PointerPosition,
        ResizeEdge, Viewport, WindowMode, WindowRect, WindowView, MINIMIZED_TITLEBAR_HEIGHT,
    },
    reducer::{reduce_desktop, DesktopAction, DesktopEnvironment, ReducerError, RuntimeEffect},
};

/// Key that toggles the terminal overlay.
pub const OVERLAY_HOTKEY: &str = "`";

/// Whether a keyboard `key` value should toggle the terminal overlay.
pub fn is_overlay_hotkey(key: &str) -> bool {
    key == OVERLAY_HOTKEY
}

#[derive(Debug)]
pub struct DesktopRuntime {
    state: DesktopState,
    interaction: InteractionState,
    env: DesktopEnvironment,
    content: Option<DesktopContent>,
    shell: ShellEngine,
    terminal: TerminalSession,
    effects: VecDeque<RuntimeEffect>,
}

impl DesktopRuntime {
    /// Validates `config` and boots the desktop with its initial window open.
    pub fn new(config: DesktopConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial_window = config.initial_window;
        let mut runtime = Self {
            state: DesktopState {
                next_z_index: config.initial_z_index,
                ..DesktopState::default()
            },
            interaction: InteractionState::default(),
            env: DesktopEnvironment {
                config,
                viewport,
                chrome: ChromeMetrics::default(),
            },
            content: None,
            shell: ShellEngine::new(apps::launcher_listings()),
            terminal: TerminalSession::new(),
            effects: VecDeque::new(),
        };
        runtime
            .dispatch(DesktopAction::OpenWindow {
                app_id: initial_window,
            })
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        debug!(%initial_window, "desktop booted");
        Ok(runtime)
    }

    /// Attaches the content records used by `status`.
    pub fn with_content(mut self, content: DesktopContent) -> Self {
        self.content = Some(content);
        self
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn transcript(&self) -> &[String] {
        self.terminal.transcript()
    }

    pub fn history(&self) -> &[String] {
        self.terminal.history()
    }

    /// Runs `action` through the reducer and queues its effects.
    ///
    /// # Errors
    ///
    /// Propagates [`ReducerError`]; a rejected action queues nothing.
    pub fn dispatch(&mut self, action: DesktopAction) -> Result<(), ReducerError> {
        let effects = reduce_desktop(&mut self.state, &mut self.interaction, &self.env, action)?;
        self.effects.extend(effects);
        Ok(())
    }

    /// Removes and returns queued effects in emission order.
    pub fn drain_effects(&mut self) -> Vec<RuntimeEffect> {
        self.effects.drain(..).collect()
    }

    pub fn request_open(&mut self, app_id: AppId) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::OpenWindow { app_id })
    }

    pub fn request_close(&mut self, app_id: AppId) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::CloseWindow { app_id })
    }

    pub fn request_focus(&mut self, app_id: AppId) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::FocusWindow { app_id })
    }

    pub fn request_toggle_overlay(&mut self) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::ToggleOverlay)
    }

    pub fn begin_move(
        &mut self,
        app_id: AppId,
        pointer: PointerPosition,
    ) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::BeginMove { app_id, pointer })
    }

    pub fn begin_resize(
        &mut self,
        app_id: AppId,
        edge: ResizeEdge,
        pointer: PointerPosition,
    ) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::BeginResize {
            app_id,
            edge,
            pointer,
        })
    }

    /// Routes a pointer move to whichever gesture is active. Without a gesture this is a no-op.
    pub fn pointer_move(&mut self, pointer: PointerPosition) -> Result<(), ReducerError> {
        if self.interaction.dragging.is_some() {
            self.dispatch(DesktopAction::UpdateMove { pointer })
        } else if self.interaction.resizing.is_some() {
            self.dispatch(DesktopAction::UpdateResize { pointer })
        } else {
            Ok(())
        }
    }

    pub fn pointer_up(&mut self) -> Result<(), ReducerError> {
        self.dispatch(DesktopAction::EndGesture)
    }

    /// Records new viewport and chrome measurements and refits maximized windows.
    pub fn set_viewport(
        &mut self,
        viewport: Viewport,
        chrome: ChromeMetrics,
    ) -> Result<(), ReducerError> {
        self.env.viewport = viewport;
        self.env.chrome = chrome;
        self.dispatch(DesktopAction::ViewportResized)
    }

    /// Figures reported by the terminal `status` command.
    pub fn status_report(&self) -> StatusReport {
        match &self.content {
            Some(content) => content.status_report(StatusReport::default()),
            None => StatusReport::default(),
        }
    }

    /// Submits one terminal line and applies the host actions it requests.
    ///
    /// Returns `None` for blank input.
    pub fn submit_command(&mut self, line: &str) -> Option<CommandOutcome> {
        let status = self.status_report();
        let outcome = self
            .terminal
            .submit(&self.shell, ShellRequest::new(line), &status)?;
        for action in &outcome.actions {
            self.apply_shell_action(action);
        }
        Some(outcome)
    }

    /// Opens the overlay if needed, then submits `line`.
    pub fn run_in_terminal(&mut self, line: &str) -> Option<CommandOutcome> {
        if !self.state.terminal_open {
            if let Err(err) = self.dispatch(DesktopAction::SetOverlayOpen { open: true }) {
                warn!(error = %err, "failed to open terminal overlay");
            }
        }
        self.submit_command(line)
    }

    /// Render-facing snapshot. Minimized windows report a collapsed title-bar height.
    pub fn render_view(&self) -> DesktopView {
        let focused = self.state.focused_window_id();
        let windows = self
            .state
            .windows
            .iter()
            .map(|window| {
                let rect = match window.mode {
                    WindowMode::Minimized => WindowRect {
                        h: MINIMIZED_TITLEBAR_HEIGHT,
                        ..window.rect
                    },
                    WindowMode::Normal | WindowMode::Maximized => window.rect,
                };
                WindowView {
                    app_id: window.app_id,
                    title: window.title.clone(),
                    rect,
                    z_index: window.z_index,
                    is_focused: focused == Some(window.app_id),
                    mode: window.mode,
                    content_visible: window.mode != WindowMode::Minimized,
                    resize_handles: window.accepts_gestures(),
                }
            })
            .collect();
        DesktopView {
            windows,
            focused,
            terminal_open: self.state.terminal_open,
            terminal_transcript: self.terminal.transcript().to_vec(),
        }
    }

    fn apply_shell_action(&mut self, action: &ShellAction) {
        let result = match action {
            ShellAction::OpenWindow { app_id } => match app_id.parse::<AppId>() {
                Ok(app_id) => self.dispatch(DesktopAction::OpenWindow { app_id }),
                Err(err) => {
                    warn!(error = %err, "shell requested an unknown window");
                    Ok(())
                }
            },
            ShellAction::CloseOverlay => {
                self.dispatch(DesktopAction::SetOverlayOpen { open: false })
            }
            // The terminal session already reset its transcript.
            ShellAction::ClearOutput => Ok(()),
        };
        if let Err(err) = result {
            warn!(error = %err, ?action, "shell action rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn runtime() -> DesktopRuntime {
        DesktopRuntime::new(DesktopConfig::default(), Viewport::default()).expect("boot")
    }

    #[test]
    fn boot_opens_initial_window_at_configured_z() {
        let mut runtime = runtime();
        let motd = runtime.state().window(AppId::Motd).expect("motd open");
        assert_eq!(motd.z_index, 10);
        assert_eq!(runtime.state().next_z_index, 11);
        assert_eq!(
            runtime.drain_effects(),
            vec![
                RuntimeEffect::WindowOpened(AppId::Motd),
                RuntimeEffect::FocusWindowInput(AppId::Motd),
            ]
        );
        assert!(runtime.drain_effects().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DesktopConfig {
            max_open_windows: Some(0),
            ..DesktopConfig::default()
        };
        assert!(DesktopRuntime::new(config, Viewport::default()).is_err());
    }

    #[test]
    fn open_command_opens_window_and_hides_overlay() {
        let mut runtime = runtime();
        runtime.request_toggle_overlay().unwrap();
        runtime.drain_effects();

        let outcome = runtime.submit_command("open events").expect("outcome");
        assert!(outcome.exit.is_success());
        assert_eq!(runtime.state().focused_window_id(), Some(AppId::Events));
        assert!(!runtime.state().terminal_open);
        assert_eq!(
            runtime.drain_effects(),
            vec![
                RuntimeEffect::WindowOpened(AppId::Events),
                RuntimeEffect::FocusWindowInput(AppId::Events),
                RuntimeEffect::OverlayVisibilityChanged { open: false },
            ]
        );
        assert_eq!(
            runtime.transcript(),
            &["> open events".to_string(), "Opening events...".to_string()]
        );
    }

    #[test]
    fn unknown_app_leaves_windows_and_overlay_alone() {
        let mut runtime = runtime();
        runtime.request_toggle_overlay().unwrap();
        let before = runtime.state().clone();

        let outcome = runtime.submit_command("open nope").expect("outcome");
        assert!(!outcome.exit.is_success());
        assert_eq!(runtime.state(), &before);
        assert!(runtime.transcript()[1].starts_with("Unknown app: nope"));
    }

    #[test]
    fn blank_line_is_ignored() {
        let mut runtime = runtime();
        assert_eq!(runtime.submit_command("   "), None);
        assert!(runtime.transcript().is_empty());
    }

    #[test]
    fn run_in_terminal_opens_overlay_before_submitting() {
        let mut runtime = runtime();
        let outcome = runtime.run_in_terminal("status").expect("outcome");
        assert!(outcome.exit.is_success());
        assert!(runtime.state().terminal_open);
        assert_eq!(runtime.transcript()[0], "> status");
    }

    #[test]
    fn status_uses_content_bounties_when_present() {
        let content = DesktopContent::from_json_str(
            r#"{ "bounties": [{ "title": "a", "prize": 1200 }, { "title": "b", "prize": 300 }] }"#,
        )
        .expect("content");
        let runtime = runtime().with_content(content);
        let report = runtime.status_report();
        assert_eq!(report.open_bounties, 2);
        assert_eq!(report.total_prizes, 1_500);
    }

    #[test]
    fn render_view_collapses_minimized_windows() {
        let mut runtime = runtime();
        runtime.request_open(AppId::About).unwrap();
        runtime
            .dispatch(DesktopAction::ToggleMinimize {
                app_id: AppId::About,
            })
            .unwrap();

        let view = runtime.render_view();
        let about = view
            .windows
            .iter()
            .find(|window| window.app_id == AppId::About)
            .expect("about view");
        assert_eq!(about.rect.h, MINIMIZED_TITLEBAR_HEIGHT);
        assert!(!about.content_visible);
        assert!(!about.resize_handles);
        assert!(about.is_focused);
        assert_eq!(
            runtime.state().window(AppId::About).unwrap().rect.h,
            400,
            "stored geometry is kept while minimized"
        );
    }

    #[test]
    fn pointer_move_without_gesture_is_noop() {
        let mut runtime = runtime();
        let before = runtime.state().clone();
        runtime
            .pointer_move(PointerPosition { x: 900, y: 900 })
            .unwrap();
        assert_eq!(runtime.state(), &before);
    }

    #[test]
    fn set_viewport_refits_maximized_window() {
        let mut runtime = runtime();
        runtime
            .dispatch(DesktopAction::ToggleMaximize {
                app_id: AppId::Motd,
            })
            .unwrap();
        runtime
            .set_viewport(
                Viewport {
                    width: 800,
                    height: 600,
                },
                ChromeMetrics {
                    header_height: Some(40),
                    dock_top: Some(540),
                },
            )
            .unwrap();
        assert_eq!(
            runtime.state().window(AppId::Motd).unwrap().rect,
            WindowRect {
                x: 20,
                y: 40,
                w: 760,
                h: 492,
            }
        );
    }

    #[test]
    fn backtick_is_the_overlay_hotkey() {
        assert!(is_overlay_hotkey("`"));
        assert!(!is_overlay_hotkey("~"));
    }
}
