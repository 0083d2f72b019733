//! Shared command contracts used by the terminal overlay dispatcher and the desktop runtime.
//!
//! This crate is intentionally runtime-agnostic. It defines command metadata, execution
//! requests, the error taxonomy, and the host intents a command may request, without depending on
//! window-manager internals.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use serde::{Deserialize, Serialize};

/// Stable command name such as `open`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandName(String);

impl CommandName {
    /// Creates a command name from trusted caller input.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the name text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Positional argument specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandArgSpec {
    /// Human-readable argument label.
    pub name: String,
    /// Short description.
    pub summary: String,
    /// Whether this argument is required.
    pub required: bool,
}

/// Example invocation rendered in help output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandExample {
    /// Example command line.
    pub command: String,
}

/// Help metadata for a registered command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpDoc {
    /// Summary phrase shown in the help listing.
    pub summary: String,
    /// Usage string displayed in help output, e.g. `open <app>`.
    pub usage: String,
    /// Example invocations.
    pub examples: Vec<CommandExample>,
}

/// Full command registration metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Canonical command name.
    pub name: CommandName,
    /// Alternate flat aliases, such as `ls` for `apps`.
    pub aliases: Vec<String>,
    /// Positional argument metadata.
    pub args: Vec<CommandArgSpec>,
    /// Help metadata.
    pub help: HelpDoc,
}

impl CommandDescriptor {
    /// Returns whether `token` names this command or one of its aliases.
    pub fn matches(&self, token: &str) -> bool {
        self.name.as_str() == token || self.aliases.iter().any(|alias| alias == token)
    }
}

/// One entry of the launchable app catalog the dispatcher validates `open` against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppListing {
    /// Canonical app id typed after `open`.
    pub id: String,
    /// Decorated label, usually an emoji and a short description.
    pub summary: String,
}

/// Shell execution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellRequest {
    /// Input line to parse and execute.
    pub line: String,
}

impl ShellRequest {
    /// Creates a request for one input line.
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

/// Shell exit status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellExit {
    /// Numeric exit code.
    pub code: i32,
    /// Optional explanatory message.
    pub message: Option<String>,
}

impl ShellExit {
    /// Successful command completion.
    pub fn success() -> Self {
        Self {
            code: 0,
            message: None,
        }
    }

    /// Failed completion carrying the error's exit code.
    pub fn failure(error: &ShellError) -> Self {
        Self {
            code: error.exit_code(),
            message: Some(error.message.clone()),
        }
    }

    /// Returns whether the command completed successfully.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Structured shell error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellErrorCode {
    /// User input violated command usage (missing or unknown argument).
    Usage,
    /// The command was not found.
    NotFound,
}

/// Error emitted by command lookup or handlers.
///
/// Shell errors are rendered as text in the transcript and never abort the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellError {
    /// Error category.
    pub code: ShellErrorCode,
    /// Human-readable message.
    pub message: String,
}

impl ShellError {
    /// Creates a new shell error.
    pub fn new(code: ShellErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Converts the error into a conventional exit code.
    pub fn exit_code(&self) -> i32 {
        match self.code {
            ShellErrorCode::Usage => 2,
            ShellErrorCode::NotFound => 127,
        }
    }
}

/// Host-side intent requested by a command.
///
/// The dispatcher never touches window state itself; the host applies these in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ShellAction {
    /// Open (or raise) the window for a validated app id.
    OpenWindow {
        /// Canonical app id.
        app_id: String,
    },
    /// Hide the terminal overlay.
    CloseOverlay,
    /// Reset the overlay's output buffer.
    ClearOutput,
}

/// Result of dispatching one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    /// Matched command, if any.
    pub command: Option<CommandName>,
    /// Text block to append to the transcript. Empty for `clear`.
    pub output: String,
    /// Host intents to apply, in order.
    pub actions: Vec<ShellAction>,
    /// Exit metadata.
    pub exit: ShellExit,
}

impl CommandOutcome {
    /// Successful text-only response.
    pub fn text(command: CommandName, output: impl Into<String>) -> Self {
        Self {
            command: Some(command),
            output: output.into(),
            actions: Vec::new(),
            exit: ShellExit::success(),
        }
    }

    /// Failed response rendering `error` as text.
    pub fn error(command: Option<CommandName>, error: ShellError) -> Self {
        Self {
            command,
            exit: ShellExit::failure(&error),
            output: error.message,
            actions: Vec::new(),
        }
    }

    /// Appends a host intent.
    pub fn with_action(mut self, action: ShellAction) -> Self {
        self.actions.push(action);
        self
    }
}

/// Community figures reported by `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Community display name.
    pub community: String,
    /// Whether the page considers itself connected.
    pub connected: bool,
    /// Builders currently online.
    pub online_builders: u32,
    /// Count of open bounties.
    pub open_bounties: u32,
    /// Sum of open bounty prizes, in whole dollars.
    pub total_prizes: u64,
    /// Round-trip latency shown to the user, in milliseconds.
    pub ping_ms: u32,
}

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            community: "HackBU".to_string(),
            connected: true,
            online_builders: 187,
            open_bounties: 8,
            total_prizes: 1_625,
            ping_ms: 23,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_and_not_found_have_distinct_exit_codes() {
        let usage = ShellError::new(ShellErrorCode::Usage, "usage");
        let missing = ShellError::new(ShellErrorCode::NotFound, "missing");
        assert_ne!(usage.exit_code(), missing.exit_code());
    }

    #[test]
    fn descriptor_matches_aliases() {
        let descriptor = CommandDescriptor {
            name: CommandName::new("apps"),
            aliases: vec!["ls".to_string()],
            args: Vec::new(),
            help: HelpDoc {
                summary: "list available apps".to_string(),
                usage: "apps".to_string(),
                examples: Vec::new(),
            },
        };
        assert!(descriptor.matches("apps"));
        assert!(descriptor.matches("ls"));
        assert!(!descriptor.matches("open"));
    }

    #[test]
    fn shell_action_serializes_with_kind_tag() {
        let json = serde_json::to_string(&ShellAction::OpenWindow {
            app_id: "events".to_string(),
        })
        .expect("serialize");
        assert_eq!(json, r#"{"kind":"open-window","app_id":"events"}"#);
    }
}
