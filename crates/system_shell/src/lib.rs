//! Line-oriented command dispatcher for the desktop terminal overlay.
//!
//! The engine owns a fixed command table and maps one input line to a [`CommandOutcome`]: a text
//! block plus the [`ShellAction`] intents the host should apply. It never mutates window state;
//! the desktop runtime applies the returned intents in order.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use system_shell_contract::{
    AppListing, CommandArgSpec, CommandDescriptor, CommandExample, CommandName, CommandOutcome,
    HelpDoc, ShellAction, ShellError, ShellErrorCode, ShellRequest, StatusReport,
};
use tracing::debug;

/// Maximum number of submitted lines retained in session history.
pub const MAX_HISTORY_LEN: usize = 100;

/// Maximum number of transcript entries retained; the oldest are dropped first.
pub const MAX_TRANSCRIPT_LEN: usize = 500;

const HELP_COLUMN_WIDTH: usize = 24;
const APPS_COLUMN_WIDTH: usize = 14;
const APPS_HINT: &str = "Run 'apps' to see available apps";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Help,
    Apps,
    Open,
    Status,
    Clear,
}

#[derive(Debug, Clone)]
struct RegisteredCommand {
    builtin: Builtin,
    descriptor: CommandDescriptor,
    /// Extra line appended to usage errors.
    usage_hint: Option<&'static str>,
}

impl RegisteredCommand {
    fn usage_error(&self) -> ShellError {
        let usage = format!("Usage: {}", self.descriptor.help.usage);
        let message = match self.usage_hint {
            Some(hint) => format!("{usage}\n{hint}"),
            None => usage,
        };
        ShellError::new(ShellErrorCode::Usage, message)
    }

    fn check_args(&self, provided: usize) -> Result<(), ShellError> {
        let required = self
            .descriptor
            .args
            .iter()
            .filter(|arg| arg.required)
            .count();
        if provided < required {
            Err(self.usage_error())
        } else {
            Ok(())
        }
    }
}

/// Dispatcher holding the fixed command table and the launchable app catalog.
#[derive(Debug, Clone)]
pub struct ShellEngine {
    commands: Vec<RegisteredCommand>,
    apps: Vec<AppListing>,
}

impl ShellEngine {
    /// Creates an engine that validates `open` against `apps`.
    pub fn new(apps: Vec<AppListing>) -> Self {
        Self {
            commands: builtin_commands(),
            apps,
        }
    }

    /// Parses and executes one command line.
    ///
    /// Returns `None` for blank input. Every other line produces an outcome; failures are carried
    /// as text with a non-zero exit, never as a Rust error.
    pub fn dispatch(&self, request: &ShellRequest, status: &StatusReport) -> Option<CommandOutcome> {
        let mut tokens = request.line.split_whitespace();
        let name = tokens.next()?;
        let args: Vec<&str> = tokens.collect();

        let Some(registered) = self
            .commands
            .iter()
            .find(|registered| registered.descriptor.matches(name))
        else {
            debug!(command = name, "command not found");
            return Some(CommandOutcome::error(
                None,
                ShellError::new(
                    ShellErrorCode::NotFound,
                    format!("Command not found: {name}\nType 'help' for available commands"),
                ),
            ));
        };

        let command = registered.descriptor.name.clone();
        if let Err(err) = registered.check_args(args.len()) {
            debug!(command = name, "missing required argument");
            return Some(CommandOutcome::error(Some(command), err));
        }
        let outcome = match registered.builtin {
            Builtin::Help => CommandOutcome::text(command, self.help_text()),
            Builtin::Apps => CommandOutcome::text(command, self.apps_text()),
            Builtin::Status => CommandOutcome::text(command, status_text(status)),
            Builtin::Clear => {
                CommandOutcome::text(command, String::new()).with_action(ShellAction::ClearOutput)
            }
            Builtin::Open => match self.resolve_app(registered, args.first().copied()) {
                Ok(app_id) => CommandOutcome::text(command, format!("Opening {app_id}..."))
                    .with_action(ShellAction::OpenWindow {
                        app_id: app_id.to_string(),
                    })
                    .with_action(ShellAction::CloseOverlay),
                Err(err) => CommandOutcome::error(Some(command), err),
            },
        };
        debug!(command = name, exit = outcome.exit.code, "command dispatched");
        Some(outcome)
    }

    fn resolve_app<'a>(
        &self,
        registered: &RegisteredCommand,
        arg: Option<&'a str>,
    ) -> Result<&'a str, ShellError> {
        let Some(target) = arg else {
            return Err(registered.usage_error());
        };
        if self.apps.iter().any(|app| app.id == target) {
            Ok(target)
        } else {
            Err(ShellError::new(
                ShellErrorCode::Usage,
                format!("Unknown app: {target}\n{APPS_HINT}"),
            ))
        }
    }

    fn help_text(&self) -> String {
        let mut lines = vec!["Available commands:".to_string()];
        lines.extend(
            self.commands
                .iter()
                .filter(|registered| registered.builtin != Builtin::Help)
                .map(|registered| {
                    let help = &registered.descriptor.help;
                    format!("  {:<width$}{}", help.usage, help.summary, width = HELP_COLUMN_WIDTH)
                }),
        );
        lines.push(String::new());
        lines.push("Examples:".to_string());
        lines.extend(
            self.commands
                .iter()
                .flat_map(|registered| registered.descriptor.help.examples.iter())
                .map(|example| format!("  > {}", example.command)),
        );
        lines.join("\n")
    }

    fn apps_text(&self) -> String {
        let mut lines = vec!["Available apps:".to_string()];
        lines.extend(
            self.apps
                .iter()
                .map(|app| format!("  {:<width$}{}", app.id, app.summary, width = APPS_COLUMN_WIDTH)),
        );
        lines.push(String::new());
        lines.push("Type 'open <name>' to launch".to_string());
        lines.join("\n")
    }
}

fn status_text(status: &StatusReport) -> String {
    [
        format!("{} Community Status", status.community),
        format!(
            "  Connected: {}",
            if status.connected { "✓" } else { "✗" }
        ),
        format!("  Online builders: {}", status.online_builders),
        format!("  Open bounties: {}", status.open_bounties),
        format!("  Total prizes: ${}", group_thousands(status.total_prizes)),
        format!("  Ping: {}ms", status.ping_ms),
    ]
    .join("\n")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn descriptor(
    name: &str,
    aliases: &[&str],
    usage: &str,
    summary: &str,
    args: Vec<CommandArgSpec>,
    examples: &[&str],
) -> CommandDescriptor {
    CommandDescriptor {
        name: CommandName::new(name),
        aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
        args,
        help: HelpDoc {
            summary: summary.to_string(),
            usage: usage.to_string(),
            examples: examples
                .iter()
                .map(|command| CommandExample {
                    command: command.to_string(),
                })
                .collect(),
        },
    }
}

fn builtin_commands() -> Vec<RegisteredCommand> {
    vec![
        RegisteredCommand {
            builtin: Builtin::Help,
            descriptor: descriptor("help", &[], "help", "show this help", Vec::new(), &[]),
            usage_hint: None,
        },
        RegisteredCommand {
            builtin: Builtin::Apps,
            descriptor: descriptor(
                "apps",
                &["ls"],
                "apps",
                "list available apps",
                Vec::new(),
                &["apps"],
            ),
            usage_hint: None,
        },
        RegisteredCommand {
            builtin: Builtin::Open,
            descriptor: descriptor(
                "open",
                &[],
                "open <app>",
                "open an app window",
                vec![CommandArgSpec {
                    name: "app".to_string(),
                    summary: "Canonical app id.".to_string(),
                    required: true,
                }],
                &["open bounties", "open gallery"],
            ),
            usage_hint: Some(APPS_HINT),
        },
        RegisteredCommand {
            builtin: Builtin::Status,
            descriptor: descriptor(
                "status",
                &[],
                "status",
                "show community stats",
                Vec::new(),
                &[],
            ),
            usage_hint: None,
        },
        RegisteredCommand {
            builtin: Builtin::Clear,
            descriptor: descriptor("clear", &[], "clear", "clear terminal", Vec::new(), &[]),
            usage_hint: None,
        },
    ]
}

/// Output buffer and input history for one terminal overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalSession {
    transcript: Vec<String>,
    history: Vec<String>,
}

impl TerminalSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript lines in display order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Submitted lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Executes one line and records it in the transcript.
    ///
    /// `clear` resets the transcript instead of echoing. The returned outcome still lists every
    /// action so the host can apply the ones it owns.
    pub fn submit(
        &mut self,
        engine: &ShellEngine,
        request: ShellRequest,
        status: &StatusReport,
    ) -> Option<CommandOutcome> {
        let line = request.line.trim();
        if line.is_empty() {
            return None;
        }
        let line = line.to_string();
        let outcome = engine.dispatch(&ShellRequest::new(line.clone()), status)?;

        self.history.push(line.clone());
        truncate_front(&mut self.history, MAX_HISTORY_LEN);

        if outcome.actions.contains(&ShellAction::ClearOutput) {
            self.transcript.clear();
        } else {
            self.transcript.push(format!("> {line}"));
            if !outcome.output.is_empty() {
                self.transcript.push(outcome.output.clone());
            }
            truncate_front(&mut self.transcript, MAX_TRANSCRIPT_LEN);
        }
        Some(outcome)
    }
}

fn truncate_front(entries: &mut Vec<String>, max_len: usize) {
    if entries.len() > max_len {
        let overflow = entries.len() - max_len;
        entries.drain(0..overflow);
    }
}
