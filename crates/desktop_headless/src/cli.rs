//! Command-line arguments for the headless desktop host.

use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

/// desktop-headless - drive the desktop window manager from stdin
#[derive(Debug, Parser)]
#[command(name = "desktop-headless")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Desktop config in TOML; defaults apply when omitted
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Content records in JSON, used by `status`
    #[arg(long, value_name = "PATH")]
    pub content: Option<PathBuf>,

    /// Viewport width in CSS pixels
    #[arg(long, default_value_t = 1920)]
    pub width: i32,

    /// Viewport height in CSS pixels
    #[arg(long, default_value_t = 1080)]
    pub height: i32,

    /// Print the render view as JSON after every line instead of once at the end
    #[arg(long)]
    pub trace_view: bool,

    /// Log level (overrides RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevelArg::Off => LevelFilter::OFF,
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}
