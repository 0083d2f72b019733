mod cli;
mod host;

use std::{
    fs,
    io::{self, BufRead, Write},
};

use anyhow::{Context, Result};
use clap::Parser;
use desktop_runtime::{load_desktop_config, DesktopConfig, DesktopContent, DesktopRuntime, Viewport};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn init_tracing(cli: &Cli) {
    let filter = match cli.log_level {
        Some(level) => EnvFilter::default().add_directive(level.to_level_filter().into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn build_runtime(cli: &Cli) -> Result<DesktopRuntime> {
    let config = match &cli.config {
        Some(path) => load_desktop_config(path)?,
        None => DesktopConfig::default(),
    };
    let viewport = Viewport {
        width: cli.width,
        height: cli.height,
    };
    let mut runtime = DesktopRuntime::new(config, viewport)?;
    if let Some(path) = &cli.content {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        runtime = runtime.with_content(DesktopContent::from_json_str(&raw)?);
    }
    Ok(runtime)
}

fn print_view(out: &mut impl Write, runtime: &DesktopRuntime) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &runtime.render_view())?;
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let mut runtime = build_runtime(&cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let parsed = match host::parse_line(&line) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "skipping line");
                continue;
            }
        };
        match host::apply_line(&mut runtime, parsed) {
            Ok(Some(output)) if !output.is_empty() => writeln!(out, "{output}")?,
            Ok(_) => {}
            Err(err) => warn!(error = %err, "host signal rejected"),
        }
        for effect in runtime.drain_effects() {
            debug!(?effect, "runtime effect");
        }
        if cli.trace_view {
            print_view(&mut out, &runtime)?;
        }
    }

    if !cli.trace_view {
        print_view(&mut out, &runtime)?;
    }
    Ok(())
}
