//! Line protocol for host signals.
//!
//! Lines starting with `!` are render-layer signals (`!open bounties`, `!drag about 0 0 40 20`).
//! Everything else is typed into the terminal overlay.

use anyhow::{anyhow, bail, Context, Result};
use desktop_runtime::{
    AppId, ChromeMetrics, DesktopAction, DesktopRuntime, PointerPosition, ResizeEdge, Viewport,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostLine {
    Terminal(String),
    Open(AppId),
    Close(AppId),
    Focus(AppId),
    ToggleMinimize(AppId),
    ToggleMaximize(AppId),
    ToggleOverlay,
    Drag {
        app_id: AppId,
        from: PointerPosition,
        to: PointerPosition,
    },
    Resize {
        app_id: AppId,
        edge: ResizeEdge,
        from: PointerPosition,
        to: PointerPosition,
    },
    Viewport(Viewport),
}

pub fn parse_line(raw: &str) -> Result<HostLine> {
    let Some(signal) = raw.trim().strip_prefix('!') else {
        return Ok(HostLine::Terminal(raw.to_string()));
    };
    let mut tokens = signal.split_whitespace();
    let name = tokens.next().ok_or_else(|| anyhow!("empty host signal"))?;
    let args: Vec<&str> = tokens.collect();

    let line = match (name, args.as_slice()) {
        ("open", [id]) => HostLine::Open(parse_app(id)?),
        ("close", [id]) => HostLine::Close(parse_app(id)?),
        ("focus", [id]) => HostLine::Focus(parse_app(id)?),
        ("minimize", [id]) => HostLine::ToggleMinimize(parse_app(id)?),
        ("maximize", [id]) => HostLine::ToggleMaximize(parse_app(id)?),
        ("toggle", []) => HostLine::ToggleOverlay,
        ("drag", [id, rest @ ..]) => {
            let (from, to) = parse_pointer_pair(rest)?;
            HostLine::Drag {
                app_id: parse_app(id)?,
                from,
                to,
            }
        }
        ("resize", [id, edge, rest @ ..]) => {
            let (from, to) = parse_pointer_pair(rest)?;
            HostLine::Resize {
                app_id: parse_app(id)?,
                edge: parse_edge(edge)?,
                from,
                to,
            }
        }
        ("viewport", [width, height]) => HostLine::Viewport(Viewport {
            width: parse_int(width)?,
            height: parse_int(height)?,
        }),
        _ => bail!("unrecognized host signal `!{signal}`"),
    };
    Ok(line)
}

/// Applies one parsed line. Returns terminal output to print, if any.
pub fn apply_line(runtime: &mut DesktopRuntime, line: HostLine) -> Result<Option<String>> {
    match line {
        HostLine::Terminal(text) => {
            return Ok(runtime.run_in_terminal(&text).map(|outcome| outcome.output));
        }
        HostLine::Open(app_id) => runtime.request_open(app_id)?,
        HostLine::Close(app_id) => runtime.request_close(app_id)?,
        HostLine::Focus(app_id) => runtime.request_focus(app_id)?,
        HostLine::ToggleMinimize(app_id) => {
            runtime.dispatch(DesktopAction::ToggleMinimize { app_id })?
        }
        HostLine::ToggleMaximize(app_id) => {
            runtime.dispatch(DesktopAction::ToggleMaximize { app_id })?
        }
        HostLine::ToggleOverlay => runtime.request_toggle_overlay()?,
        HostLine::Drag { app_id, from, to } => {
            runtime.begin_move(app_id, from)?;
            runtime.pointer_move(to)?;
            runtime.pointer_up()?;
        }
        HostLine::Resize {
            app_id,
            edge,
            from,
            to,
        } => {
            runtime.begin_resize(app_id, edge, from)?;
            runtime.pointer_move(to)?;
            runtime.pointer_up()?;
        }
        HostLine::Viewport(viewport) => runtime.set_viewport(viewport, ChromeMetrics::default())?,
    }
    Ok(None)
}

fn parse_app(raw: &str) -> Result<AppId> {
    raw.parse::<AppId>().context("bad window id in host signal")
}

fn parse_int(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .with_context(|| format!("expected an integer, got `{raw}`"))
}

fn parse_pointer_pair(args: &[&str]) -> Result<(PointerPosition, PointerPosition)> {
    let [x0, y0, x1, y1] = args else {
        bail!("expected four coordinates: x0 y0 x1 y1");
    };
    Ok((
        PointerPosition {
            x: parse_int(x0)?,
            y: parse_int(y0)?,
        },
        PointerPosition {
            x: parse_int(x1)?,
            y: parse_int(y1)?,
        },
    ))
}

fn parse_edge(raw: &str) -> Result<ResizeEdge> {
    let edge = match raw {
        "n" => ResizeEdge::North,
        "s" => ResizeEdge::South,
        "e" => ResizeEdge::East,
        "w" => ResizeEdge::West,
        "ne" => ResizeEdge::NorthEast,
        "nw" => ResizeEdge::NorthWest,
        "se" => ResizeEdge::SouthEast,
        "sw" => ResizeEdge::SouthWest,
        other => bail!("unknown resize edge `{other}`"),
    };
    Ok(edge)
}
