//! Route command handler for computing paths between waypoints.

use std::io::{self, Write};

use anyhow::{Context, Result};
use geoplanner_lib::{Map, PathRenderMode, PathSearch, PathSummary};
use tracing::info;

use crate::output::{write_json, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Origin point identifier.
    pub from: String,
    /// Destination point identifier.
    pub to: String,
}

/// Search for a path and print it. A missing path is reported, not treated as a failure.
pub fn handle_route_command(
    map: &Map,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let outcome = PathSearch::new(map)
        .search(&args.from, &args.to)
        .with_context(|| format!("failed to plan a path from {} to {}", args.from, args.to))?;
    info!(
        from = %args.from,
        to = %args.to,
        length = outcome.length,
        open = outcome.open_count,
        closed = outcome.closed_count,
        "search complete"
    );

    let summary = PathSummary::from_outcome(map, &args.from, &args.to, &outcome)?;
    let rendered = match format {
        OutputFormat::Json => return write_json(&summary),
        OutputFormat::Text => summary.render(PathRenderMode::PlainText),
        OutputFormat::Compact => summary.render(PathRenderMode::Compact),
    };
    io::stdout().lock().write_all(rendered.as_bytes())?;
    Ok(())
}
