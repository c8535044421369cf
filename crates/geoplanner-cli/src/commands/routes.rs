//! Routes command handler.

use anyhow::Result;
use geoplanner_lib::{format_route, Map};

use crate::output::{write_json, write_lines, OutputFormat};

/// Print the routes of `map` in load order.
pub fn handle_routes_command(map: &Map, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(map.routes()),
        OutputFormat::Text => write_lines(map.routes().iter().map(format_route)),
        OutputFormat::Compact => {
            let ids: Vec<&str> = map.routes().iter().map(|r| r.id.as_str()).collect();
            write_lines([ids.join(" ")])
        }
    }
}
