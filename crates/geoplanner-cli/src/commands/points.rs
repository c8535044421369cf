//! Points command handler: list every waypoint of the map.

use anyhow::Result;
use geoplanner_lib::{format_point, Map};

use crate::output::{write_json, write_lines, OutputFormat};

/// Print the points of `map` in load order.
pub fn handle_points_command(map: &Map, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(map.points()),
        OutputFormat::Text => write_lines(map.points().iter().map(format_point)),
        OutputFormat::Compact => {
            let ids: Vec<&str> = map.points().iter().map(|p| p.id.as_str()).collect();
            write_lines([ids.join(" ")])
        }
    }
}
