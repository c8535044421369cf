use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::id::{PointId, RouteId};
use crate::map::Map;
use crate::path::SearchOutcome;
use crate::point::GeoPoint;
use crate::route::Route;

/// Presentation style for turning a [`PathSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRenderMode {
    /// One line per step with cumulative distance.
    PlainText,
    /// Single arrow-joined line of point names.
    Compact,
}

/// Endpoint of a search request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathEndpoint {
    pub id: PointId,
    pub name: String,
}

impl PathEndpoint {
    fn from_point(point: &GeoPoint) -> Self {
        Self {
            id: point.id.clone(),
            name: point.name.clone(),
        }
    }
}

/// Step of a found path with names resolved against the map.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryStep {
    pub index: usize,
    pub point: PointId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,
    /// Length of the route taken to reach this point.
    pub distance: f64,
    /// Distance travelled from the origin up to this point.
    pub cumulative: f64,
}

/// Structured representation of a search result that consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub origin: PathEndpoint,
    pub destination: PathEndpoint,
    pub found: bool,
    pub length: f64,
    pub hops: usize,
    pub open_count: usize,
    pub closed_count: usize,
    pub steps: Vec<SummaryStep>,
}

impl PathSummary {
    /// Resolve the identifiers in `outcome` into a summary.
    pub fn from_outcome(
        map: &Map,
        origin: &str,
        destination: &str,
        outcome: &SearchOutcome,
    ) -> Result<Self> {
        let origin = PathEndpoint::from_point(map.point(origin)?);
        let destination = PathEndpoint::from_point(map.point(destination)?);

        let mut cumulative = 0.0;
        let mut steps = Vec::with_capacity(outcome.path.len());
        for (index, step) in outcome.path.iter().enumerate() {
            let point = map.point(step.point.as_str())?;
            let route = step
                .route
                .as_ref()
                .map(|id| map.route(id.as_str()))
                .transpose()?;
            let distance = route.map(|r| r.length).unwrap_or(0.0);
            cumulative += distance;
            steps.push(SummaryStep {
                index,
                point: point.id.clone(),
                name: point.name.clone(),
                route: route.map(|r| r.id.clone()),
                route_name: route.map(|r| r.name.clone()),
                distance,
                cumulative,
            });
        }

        Ok(Self {
            origin,
            destination,
            found: outcome.found(),
            length: outcome.length,
            hops: outcome.path.hop_count(),
            open_count: outcome.open_count,
            closed_count: outcome.closed_count,
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: PathRenderMode) -> String {
        match mode {
            PathRenderMode::PlainText => self.render_plain(),
            PathRenderMode::Compact => self.render_compact(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        if !self.found {
            let _ = writeln!(
                buffer,
                "No path from {} to {} (open: {}, closed: {})",
                self.origin.name, self.destination.name, self.open_count, self.closed_count
            );
            return buffer;
        }

        let _ = writeln!(
            buffer,
            "Path: {} -> {} ({:.1} km, {} hops, open: {}, closed: {})",
            self.origin.name,
            self.destination.name,
            self.length,
            self.hops,
            self.open_count,
            self.closed_count
        );
        for step in &self.steps {
            match (&step.route, &step.route_name) {
                (Some(route), Some(route_name)) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} ({}) via {} [{}] {:.1} km",
                        step.index, step.name, step.point, route_name, route, step.cumulative
                    );
                }
                _ => {
                    let _ = writeln!(buffer, "{:>3}: {} ({})", step.index, step.name, step.point);
                }
            }
        }
        buffer
    }

    fn render_compact(&self) -> String {
        if !self.found {
            return format!("{} -> {}: no path\n", self.origin.id, self.destination.id);
        }
        let joined = self
            .steps
            .iter()
            .map(|step| step.point.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        format!("{joined} ({:.1} km)\n", self.length)
    }
}

/// Console line for a point: `ID<TAB>Name (lat,lon)`.
pub fn format_point(point: &GeoPoint) -> String {
    format!(
        "{}\t{} ({},{})",
        point.id, point.name, point.latitude, point.longitude
    )
}

/// Console line for a route: `ID<TAB>Name<TAB>lengthkm [a,b]`.
pub fn format_route(route: &Route) -> String {
    format!(
        "{}\t{}\t{}km [{},{}]",
        route.id, route.name, route.length, route.endpoints[0], route.endpoints[1]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::find_path;

    fn map() -> Map {
        let pid = |id: &str| PointId::parse(id).unwrap();
        Map::from_parts(
            vec![
                GeoPoint::new(pid("A"), "Alpha", 0.0, 0.0),
                GeoPoint::new(pid("B"), "Bravo", 0.0, 1.0),
                GeoPoint::new(pid("D"), "Delta", 10.0, 10.0),
            ],
            vec![Route::new(
                RouteId::parse("AB").unwrap(),
                "Coastal",
                pid("A"),
                pid("B"),
                120.0,
            )],
        )
        .unwrap()
    }

    #[test]
    fn summary_resolves_names_and_cumulative_distance() {
        let map = map();
        let outcome = find_path(&map, "A", "B").unwrap();
        let summary = PathSummary::from_outcome(&map, "A", "B", &outcome).unwrap();

        assert!(summary.found);
        assert_eq!(summary.hops, 1);
        assert_eq!(summary.steps[0].route, None);
        assert_eq!(summary.steps[1].route_name.as_deref(), Some("Coastal"));
        assert_eq!(summary.steps[1].cumulative, 120.0);

        let text = summary.render(PathRenderMode::PlainText);
        assert!(text.starts_with("Path: Alpha -> Bravo (120.0 km, 1 hops"));
        assert!(text.contains("via Coastal [AB]"));
        assert_eq!(summary.render(PathRenderMode::Compact), "A -> B (120.0 km)\n");
    }

    #[test]
    fn summary_reports_missing_path() {
        let map = map();
        let outcome = find_path(&map, "A", "D").unwrap();
        let summary = PathSummary::from_outcome(&map, "A", "D", &outcome).unwrap();

        assert!(!summary.found);
        assert!(summary.steps.is_empty());
        assert!(summary
            .render(PathRenderMode::PlainText)
            .starts_with("No path from Alpha to Delta"));
    }

    #[test]
    fn console_lines_match_listing_format() {
        let map = map();
        assert_eq!(format_point(&map.points()[0]), "A\tAlpha (0,0)");
        assert_eq!(format_route(&map.routes()[0]), "AB\tCoastal\t120km [A,B]");
    }
}
