use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::id::{PointId, RouteId};
use crate::point::GeoPoint;
use crate::route::Route;

/// Similarity threshold used when suggesting identifiers for typos.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// In-memory set of waypoints and the routes between them.
///
/// Points and routes keep the order they were supplied in. Incident-route
/// lists follow route order, which the search relies on for deterministic
/// tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct Map {
    points: Vec<GeoPoint>,
    routes: Vec<Route>,
    point_index: HashMap<PointId, usize>,
    route_index: HashMap<RouteId, usize>,
    incident: HashMap<PointId, Vec<usize>>,
}

impl Map {
    /// Build a map, checking validity, uniqueness and that every route
    /// endpoint names a point in `points`.
    pub fn from_parts(points: Vec<GeoPoint>, routes: Vec<Route>) -> Result<Self> {
        let mut point_index = HashMap::with_capacity(points.len());
        for (index, point) in points.iter().enumerate() {
            if !point.is_valid() {
                return Err(Error::InvalidPoint {
                    id: point.id.to_string(),
                });
            }
            if point_index.insert(point.id.clone(), index).is_some() {
                return Err(Error::DuplicatePoint {
                    id: point.id.to_string(),
                });
            }
        }

        let mut route_index = HashMap::with_capacity(routes.len());
        let mut incident: HashMap<PointId, Vec<usize>> = HashMap::new();
        for (index, route) in routes.iter().enumerate() {
            if !route.is_valid() {
                return Err(Error::InvalidRoute {
                    id: route.id.to_string(),
                });
            }
            for endpoint in &route.endpoints {
                if !point_index.contains_key(endpoint) {
                    return Err(Error::DanglingEndpoint {
                        route: route.id.to_string(),
                        point: endpoint.to_string(),
                    });
                }
            }
            if route_index.insert(route.id.clone(), index).is_some() {
                return Err(Error::DuplicateRoute {
                    id: route.id.to_string(),
                });
            }

            let [first, second] = &route.endpoints;
            incident.entry(first.clone()).or_default().push(index);
            if second != first {
                incident.entry(second.clone()).or_default().push(index);
            }
        }

        let map = Self {
            points,
            routes,
            point_index,
            route_index,
            incident,
        };
        map.warn_inadmissible_routes();
        Ok(map)
    }

    /// Replace the whole map. On error the current contents are left untouched.
    pub fn replace_all(&mut self, points: Vec<GeoPoint>, routes: Vec<Route>) -> Result<()> {
        *self = Self::from_parts(points, routes)?;
        Ok(())
    }

    /// Reload from a points file and a routes file. Nothing changes unless both load.
    pub fn reload(&mut self, points_path: &Path, routes_path: &Path) -> Result<()> {
        *self = crate::loader::load_map(points_path, routes_path)?;
        Ok(())
    }

    /// Drop all points and routes.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Points in load order.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Routes in load order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn contains_point(&self, id: &str) -> bool {
        self.point_index.contains_key(id)
    }

    pub fn contains_route(&self, id: &str) -> bool {
        self.route_index.contains_key(id)
    }

    /// Look up a point by identifier.
    pub fn point(&self, id: &str) -> Result<&GeoPoint> {
        self.point_index
            .get(id)
            .map(|&index| &self.points[index])
            .ok_or_else(|| Error::UnknownPoint {
                id: id.to_string(),
                suggestions: self.fuzzy_point_matches(id, 3),
            })
    }

    /// Look up a route by identifier.
    pub fn route(&self, id: &str) -> Result<&Route> {
        self.route_index
            .get(id)
            .map(|&index| &self.routes[index])
            .ok_or_else(|| Error::UnknownRoute { id: id.to_string() })
    }

    /// Routes that have `point` as either endpoint, in load order.
    pub fn routes_incident<'a>(&'a self, point: &str) -> impl Iterator<Item = &'a Route> + 'a {
        self.incident
            .get(point)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&index| &self.routes[index])
    }

    /// Point identifiers similar to `query`, best match first.
    ///
    /// Names are compared as well so that a user typing a city name still gets
    /// pointed at its identifier.
    pub fn fuzzy_point_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .points
            .iter()
            .map(|point| {
                let by_id = strsim::jaro_winkler(&needle, &point.id.as_str().to_lowercase());
                let by_name = strsim::jaro_winkler(&needle, &point.name.to_lowercase());
                (by_id.max(by_name), point.id.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }

    fn warn_inadmissible_routes(&self) {
        let mut inadmissible = 0usize;
        for route in &self.routes {
            let [first, second] = &route.endpoints;
            let (Some(&a), Some(&b)) = (self.point_index.get(first), self.point_index.get(second))
            else {
                continue;
            };
            if let Ok(straight) = self.points[a].distance_to(&self.points[b]) {
                if route.length < straight {
                    inadmissible += 1;
                    debug!(
                        route = %route.id,
                        length = route.length,
                        straight_line = straight,
                        "route shorter than great-circle distance"
                    );
                }
            }
        }

        if inadmissible > 0 {
            warn!(
                inadmissible,
                "routes shorter than the straight-line distance; shortest paths are not guaranteed"
            );
        }
    }
}
