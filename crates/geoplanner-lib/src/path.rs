use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::id::{PointId, RouteId};
use crate::map::Map;

/// Length reported by [`SearchOutcome`] when no path exists.
pub const NO_PATH_LENGTH: f64 = -1.0;

/// One step of a [`Path`]: the route taken and the point it arrives at.
///
/// The first step of a non-empty path has no route; it is the origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub route: Option<RouteId>,
    pub point: PointId,
}

impl PathStep {
    pub fn origin(point: PointId) -> Self {
        Self { route: None, point }
    }

    pub fn via(route: RouteId, point: PointId) -> Self {
        Self {
            route: Some(route),
            point,
        }
    }
}

/// Ordered list of steps from an origin to a destination. Empty when no path exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Path {
    steps: Vec<PathStep>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathStep> {
        self.steps.iter()
    }

    pub fn origin(&self) -> Option<&PointId> {
        self.steps.first().map(|step| &step.point)
    }

    pub fn destination(&self) -> Option<&PointId> {
        self.steps.last().map(|step| &step.point)
    }

    /// Number of routes traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Sum the lengths of the routes named in the steps, in travel order.
    pub fn total_length(&self, map: &Map) -> Result<f64> {
        self.steps
            .iter()
            .filter_map(|step| step.route.as_ref())
            .try_fold(0.0, |total, route| -> Result<f64> {
                Ok(total + map.route(route.as_str())?.length)
            })
    }
}

impl From<Vec<PathStep>> for Path {
    fn from(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Result of a single [`PathSearch::search`] call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Total length in kilometres, or [`NO_PATH_LENGTH`].
    pub length: f64,
    pub path: Path,
    /// Nodes left in the open set when the search stopped.
    pub open_count: usize,
    /// Nodes expanded (closed) when the search stopped.
    pub closed_count: usize,
}

impl SearchOutcome {
    /// Whether a path to the destination was found.
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Entry of the open or closed set. Identity is the point alone.
#[derive(Debug, Clone)]
struct Node {
    point: PointId,
    via: Option<RouteId>,
    g: f64,
    h: f64,
    f: f64,
}

impl Node {
    fn new(point: PointId, via: Option<RouteId>, g: f64, h: f64) -> Self {
        Self {
            point,
            via,
            g,
            h,
            f: g + h,
        }
    }
}

/// Open set kept sorted ascending by `f`.
///
/// A node is inserted before every node whose `f` is not smaller than its
/// own, so among equal `f` values the most recently inserted is popped first.
#[derive(Debug, Default)]
struct OpenList {
    nodes: VecDeque<Node>,
    members: HashSet<PointId>,
}

impl OpenList {
    fn pop_front(&mut self) -> Option<Node> {
        let node = self.nodes.pop_front()?;
        self.members.remove(&node.point);
        Some(node)
    }

    fn position(&self, point: &PointId) -> Option<usize> {
        if !self.members.contains(point) {
            return None;
        }
        self.nodes.iter().position(|node| &node.point == point)
    }

    fn remove(&mut self, index: usize) -> Option<Node> {
        let node = self.nodes.remove(index)?;
        self.members.remove(&node.point);
        Some(node)
    }

    fn insert(&mut self, node: Node) {
        let index = self.nodes.partition_point(|existing| existing.f < node.f);
        self.members.insert(node.point.clone());
        self.nodes.insert(index, node);
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// A* search over a [`Map`] using great-circle distance as the heuristic.
///
/// The map is only read. Every call to [`PathSearch::search`] owns its own
/// open and closed sets, so one map can serve any number of searches.
#[derive(Debug, Clone, Copy)]
pub struct PathSearch<'a> {
    map: &'a Map,
}

impl<'a> PathSearch<'a> {
    pub fn new(map: &'a Map) -> Self {
        Self { map }
    }

    /// Find the shortest path from `origin` to `destination`.
    ///
    /// Fails on an empty map or when either identifier does not resolve.
    /// When the two points are not connected the outcome carries
    /// [`NO_PATH_LENGTH`] and an empty path; that is not an error.
    pub fn search(&self, origin: &str, destination: &str) -> Result<SearchOutcome> {
        if self.map.is_empty() {
            return Err(Error::EmptyMap);
        }
        let origin = self.map.point(origin)?;
        let goal = self.map.point(destination)?;

        let mut open = OpenList::default();
        let mut closed: HashMap<PointId, Node> = HashMap::new();

        open.insert(Node::new(
            origin.id.clone(),
            None,
            0.0,
            origin.distance_to(goal)?,
        ));

        let mut reached = None;
        while let Some(current) = open.pop_front() {
            trace!(point = %current.point, g = current.g, h = current.h, f = current.f, "expanding");
            let point = current.point.clone();
            let g = current.g;
            closed.insert(point.clone(), current);
            if point == goal.id {
                reached = Some(point);
                break;
            }

            for route in self.map.routes_incident(point.as_str()) {
                let next = route.other_endpoint(&point)?;
                if closed.contains_key(next) {
                    continue;
                }

                let h = self.map.point(next.as_str())?.distance_to(goal)?;
                let candidate = Node::new(next.clone(), Some(route.id.clone()), g + route.length, h);

                if let Some(index) = open.position(next) {
                    if candidate.f >= open.nodes[index].f {
                        continue;
                    }
                    open.remove(index);
                }
                open.insert(candidate);
            }
        }

        let open_count = open.len();
        let closed_count = closed.len();
        debug!(
            origin = %origin.id,
            destination = %goal.id,
            open_count,
            closed_count,
            found = reached.is_some(),
            "search finished"
        );

        let Some(last) = reached else {
            return Ok(SearchOutcome {
                length: NO_PATH_LENGTH,
                path: Path::new(),
                open_count,
                closed_count,
            });
        };

        let (length, path) = self.reconstruct(&closed, &last)?;
        Ok(SearchOutcome {
            length,
            path,
            open_count,
            closed_count,
        })
    }

    /// Walk predecessor routes back to the origin through the closed set.
    fn reconstruct(&self, closed: &HashMap<PointId, Node>, last: &PointId) -> Result<(f64, Path)> {
        let missing = |point: &PointId| Error::SearchInconsistency {
            point: point.to_string(),
        };
        let mut node = closed.get(last).ok_or_else(|| missing(last))?;
        let length = node.g;

        let mut steps = Vec::new();
        while let Some(route_id) = &node.via {
            steps.push(PathStep::via(route_id.clone(), node.point.clone()));
            let previous = self
                .map
                .route(route_id.as_str())?
                .other_endpoint(&node.point)?;
            node = closed.get(previous).ok_or_else(|| missing(previous))?;
        }
        steps.push(PathStep::origin(node.point.clone()));
        steps.reverse();
        Ok((length, Path::from(steps)))
    }
}

/// Convenience wrapper around [`PathSearch::search`].
pub fn find_path(map: &Map, origin: &str, destination: &str) -> Result<SearchOutcome> {
    PathSearch::new(map).search(origin, destination)
}
