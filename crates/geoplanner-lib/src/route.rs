use serde::Serialize;

use crate::error::{Error, Result};
use crate::id::{PointId, RouteId};

/// Bidirectional connection between two waypoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub endpoints: [PointId; 2],
    /// Kilometres.
    pub length: f64,
}

impl Route {
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        first: PointId,
        second: PointId,
        length: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            endpoints: [first, second],
            length,
        }
    }

    /// Length is a finite, non-negative number. Endpoint existence is a map concern.
    pub fn is_valid(&self) -> bool {
        self.length.is_finite() && self.length >= 0.0
    }

    /// Whether `point` is one of the two endpoints.
    pub fn touches(&self, point: &PointId) -> bool {
        self.endpoints.contains(point)
    }

    /// The endpoint that is not `point`.
    pub fn other_endpoint(&self, point: &PointId) -> Result<&PointId> {
        let [first, second] = &self.endpoints;
        if first == point {
            Ok(second)
        } else if second == point {
            Ok(first)
        } else {
            Err(Error::NotAnEndpoint {
                route: self.id.to_string(),
                point: point.to_string(),
            })
        }
    }
}
