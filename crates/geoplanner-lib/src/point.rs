use serde::Serialize;

use crate::error::{Error, Result};
use crate::id::PointId;

/// Mean Earth radius in kilometres used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A named waypoint on the globe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub id: PointId,
    pub name: String,
    /// Degrees, in `[-90, 90]`.
    pub latitude: f64,
    /// Degrees, in `[-180, 180]`.
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(id: PointId, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Coordinates are finite and inside their ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance in kilometres.
    ///
    /// A point is always at distance zero from a point with the same
    /// identifier, without going through the trigonometry.
    pub fn distance_to(&self, other: &GeoPoint) -> Result<f64> {
        if !self.is_valid() {
            return Err(Error::InvalidPoint {
                id: self.id.to_string(),
            });
        }
        if !other.is_valid() {
            return Err(Error::InvalidPoint {
                id: other.id.to_string(),
            });
        }
        if self.id == other.id {
            return Ok(0.0);
        }

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let sin_dlat = ((other.latitude - self.latitude).to_radians() / 2.0).sin();
        let sin_dlon = ((other.longitude - self.longitude).to_radians() / 2.0).sin();

        let a = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
        // atan2 stays well conditioned where asin(sqrt(a)) loses precision.
        Ok(2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt()))
    }
}
