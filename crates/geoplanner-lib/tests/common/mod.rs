//! Common test utilities and fixture helpers.
//!
//! Builders for small in-memory maps plus a temporary directory helper for
//! tests that need points and routes files on disk.

use std::fs;
use std::path::PathBuf;

use geoplanner_lib::{load_map, GeoPoint, Map, PointId, Route, RouteId};
use tempfile::TempDir;

/// Path to the checked-in fixture directory.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load the north-east Brazil fixture map.
#[allow(dead_code)]
pub fn fixture_map() -> Map {
    let dir = fixtures_dir();
    load_map(&dir.join("pontos.csv"), &dir.join("rotas.csv")).expect("fixture map loads")
}

#[allow(dead_code)]
pub fn point(id: &str, latitude: f64, longitude: f64) -> GeoPoint {
    GeoPoint::new(PointId::parse(id).expect("valid id"), id, latitude, longitude)
}

#[allow(dead_code)]
pub fn route(id: &str, a: &str, b: &str, length: f64) -> Route {
    Route::new(
        RouteId::parse(id).expect("valid id"),
        id,
        PointId::parse(a).expect("valid id"),
        PointId::parse(b).expect("valid id"),
        length,
    )
}

#[allow(dead_code)]
pub fn map_of(points: Vec<GeoPoint>, routes: Vec<Route>) -> Map {
    Map::from_parts(points, routes).expect("valid test map")
}

/// Temporary directory holding a points file and a routes file.
#[allow(dead_code)]
pub struct MapFiles {
    _temp_dir: TempDir,
    pub points: PathBuf,
    pub routes: PathBuf,
}

#[allow(dead_code)]
impl MapFiles {
    pub fn new(points: &str, routes: &str) -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let points_path = temp_dir.path().join("pontos.csv");
        let routes_path = temp_dir.path().join("rotas.csv");
        fs::write(&points_path, points).expect("write points file");
        fs::write(&routes_path, routes).expect("write routes file");

        Self {
            _temp_dir: temp_dir,
            points: points_path,
            routes: routes_path,
        }
    }
}
