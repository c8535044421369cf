// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs only parses arguments and dispatches.

pub mod points;
pub mod route;
pub mod routes;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use geoplanner_lib::{load_map, Map};
use tracing::debug;

/// Environment variable consulted when `--points` is not given.
pub const POINTS_ENV: &str = "GEOPLANNER_POINTS";
/// Environment variable consulted when `--routes` is not given.
pub const ROUTES_ENV: &str = "GEOPLANNER_ROUTES";

/// Locations of the points and routes files.
#[derive(Debug, Clone)]
pub struct MapSources {
    pub points: PathBuf,
    pub routes: PathBuf,
}

impl MapSources {
    /// Resolve file locations from flags, falling back to the environment.
    pub fn resolve(points: Option<&Path>, routes: Option<&Path>) -> Result<Self> {
        let points = points
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(POINTS_ENV).map(PathBuf::from))
            .with_context(|| format!("no points file given; pass --points or set {POINTS_ENV}"))?;
        let routes = routes
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(ROUTES_ENV).map(PathBuf::from))
            .with_context(|| format!("no routes file given; pass --routes or set {ROUTES_ENV}"))?;
        Ok(Self { points, routes })
    }

    /// Load both files into a map.
    pub fn load(&self) -> Result<Map> {
        debug!(points = %self.points.display(), routes = %self.routes.display(), "loading map");
        load_map(&self.points, &self.routes).with_context(|| {
            format!(
                "failed to load map from {} and {}",
                self.points.display(),
                self.routes.display()
            )
        })
    }
}
