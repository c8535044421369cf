//! Geoplanner library entry points.
//!
//! This crate loads a map of named waypoints and the routes between them,
//! and finds least-cost paths with an A* search guided by great-circle
//! distance. Higher-level consumers (the CLI) should only depend on the
//! items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod id;
pub mod loader;
pub mod map;
pub mod output;
pub mod path;
pub mod point;
pub mod route;

pub use error::{Error, ErrorKind, MalformedCause, PointsFault, Result, RoutesFault};
pub use id::{PointId, RouteId};
pub use loader::{load_map, load_points, load_routes, read_points, read_routes};
pub use map::Map;
pub use output::{format_point, format_route, PathRenderMode, PathSummary, SummaryStep};
pub use path::{find_path, Path, PathSearch, PathStep, SearchOutcome, NO_PATH_LENGTH};
pub use point::{GeoPoint, EARTH_RADIUS_KM};
pub use route::Route;
