//! Points and routes file ingestion.
//!
//! Both files are `;`-separated with a fixed header line. Every record is
//! checked in a fixed order and the first failed check aborts the whole load
//! with a [`MalformedCause`] naming the file kind and the numeric code of the
//! check. Nothing is handed to a [`Map`] until both files have been read.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::{Error, MalformedCause, PointsFault, Result, RoutesFault};
use crate::id::{PointId, RouteId};
use crate::map::Map;
use crate::point::GeoPoint;
use crate::route::Route;

/// Header line expected at the top of a points file.
pub const POINTS_HEADER: &str = "ID;Nome;Latitude;Longitude";

/// Header line expected at the top of a routes file.
pub const ROUTES_HEADER: &str = "ID;Nome;Extremidade 1;Extremidade 2;Comprimento";

const POINT_FIELDS: usize = 4;
const ROUTE_FIELDS: usize = 5;

/// A failed check together with the line it happened on.
struct Rejection<F> {
    line: Option<u64>,
    fault: F,
}

impl<F> Rejection<F> {
    fn at(record: &StringRecord, fault: F) -> Self {
        Self {
            line: record.position().map(|pos| pos.line()),
            fault,
        }
    }
}

/// Load a points file and a routes file into a new [`Map`].
pub fn load_map(points_path: &Path, routes_path: &Path) -> Result<Map> {
    let points = load_points(points_path)?;
    let routes = load_routes(routes_path, &points)?;
    debug!(
        points = points.len(),
        routes = routes.len(),
        points_path = %points_path.display(),
        routes_path = %routes_path.display(),
        "loaded map"
    );
    Map::from_parts(points, routes)
}

/// Load every point from a points file.
pub fn load_points(path: &Path) -> Result<Vec<GeoPoint>> {
    let file = File::open(path).map_err(|err| {
        debug!(path = %path.display(), error = %err, "cannot open points file");
        malformed(path, None, MalformedCause::Points(PointsFault::Open))
    })?;
    read_points(file, path)
}

/// Load every route from a routes file. Endpoints must name one of `points`.
pub fn load_routes(path: &Path, points: &[GeoPoint]) -> Result<Vec<Route>> {
    let file = File::open(path).map_err(|err| {
        debug!(path = %path.display(), error = %err, "cannot open routes file");
        malformed(path, None, MalformedCause::Routes(RoutesFault::Open))
    })?;
    read_routes(file, path, points)
}

/// Parse points from any reader. `source` is only used in error reports.
pub fn read_points<R: Read>(reader: R, source: &Path) -> Result<Vec<GeoPoint>> {
    parse_points(reader).map_err(|rejection| {
        malformed(
            source,
            rejection.line,
            MalformedCause::Points(rejection.fault),
        )
    })
}

/// Parse routes from any reader. `source` is only used in error reports.
pub fn read_routes<R: Read>(reader: R, source: &Path, points: &[GeoPoint]) -> Result<Vec<Route>> {
    parse_routes(reader, points).map_err(|rejection| {
        malformed(
            source,
            rejection.line,
            MalformedCause::Routes(rejection.fault),
        )
    })
}

fn parse_points<R: Read>(reader: R) -> std::result::Result<Vec<GeoPoint>, Rejection<PointsFault>> {
    let mut csv_reader = csv_reader(reader);
    let mut records = csv_reader.records();

    match records.next() {
        Some(Ok(header)) if header_matches(&header, POINTS_HEADER) => {}
        _ => {
            return Err(Rejection {
                line: Some(1),
                fault: PointsFault::Header,
            })
        }
    }

    let mut points = Vec::new();
    let mut seen = HashSet::new();
    for entry in records {
        let record = entry.map_err(|err| Rejection {
            line: err.position().map(|pos| pos.line()),
            fault: PointsFault::Id,
        })?;
        let reject = |fault: PointsFault| Rejection::at(&record, fault);
        warn_extra_fields(&record, POINT_FIELDS);

        let id = record.get(0).ok_or_else(|| reject(PointsFault::Id))?;
        let name = record.get(1).ok_or_else(|| reject(PointsFault::Name))?;
        let latitude = parse_number(record.get(2)).ok_or_else(|| reject(PointsFault::Latitude))?;
        let longitude =
            parse_number(record.get(3)).ok_or_else(|| reject(PointsFault::Longitude))?;

        let id = PointId::parse(id).ok_or_else(|| reject(PointsFault::InvalidPoint))?;
        let point = GeoPoint::new(id, name, latitude, longitude);
        if !point.is_valid() {
            return Err(reject(PointsFault::InvalidPoint));
        }
        if !seen.insert(point.id.clone()) {
            return Err(reject(PointsFault::DuplicateId));
        }
        points.push(point);
    }

    Ok(points)
}

fn parse_routes<R: Read>(
    reader: R,
    points: &[GeoPoint],
) -> std::result::Result<Vec<Route>, Rejection<RoutesFault>> {
    let mut csv_reader = csv_reader(reader);
    let mut records = csv_reader.records();

    match records.next() {
        Some(Ok(header)) if header_matches(&header, ROUTES_HEADER) => {}
        _ => {
            return Err(Rejection {
                line: Some(1),
                fault: RoutesFault::Header,
            })
        }
    }

    let known: HashSet<&PointId> = points.iter().map(|point| &point.id).collect();
    let mut routes = Vec::new();
    let mut seen = HashSet::new();
    for entry in records {
        let record = entry.map_err(|err| Rejection {
            line: err.position().map(|pos| pos.line()),
            fault: RoutesFault::Id,
        })?;
        let reject = |fault: RoutesFault| Rejection::at(&record, fault);
        warn_extra_fields(&record, ROUTE_FIELDS);

        let id = record.get(0).ok_or_else(|| reject(RoutesFault::Id))?;
        let name = record.get(1).ok_or_else(|| reject(RoutesFault::Name))?;
        let first = record
            .get(2)
            .ok_or_else(|| reject(RoutesFault::FirstEndpoint))?;
        let second = record
            .get(3)
            .ok_or_else(|| reject(RoutesFault::SecondEndpoint))?;
        let length = parse_number(record.get(4)).ok_or_else(|| reject(RoutesFault::Length))?;

        let (Some(id), Some(first), Some(second)) = (
            RouteId::parse(id),
            PointId::parse(first),
            PointId::parse(second),
        ) else {
            return Err(reject(RoutesFault::InvalidRoute));
        };
        let route = Route::new(id, name, first, second, length);
        if !route.is_valid() {
            return Err(reject(RoutesFault::InvalidRoute));
        }

        let [first, second] = &route.endpoints;
        if !known.contains(first) {
            return Err(reject(RoutesFault::UnknownFirstEndpoint));
        }
        if !known.contains(second) {
            return Err(reject(RoutesFault::UnknownSecondEndpoint));
        }
        if !seen.insert(route.id.clone()) {
            return Err(reject(RoutesFault::DuplicateId));
        }
        routes.push(route);
    }

    Ok(routes)
}

fn csv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn header_matches(record: &StringRecord, expected: &str) -> bool {
    record.iter().eq(expected.split(';'))
}

fn parse_number(field: Option<&str>) -> Option<f64> {
    field.and_then(|value| value.parse::<f64>().ok())
}

fn warn_extra_fields(record: &StringRecord, expected: usize) {
    if record.len() > expected {
        warn!(
            line = record.position().map(|pos| pos.line()),
            fields = record.len(),
            expected,
            "ignoring extra fields"
        );
    }
}

fn malformed(path: &Path, line: Option<u64>, cause: MalformedCause) -> Error {
    Error::MalformedInput {
        path: path.to_path_buf(),
        line,
        cause,
    }
}
