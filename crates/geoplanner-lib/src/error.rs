use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the planner library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A points or routes file failed one of its record checks.
    #[error("error {code} reading {file} file {path}{}", format_line(.line), code = .cause.code(), file = .cause.file())]
    MalformedInput {
        path: PathBuf,
        line: Option<u64>,
        cause: MalformedCause,
    },

    /// Raised when a point identifier does not resolve in the map.
    #[error("unknown point: {id}{}", format_suggestions(.suggestions))]
    UnknownPoint { id: String, suggestions: Vec<String> },

    /// Raised when a route identifier does not resolve in the map.
    #[error("unknown route: {id}")]
    UnknownRoute { id: String },

    /// Raised when asking a route for the far end of a point it does not touch.
    #[error("point {point} is not an endpoint of route {route}")]
    NotAnEndpoint { route: String, point: String },

    /// Raised when a search is requested on a map without points.
    #[error("map is empty")]
    EmptyMap,

    /// Raised when a string cannot be used as an identifier.
    #[error("invalid identifier: {value:?}")]
    InvalidIdentifier { value: String },

    /// Raised when a point has out-of-range or non-finite coordinates.
    #[error("invalid point: {id}")]
    InvalidPoint { id: String },

    /// Raised when a route has a negative or non-finite length.
    #[error("invalid route: {id}")]
    InvalidRoute { id: String },

    /// Raised when two points share an identifier.
    #[error("duplicate point identifier: {id}")]
    DuplicatePoint { id: String },

    /// Raised when two routes share an identifier.
    #[error("duplicate route identifier: {id}")]
    DuplicateRoute { id: String },

    /// Raised when a route references a point absent from the map.
    #[error("route {route} references unknown point {point}")]
    DanglingEndpoint { route: String, point: String },

    /// Search bookkeeping lost track of a predecessor while rebuilding a path.
    #[error("search state is inconsistent: no closed node for point {point}")]
    SearchInconsistency { point: String },
}

/// Broad classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input file failed validation while loading.
    MalformedInput,
    /// An operation received an argument that does not make sense for the map.
    InvalidArgument,
    /// The library broke one of its own invariants.
    Internal,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedInput { .. } => ErrorKind::MalformedInput,
            Error::UnknownPoint { .. }
            | Error::UnknownRoute { .. }
            | Error::NotAnEndpoint { .. }
            | Error::EmptyMap
            | Error::InvalidIdentifier { .. }
            | Error::InvalidPoint { .. }
            | Error::InvalidRoute { .. }
            | Error::DuplicatePoint { .. }
            | Error::DuplicateRoute { .. }
            | Error::DanglingEndpoint { .. } => ErrorKind::InvalidArgument,
            Error::SearchInconsistency { .. } => ErrorKind::Internal,
        }
    }

    /// Numeric cause code for ingestion failures.
    pub fn cause_code(&self) -> Option<u8> {
        match self {
            Error::MalformedInput { cause, .. } => Some(cause.code()),
            _ => None,
        }
    }
}

/// Which input file an ingestion failure came from, with the check that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedCause {
    Points(PointsFault),
    Routes(RoutesFault),
}

impl MalformedCause {
    /// Numeric code reported to callers.
    pub fn code(self) -> u8 {
        match self {
            MalformedCause::Points(fault) => fault as u8,
            MalformedCause::Routes(fault) => fault as u8,
        }
    }

    /// Short name of the file kind.
    pub fn file(self) -> &'static str {
        match self {
            MalformedCause::Points(_) => "points",
            MalformedCause::Routes(_) => "routes",
        }
    }
}

/// Checks performed on each line of a points file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PointsFault {
    Open = 1,
    Header = 2,
    Id = 3,
    Name = 4,
    Latitude = 5,
    Longitude = 6,
    InvalidPoint = 7,
    DuplicateId = 8,
}

/// Checks performed on each line of a routes file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RoutesFault {
    Open = 1,
    Header = 2,
    Id = 3,
    Name = 4,
    FirstEndpoint = 5,
    SecondEndpoint = 6,
    Length = 7,
    InvalidRoute = 8,
    UnknownFirstEndpoint = 9,
    UnknownSecondEndpoint = 10,
    DuplicateId = 11,
}

impl fmt::Display for MalformedCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} file check {}", self.file(), self.code())
    }
}

fn format_line(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" (line {line})"),
        None => String::new(),
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
