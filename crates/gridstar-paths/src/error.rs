use std::fmt;

use gridstar_core::Point;

/// Which end of a search a position belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Why an endpoint was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointFault {
    OutOfBounds,
    Blocked,
}

impl fmt::Display for EndpointFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("outside the grid"),
            Self::Blocked => f.write_str("on an obstacle"),
        }
    }
}

/// Errors raised by a search.
///
/// Finding no path is not an error: searches return an empty path instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Start or goal is outside the grid or blocked.
    #[error("invalid {endpoint} {pos}: {fault}")]
    InvalidEndpoint {
        endpoint: Endpoint,
        pos: Point,
        fault: EndpointFault,
    },
    /// Internal state-machine misuse, such as closing a position twice.
    #[error("search invariant violated: {0}")]
    InvariantViolation(String),
    /// A path was requested for a goal that was never closed.
    #[error("goal {0} was never reached")]
    Unreachable(Point),
}

pub type Result<T> = std::result::Result<T, PathError>;

/// Build a [`PathError::InvariantViolation`], logging it and failing hard
/// in debug builds.
pub(crate) fn invariant(msg: String) -> PathError {
    log::error!("search invariant violated: {msg}");
    if cfg!(debug_assertions) {
        panic!("search invariant violated: {msg}");
    }
    PathError::InvariantViolation(msg)
}
