use serde::Serialize;
use thiserror::Error;

/// Fatal errors while parsing one season's feed.
///
/// Malformed lines are not errors; they are skipped by the parsers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown month: {0}")]
    UnknownMonth(String),

    #[error("invalid date: {year}-{month}/{day}")]
    InvalidDate { year: i32, month: String, day: String },

    #[error("invalid season id: {0}")]
    InvalidSeasonId(String),

    /// An assembled record broke the model contract. Indicates a parser bug.
    #[error("invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("team of interest not found in standings for season {0}")]
    MissingStanding(String),
}

/// User-facing query errors. Returned as data, rendered as `{"error": "..."}`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Must specify either months or matches to compare")]
    MissingWindow,

    #[error("Manager not found")]
    ManagerNotFound,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl Serialize for QueryError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ErrorBody {
            error: self.to_string(),
        }
        .serialize(serializer)
    }
}
