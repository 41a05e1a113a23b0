//! Error types for loading, deriving and querying match data.
//!
//! [`AnalyticsError`] covers data-integrity failures that abort a run.
//! [`SelectionError`] covers user selections (season, team) that match no rows
//! and are reported back to the caller instead.

use thiserror::Error;

/// Fatal errors raised while reading or deriving the match table.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("missing required column: {column}")]
    Schema { column: &'static str },

    /// `row` is the 0-based index of the record in file order.
    #[error("record {row}: round label '{round}' has no positive match week")]
    Parse { row: usize, round: String },

    /// `row` is the 0-based index of the record in file order.
    #[error("record {row}: invalid value for {field}: '{value}'")]
    Validation {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recoverable errors for selections that have no rows behind them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no matches found for season {season}")]
    EmptySeason { season: i32 },

    #[error("no data found for {team} in season {season}")]
    TeamNotFound { team: String, season: i32 },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
