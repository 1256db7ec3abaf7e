use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("unable to read csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("unable to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("unable to serialise chart: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to initialise logging: {0}")]
    Logging(String),
}

/// Reasons a single input row is skipped during ingestion.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("column '{column}' holds '{value}', which is not a vote count")]
    InvalidNumber { column: String, value: String },
    #[error("adding {votes} votes overflows the running vote totals")]
    VoteOverflow { votes: u64 },
    #[error("malformed record: {0}")]
    Record(#[from] csv::Error),
}
