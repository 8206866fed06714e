//! Domain errors for the testforge pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Domain-level errors that can occur while driving the pipeline.
///
/// Instance-local outcomes (compile failures, test failures, timeouts) are
/// not errors; they are classified into [`Verdict`](crate::domain::models::Verdict)
/// buckets. Only failures that prevent an operation from producing an outcome
/// at all live here.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),

    #[error("Oracle returned an empty reply")]
    EmptyReply,

    #[error("Scratch file {path}: {source}")]
    Scratch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown prompt strategy: {0}")]
    UnknownStrategy(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        DomainError::OracleUnavailable(err.to_string())
    }
}
