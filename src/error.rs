//! The crate-wide error type.
//!
//! Core failures are typed so that callers can tell a malformed currency
//! string from a transport failure; everything else rides along inside an
//! `anyhow::Error` so command plumbing can keep using `Context`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A currency display string did not match the `R$ 1.234,56` pattern.
    #[error("malformed currency value '{0}'")]
    Format(String),

    /// A manually-entered transaction field failed validation.
    #[error("{0}")]
    Validation(String),

    /// There were no expense transactions to aggregate. Callers should treat
    /// this as "nothing to report", not as a fatal condition.
    #[error("no expense transactions to aggregate")]
    EmptyInput,

    /// The spreadsheet service could not be reached or rejected the request.
    #[error("sheet service unreachable: {0}")]
    Connectivity(anyhow::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
