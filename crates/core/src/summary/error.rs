//! Summary error types.

use thiserror::Error;

/// Errors raised by summary aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SummaryError {
    /// No published records match the requested period. Distinct from a
    /// summary of zeros: "no data" must never read as "all zeros".
    #[error("no published records match the requested period")]
    NoRecords,
}
