//! Payment error types.

use thiserror::Error;

use super::types::PaymentStatus;

/// Errors raised by the payment status machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// The requested transition is not legal from the current state.
    #[error("cannot transition payment from {from:?} to {to:?}")]
    InvalidTransition {
        /// Current status.
        from: PaymentStatus,
        /// Requested status.
        to: PaymentStatus,
    },
}
