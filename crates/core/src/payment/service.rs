//! Payment status transitions.

use chrono::{DateTime, Utc};

use super::error::PaymentError;
use super::types::{PaymentStatus, PaymentTransition};

/// Stateless service for payment lifecycle rules.
pub struct PaymentService;

impl PaymentService {
    /// Applies a status transition.
    ///
    /// `paid_at` is the currently stored settlement timestamp; it is set
    /// to `now` only on the first transition into `Paid` and preserved on
    /// every later transition, so re-applying `Paid` never moves it.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidTransition` for illegal transitions.
    pub fn transition(
        current: PaymentStatus,
        next: PaymentStatus,
        paid_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<PaymentTransition, PaymentError> {
        if !current.can_transition_to(next) {
            return Err(PaymentError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        let paid_at = match (next, paid_at) {
            (PaymentStatus::Paid, None) => Some(now),
            (_, stored) => stored,
        };

        Ok(PaymentTransition {
            status: next,
            paid_at,
        })
    }
}
