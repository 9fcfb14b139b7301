//! Payment data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, awaiting settlement.
    Pending,
    /// Settled successfully.
    Paid,
    /// Settlement failed; may be retried.
    Failed,
    /// Refunded after settlement. Terminal.
    Refunded,
}

impl PaymentStatus {
    /// Returns the snake_case name used in the API and database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// Returns `true` if `next` is a legal transition from this state.
    /// Same-state transitions are allowed as no-ops.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Pending | Self::Paid | Self::Failed)
                | (Self::Failed, Self::Failed | Self::Pending)
                | (Self::Paid, Self::Paid | Self::Refunded)
                | (Self::Refunded, Self::Refunded)
        )
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Result of applying a status transition: the new state plus the
/// `paid_at` value to persist alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentTransition {
    /// The status after the transition.
    pub status: PaymentStatus,
    /// Settlement timestamp; written exactly once, on the first arrival
    /// in `Paid`, and preserved afterwards.
    pub paid_at: Option<DateTime<Utc>>,
}
