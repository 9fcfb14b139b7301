//! Tests for the payment status machine.

use chrono::{Duration, Utc};

use super::error::PaymentError;
use super::service::PaymentService;
use super::types::PaymentStatus;

#[test]
fn test_pending_to_paid_sets_paid_at() {
    let now = Utc::now();
    let result =
        PaymentService::transition(PaymentStatus::Pending, PaymentStatus::Paid, None, now).unwrap();

    assert_eq!(result.status, PaymentStatus::Paid);
    assert_eq!(result.paid_at, Some(now));
}

#[test]
fn test_paid_at_is_set_exactly_once() {
    let first = Utc::now();
    let later = first + Duration::hours(1);

    let settled =
        PaymentService::transition(PaymentStatus::Pending, PaymentStatus::Paid, None, first)
            .unwrap();
    // Re-applying "paid" keeps the original settlement time.
    let again = PaymentService::transition(
        PaymentStatus::Paid,
        PaymentStatus::Paid,
        settled.paid_at,
        later,
    )
    .unwrap();

    assert_eq!(again.paid_at, Some(first));
}

#[test]
fn test_pending_to_failed_leaves_paid_at_unset() {
    let result = PaymentService::transition(
        PaymentStatus::Pending,
        PaymentStatus::Failed,
        None,
        Utc::now(),
    )
    .unwrap();
    assert_eq!(result.paid_at, None);
}

#[test]
fn test_failed_payment_can_be_retried() {
    let result = PaymentService::transition(
        PaymentStatus::Failed,
        PaymentStatus::Pending,
        None,
        Utc::now(),
    );
    assert!(result.is_ok());
}

#[test]
fn test_refund_preserves_paid_at() {
    let settled_at = Utc::now();
    let result = PaymentService::transition(
        PaymentStatus::Paid,
        PaymentStatus::Refunded,
        Some(settled_at),
        settled_at + Duration::days(3),
    )
    .unwrap();

    assert_eq!(result.status, PaymentStatus::Refunded);
    assert_eq!(result.paid_at, Some(settled_at));
}

#[test]
fn test_illegal_transitions_are_rejected() {
    for (from, to) in [
        (PaymentStatus::Pending, PaymentStatus::Refunded),
        (PaymentStatus::Failed, PaymentStatus::Paid),
        (PaymentStatus::Refunded, PaymentStatus::Pending),
        (PaymentStatus::Paid, PaymentStatus::Pending),
    ] {
        assert_eq!(
            PaymentService::transition(from, to, None, Utc::now()),
            Err(PaymentError::InvalidTransition { from, to })
        );
    }
}
