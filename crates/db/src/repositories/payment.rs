//! Payment repository for database operations.
//!
//! Status transition rules live in `acadia_core::payment`; this module
//! persists the outcomes. `paid_at` is written exactly once, on the first
//! transition into `Paid`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use acadia_core::payment::{
    PaymentError as TransitionError, PaymentService, PaymentStatus as CorePaymentStatus,
};
use acadia_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;

use crate::entities::{payments, sea_orm_active_enums::PaymentStatus};

/// Error types for payment operations.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// Payment not found.
    #[error("Payment not found: {0}")]
    NotFound(Uuid),

    /// Amount must be positive.
    #[error("Payment amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Illegal status transition.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a payment.
#[derive(Debug, Clone)]
pub struct CreatePaymentInput {
    /// Student the payment is for.
    pub student_id: Uuid,
    /// Amount due.
    pub amount: Decimal,
    /// ISO-4217 currency code.
    pub currency: String,
    /// What the payment covers (e.g. "tuition").
    pub purpose: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional external reference.
    pub reference: Option<String>,
}

/// Filter for listing payments.
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    /// Restrict to one student.
    pub student_id: Option<Uuid>,
    /// Restrict to one status.
    pub status: Option<PaymentStatus>,
}

/// Payment repository for CRUD and lifecycle operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not positive or the insert fails.
    pub async fn create(&self, input: CreatePaymentInput) -> Result<payments::Model, PaymentError> {
        if input.amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount(input.amount));
        }

        let now = chrono::Utc::now().into();
        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(input.student_id),
            amount: Set(input.amount),
            currency: Set(input.currency),
            purpose: Set(input.purpose),
            description: Set(input.description),
            reference: Set(input.reference),
            status: Set(PaymentStatus::Pending),
            paid_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(payment.insert(&self.db).await?)
    }

    /// Gets a payment by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<payments::Model, PaymentError> {
        payments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(PaymentError::NotFound(id))
    }

    /// Lists payments matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: PaymentFilter,
        page: PageRequest,
    ) -> Result<PageResponse<payments::Model>, PaymentError> {
        let mut query = payments::Entity::find();

        if let Some(student_id) = filter.student_id {
            query = query.filter(payments::Column::StudentId.eq(student_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(payments::Column::Status.eq(status));
        }

        let paginator = query
            .order_by_desc(payments::Column::CreatedAt)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(u64::from(page.page.saturating_sub(1))).await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Applies a status transition to a payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the payment is not found, the transition is
    /// illegal, or the update fails.
    pub async fn transition(
        &self,
        id: Uuid,
        next: PaymentStatus,
    ) -> Result<payments::Model, PaymentError> {
        let payment = self.get(id).await?;

        let outcome = PaymentService::transition(
            to_core_status(payment.status),
            to_core_status(next),
            payment.paid_at.map(|at| at.to_utc()),
            chrono::Utc::now(),
        )?;

        let mut active: payments::ActiveModel = payment.into();
        active.status = Set(from_core_status(outcome.status));
        active.paid_at = Set(outcome.paid_at.map(Into::into));
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }
}

/// Maps the stored status onto the lifecycle rules' status.
#[must_use]
pub const fn to_core_status(status: PaymentStatus) -> CorePaymentStatus {
    match status {
        PaymentStatus::Pending => CorePaymentStatus::Pending,
        PaymentStatus::Paid => CorePaymentStatus::Paid,
        PaymentStatus::Failed => CorePaymentStatus::Failed,
        PaymentStatus::Refunded => CorePaymentStatus::Refunded,
    }
}

/// Maps a lifecycle status back onto the stored status.
#[must_use]
pub const fn from_core_status(status: CorePaymentStatus) -> PaymentStatus {
    match status {
        CorePaymentStatus::Pending => PaymentStatus::Pending,
        CorePaymentStatus::Paid => PaymentStatus::Paid,
        CorePaymentStatus::Failed => PaymentStatus::Failed,
        CorePaymentStatus::Refunded => PaymentStatus::Refunded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_round_trips() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Failed,
            PaymentStatus::Refunded,
        ] {
            assert_eq!(from_core_status(to_core_status(status)), status);
        }
    }
}
