//! Attendance repository for database operations.
//!
//! Daily attendance rows are independent of the attendance tallies on
//! report cards; those carry their own counts.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use acadia_core::attendance::attendance_rate;
use acadia_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;

use crate::entities::{attendance, sea_orm_active_enums::AttendanceStatus};

/// Error types for attendance operations.
#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    /// Attendance record not found.
    #[error("Attendance record not found: {0}")]
    NotFound(Uuid),

    /// Attendance already recorded for the student on that date.
    #[error("Attendance already recorded for student {student_id} on {date}")]
    AlreadyRecorded {
        /// Student with the existing record.
        student_id: Uuid,
        /// Date of the existing record.
        date: chrono::NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for recording attendance.
#[derive(Debug, Clone)]
pub struct RecordAttendanceInput {
    /// Student the record belongs to.
    pub student_id: Uuid,
    /// Teacher taking attendance.
    pub teacher_id: Uuid,
    /// Date of the class day.
    pub date: chrono::NaiveDate,
    /// Initial status.
    pub status: AttendanceStatus,
}

/// Filter for listing attendance records.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    /// Restrict to one student.
    pub student_id: Option<Uuid>,
    /// Restrict to one teacher.
    pub teacher_id: Option<Uuid>,
    /// Restrict to dates on or after this one.
    pub from: Option<chrono::NaiveDate>,
    /// Restrict to dates on or before this one.
    pub to: Option<chrono::NaiveDate>,
    /// Restrict to one status.
    pub status: Option<AttendanceStatus>,
}

/// Attendance repository for record, update, and rate operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct AttendanceRepository {
    db: DatabaseConnection,
}

impl AttendanceRepository {
    /// Creates a new attendance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records attendance for one student on one date.
    ///
    /// # Errors
    ///
    /// Returns an error if the student already has a record for that date
    /// or the insert fails.
    pub async fn record(
        &self,
        input: RecordAttendanceInput,
    ) -> Result<attendance::Model, AttendanceError> {
        let existing = attendance::Entity::find()
            .filter(attendance::Column::StudentId.eq(input.student_id))
            .filter(attendance::Column::Date.eq(input.date))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(AttendanceError::AlreadyRecorded {
                student_id: input.student_id,
                date: input.date,
            });
        }

        let now = chrono::Utc::now().into();
        let record = attendance::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(input.student_id),
            teacher_id: Set(input.teacher_id),
            date: Set(input.date),
            status: Set(input.status),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(record.insert(&self.db).await?)
    }

    /// Gets an attendance record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<attendance::Model, AttendanceError> {
        attendance::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AttendanceError::NotFound(id))
    }

    /// Updates the status of an attendance record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not found or the update fails.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: AttendanceStatus,
    ) -> Result<attendance::Model, AttendanceError> {
        let record = self.get(id).await?;

        let mut active: attendance::ActiveModel = record.into();
        active.status = Set(status);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Lists attendance records matching a filter, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: AttendanceFilter,
        page: PageRequest,
    ) -> Result<PageResponse<attendance::Model>, AttendanceError> {
        let mut query = attendance::Entity::find();

        if let Some(student_id) = filter.student_id {
            query = query.filter(attendance::Column::StudentId.eq(student_id));
        }
        if let Some(teacher_id) = filter.teacher_id {
            query = query.filter(attendance::Column::TeacherId.eq(teacher_id));
        }
        if let Some(from) = filter.from {
            query = query.filter(attendance::Column::Date.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(attendance::Column::Date.lte(to));
        }
        if let Some(status) = filter.status {
            query = query.filter(attendance::Column::Status.eq(status));
        }

        let paginator = query
            .order_by_desc(attendance::Column::Date)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(u64::from(page.page.saturating_sub(1))).await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Attendance rate of a student over all marked days.
    ///
    /// Pending rows are excluded; a student with no marked days has a rate
    /// of zero.
    ///
    /// # Errors
    ///
    /// Returns an error if a count query fails.
    pub async fn student_rate(&self, student_id: Uuid) -> Result<Decimal, AttendanceError> {
        let present = attendance::Entity::find()
            .filter(attendance::Column::StudentId.eq(student_id))
            .filter(attendance::Column::Status.eq(AttendanceStatus::Present))
            .count(&self.db)
            .await?;
        let absent = attendance::Entity::find()
            .filter(attendance::Column::StudentId.eq(student_id))
            .filter(attendance::Column::Status.eq(AttendanceStatus::Absent))
            .count(&self.db)
            .await?;

        Ok(attendance_rate(present, absent))
    }
}
