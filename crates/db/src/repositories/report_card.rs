//! Report card repository for database operations.
//!
//! A report card carries two derived groups: the marks group (`percentage`,
//! `letter_grade`, `grade_points`) and `attendance_percentage`. Each group
//! is only ever written together with its own base columns, and a patch to
//! one group never recomputes the other. The rules live in
//! `acadia_core::report_card`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use acadia_core::grading::MarksPatch;
use acadia_core::report_card::{
    AttendancePatch, ReportCardError as DerivationError, ReportCardService,
};
use acadia_core::summary::{
    ClassSummary, CohortGradeRow, ReportCardFigures, ReportCardSummary, SummaryError,
    SummaryService,
};
use acadia_shared::types::{PageRequest, PageResponse, Patch, UserId};
use rust_decimal::Decimal;

use crate::entities::{report_cards, sea_orm_active_enums::InstitutionType};

/// Error types for report card operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportCardError {
    /// Report card not found.
    #[error("Report card not found: {0}")]
    NotFound(Uuid),

    /// Marks or attendance violate a record invariant.
    #[error(transparent)]
    Derivation(#[from] DerivationError),

    /// Summary over an empty record set.
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a report card.
#[derive(Debug, Clone)]
pub struct CreateReportCardInput {
    /// Student the report card belongs to.
    pub student_id: Uuid,
    /// Teacher issuing the report card.
    pub teacher_id: Uuid,
    /// Subject being reported.
    pub subject_id: Uuid,
    /// Academic year (e.g. "2025-26").
    pub academic_year: String,
    /// Semester for college records.
    pub semester: Option<String>,
    /// Term for school records.
    pub term: Option<String>,
    /// Consolidated marks obtained.
    pub marks_obtained: Decimal,
    /// Consolidated maximum marks.
    pub total_marks: Decimal,
    /// Classes the student attended.
    pub classes_attended: u32,
    /// Classes held in the period.
    pub total_classes: u32,
    /// Optional teacher remarks.
    pub teacher_remarks: Option<String>,
    /// Observed strengths.
    pub strengths: Option<String>,
    /// Areas needing work.
    pub areas_for_improvement: Option<String>,
    /// Whether this is the final report card of the period.
    pub is_final: bool,
}

/// Input for updating a report card.
#[derive(Debug, Clone, Default)]
pub struct UpdateReportCardInput {
    /// Marks changes, if any.
    pub marks: MarksPatch,
    /// Attendance changes, if any.
    pub attendance: AttendancePatch,
    /// New teacher remarks.
    pub teacher_remarks: Option<Option<String>>,
    /// New strengths.
    pub strengths: Option<Option<String>>,
    /// New areas for improvement.
    pub areas_for_improvement: Option<Option<String>>,
    /// New final flag.
    pub is_final: Option<bool>,
}

/// Filter for listing report cards.
#[derive(Debug, Clone, Default)]
pub struct ReportCardFilter {
    /// Restrict to one student.
    pub student_id: Option<Uuid>,
    /// Restrict to one teacher.
    pub teacher_id: Option<Uuid>,
    /// Restrict to one subject.
    pub subject_id: Option<Uuid>,
    /// Restrict to one academic year.
    pub academic_year: Option<String>,
    /// Restrict to one semester.
    pub semester: Option<String>,
    /// Restrict to one term.
    pub term: Option<String>,
    /// Restrict to published or draft report cards.
    pub is_published: Option<bool>,
    /// Restrict to final or interim report cards.
    pub is_final: Option<bool>,
}

/// Cohort selector for class summaries.
///
/// School cohorts are keyed by class level, college cohorts by department.
#[derive(Debug, Clone)]
pub struct CohortSelector {
    /// School or college.
    pub institution_type: InstitutionType,
    /// Class level, for school cohorts.
    pub class_level: Option<i32>,
    /// Department, for college cohorts.
    pub department: Option<String>,
    /// Academic year the summary covers.
    pub academic_year: String,
    /// Semester, if the summary is per-semester.
    pub semester: Option<String>,
    /// Term, if the summary is per-term.
    pub term: Option<String>,
}

/// Report card repository for CRUD, publish, and summary operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct ReportCardRepository {
    db: DatabaseConnection,
}

impl ReportCardRepository {
    /// Creates a new report card repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a report card, computing both derived groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the marks or attendance counts are invalid, or
    /// the insert fails.
    pub async fn create(
        &self,
        input: CreateReportCardInput,
    ) -> Result<report_cards::Model, ReportCardError> {
        let marks = ReportCardService::derive_marks(input.marks_obtained, input.total_marks)?;
        let attendance =
            ReportCardService::attendance_percentage(input.classes_attended, input.total_classes)?;

        let now = chrono::Utc::now().into();
        let report_card = report_cards::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(input.student_id),
            teacher_id: Set(input.teacher_id),
            subject_id: Set(input.subject_id),
            academic_year: Set(input.academic_year),
            semester: Set(input.semester),
            term: Set(input.term),
            marks_obtained: Set(input.marks_obtained),
            total_marks: Set(input.total_marks),
            percentage: Set(marks.percentage),
            letter_grade: Set(marks.letter_grade.to_string()),
            grade_points: Set(marks.grade_points),
            classes_attended: Set(i32::try_from(input.classes_attended).unwrap_or(i32::MAX)),
            total_classes: Set(i32::try_from(input.total_classes).unwrap_or(i32::MAX)),
            attendance_percentage: Set(attendance),
            teacher_remarks: Set(input.teacher_remarks),
            strengths: Set(input.strengths),
            areas_for_improvement: Set(input.areas_for_improvement),
            is_published: Set(false),
            is_final: Set(input.is_final),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(report_card.insert(&self.db).await?)
    }

    /// Gets a report card by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the report card is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<report_cards::Model, ReportCardError> {
        report_cards::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ReportCardError::NotFound(id))
    }

    /// Lists report cards matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: ReportCardFilter,
        page: PageRequest,
    ) -> Result<PageResponse<report_cards::Model>, ReportCardError> {
        let query = apply_filter(report_cards::Entity::find(), &filter);

        let paginator = query
            .order_by_desc(report_cards::Column::CreatedAt)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(u64::from(page.page.saturating_sub(1))).await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Updates a report card.
    ///
    /// The marks group is recomputed only when the patch touches a marks
    /// field, the attendance percentage only when it touches an attendance
    /// field.
    ///
    /// # Errors
    ///
    /// Returns an error if the report card is not found, the effective
    /// values are invalid, or the update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateReportCardInput,
    ) -> Result<report_cards::Model, ReportCardError> {
        let report_card = self.get(id).await?;

        let marks = ReportCardService::rederive_marks(
            report_card.marks_obtained,
            report_card.total_marks,
            input.marks,
        )?;
        let attendance = ReportCardService::rederive_attendance(
            report_card.classes_attended.unsigned_abs(),
            report_card.total_classes.unsigned_abs(),
            input.attendance,
        )?;

        let mut active: report_cards::ActiveModel = report_card.into();

        if let Some(teacher_remarks) = input.teacher_remarks {
            active.teacher_remarks = Set(teacher_remarks);
        }
        if let Some(strengths) = input.strengths {
            active.strengths = Set(strengths);
        }
        if let Some(areas_for_improvement) = input.areas_for_improvement {
            active.areas_for_improvement = Set(areas_for_improvement);
        }
        if let Some(is_final) = input.is_final {
            active.is_final = Set(is_final);
        }
        if let Some(derived) = marks {
            if let Patch::Set(obtained) = input.marks.marks_obtained {
                active.marks_obtained = Set(obtained);
            }
            if let Patch::Set(total) = input.marks.total_marks {
                active.total_marks = Set(total);
            }
            active.percentage = Set(derived.percentage);
            active.letter_grade = Set(derived.letter_grade.to_string());
            active.grade_points = Set(derived.grade_points);
        }
        if let Some(percentage) = attendance {
            if let Patch::Set(attended) = input.attendance.classes_attended {
                active.classes_attended = Set(i32::try_from(attended).unwrap_or(i32::MAX));
            }
            if let Patch::Set(total) = input.attendance.total_classes {
                active.total_classes = Set(i32::try_from(total).unwrap_or(i32::MAX));
            }
            active.attendance_percentage = Set(percentage);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a report card.
    ///
    /// # Errors
    ///
    /// Returns an error if the report card is not found or the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), ReportCardError> {
        let result = report_cards::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(ReportCardError::NotFound(id));
        }

        Ok(())
    }

    /// Publishes a batch of report cards in one transaction.
    ///
    /// Missing IDs are silently skipped; re-running the batch is a no-op.
    /// Returns the records that exist, in their post-publish state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database transaction fails.
    pub async fn publish(&self, ids: &[Uuid]) -> Result<Vec<report_cards::Model>, ReportCardError> {
        let txn = self.db.begin().await?;

        report_cards::Entity::update_many()
            .col_expr(
                report_cards::Column::IsPublished,
                sea_orm::sea_query::Expr::value(true),
            )
            .col_expr(
                report_cards::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(report_cards::Column::Id.is_in(ids.to_vec()))
            .exec(&txn)
            .await?;

        let updated = report_cards::Entity::find()
            .filter(report_cards::Column::Id.is_in(ids.to_vec()))
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Summarizes one student's published report cards for a period.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::NoRecords` (wrapped) when the student has no
    /// matching published report card, or an error if the query fails.
    pub async fn student_summary(
        &self,
        student_id: Uuid,
        academic_year: &str,
        semester: Option<&str>,
        term: Option<&str>,
    ) -> Result<ReportCardSummary, ReportCardError> {
        let mut query = report_cards::Entity::find()
            .filter(report_cards::Column::StudentId.eq(student_id))
            .filter(report_cards::Column::AcademicYear.eq(academic_year))
            .filter(report_cards::Column::IsPublished.eq(true));

        if let Some(semester) = semester {
            query = query.filter(report_cards::Column::Semester.eq(semester));
        }
        if let Some(term) = term {
            query = query.filter(report_cards::Column::Term.eq(term));
        }

        let records = query.all(&self.db).await?;
        let figures = to_figures(&records);

        Ok(SummaryService::summarize_report_cards(&figures)?)
    }

    /// Summarizes a cohort's published report cards.
    ///
    /// Averages are two-level: each student's mean percentage is computed
    /// first, and the cohort statistics range over those means, so a
    /// student with many report cards does not outweigh one with few.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::NoRecords` (wrapped) when no student in the
    /// cohort has a matching published report card, or an error if a query
    /// fails.
    pub async fn class_summary(
        &self,
        student_ids: &[Uuid],
        selector: &CohortSelector,
    ) -> Result<ClassSummary, ReportCardError> {
        let mut query = report_cards::Entity::find()
            .filter(report_cards::Column::StudentId.is_in(student_ids.to_vec()))
            .filter(report_cards::Column::AcademicYear.eq(&selector.academic_year))
            .filter(report_cards::Column::IsPublished.eq(true));

        if let Some(semester) = &selector.semester {
            query = query.filter(report_cards::Column::Semester.eq(semester));
        }
        if let Some(term) = &selector.term {
            query = query.filter(report_cards::Column::Term.eq(term));
        }

        let records = query
            .order_by_asc(report_cards::Column::StudentId)
            .order_by_asc(report_cards::Column::CreatedAt)
            .all(&self.db)
            .await?;
        let rows = to_cohort_rows(&records);

        Ok(SummaryService::summarize_cohort(&rows)?)
    }
}

fn apply_filter(
    mut query: sea_orm::Select<report_cards::Entity>,
    filter: &ReportCardFilter,
) -> sea_orm::Select<report_cards::Entity> {
    if let Some(student_id) = filter.student_id {
        query = query.filter(report_cards::Column::StudentId.eq(student_id));
    }
    if let Some(teacher_id) = filter.teacher_id {
        query = query.filter(report_cards::Column::TeacherId.eq(teacher_id));
    }
    if let Some(subject_id) = filter.subject_id {
        query = query.filter(report_cards::Column::SubjectId.eq(subject_id));
    }
    if let Some(academic_year) = &filter.academic_year {
        query = query.filter(report_cards::Column::AcademicYear.eq(academic_year));
    }
    if let Some(semester) = &filter.semester {
        query = query.filter(report_cards::Column::Semester.eq(semester));
    }
    if let Some(term) = &filter.term {
        query = query.filter(report_cards::Column::Term.eq(term));
    }
    if let Some(is_published) = filter.is_published {
        query = query.filter(report_cards::Column::IsPublished.eq(is_published));
    }
    if let Some(is_final) = filter.is_final {
        query = query.filter(report_cards::Column::IsFinal.eq(is_final));
    }
    query
}

/// Projects stored report card rows onto the per-student summary slice.
#[must_use]
pub fn to_figures(records: &[report_cards::Model]) -> Vec<ReportCardFigures> {
    records
        .iter()
        .map(|record| ReportCardFigures {
            percentage: record.percentage,
            grade_points: record.grade_points,
            attendance_percentage: record.attendance_percentage,
        })
        .collect()
}

/// Projects stored report card rows onto the cohort summary slice.
#[must_use]
pub fn to_cohort_rows(records: &[report_cards::Model]) -> Vec<CohortGradeRow> {
    records
        .iter()
        .map(|record| CohortGradeRow {
            student_id: UserId::from_uuid(record.student_id),
            percentage: record.percentage,
        })
        .collect()
}

#[cfg(all(test, feature = "mock"))]
#[path = "report_card_tests.rs"]
mod tests;
