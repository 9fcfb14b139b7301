//! Grade repository for database operations.
//!
//! Writes derived columns (`percentage`, `letter_grade`) only together with
//! the marks they derive from, so a stored record can never disagree with
//! itself. The derivation rules live in `acadia_core::grading`.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use acadia_core::grading::{GradingError, GradingService, MarksPatch};
use acadia_core::summary::{GradeSummary, PublishedGrade, SummaryError, SummaryService};
use acadia_shared::types::{PageRequest, PageResponse, Patch, SubjectId};
use rust_decimal::Decimal;

use crate::entities::{grades, sea_orm_active_enums::AssessmentKind};

/// Error types for grade operations.
#[derive(Debug, thiserror::Error)]
pub enum GradeError {
    /// Grade not found.
    #[error("Grade not found: {0}")]
    NotFound(Uuid),

    /// Marks violate a record invariant.
    #[error(transparent)]
    Grading(#[from] GradingError),

    /// Summary over an empty record set.
    #[error(transparent)]
    Summary(#[from] SummaryError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a grade.
#[derive(Debug, Clone)]
pub struct CreateGradeInput {
    /// Student being graded.
    pub student_id: Uuid,
    /// Teacher recording the grade.
    pub teacher_id: Uuid,
    /// Subject of the assessment.
    pub subject_id: Uuid,
    /// Assessment name (e.g. "Midterm Exam").
    pub assessment_name: String,
    /// Assessment category.
    pub assessment_kind: AssessmentKind,
    /// Marks obtained.
    pub marks_obtained: Decimal,
    /// Maximum marks of the assessment.
    pub total_marks: Decimal,
    /// Academic year (e.g. "2025-26").
    pub academic_year: String,
    /// Semester for college records.
    pub semester: Option<String>,
    /// Term for school records.
    pub term: Option<String>,
    /// Optional remarks.
    pub remarks: Option<String>,
}

/// Input for updating a grade.
///
/// The marks patch carries its own presence tags; the remaining fields use
/// `Option` where absent means unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateGradeInput {
    /// New assessment name.
    pub assessment_name: Option<String>,
    /// New assessment category.
    pub assessment_kind: Option<AssessmentKind>,
    /// Marks changes, if any.
    pub marks: MarksPatch,
    /// New remarks.
    pub remarks: Option<Option<String>>,
}

/// Filter for listing grades.
#[derive(Debug, Clone, Default)]
pub struct GradeFilter {
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
    /// Restrict to published or draft grades.
    pub is_published: Option<bool>,
}

/// Grade repository for CRUD, publish, and summary operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct GradeRepository {
    db: DatabaseConnection,
}

impl GradeRepository {
    /// Creates a new grade repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a grade, computing the derived columns from the marks.
    ///
    /// # Errors
    ///
    /// Returns an error if the marks are invalid or the insert fails.
    pub async fn create(&self, input: CreateGradeInput) -> Result<grades::Model, GradeError> {
        let derived = GradingService::derive(input.marks_obtained, input.total_marks)?;

        let now = chrono::Utc::now().into();
        let grade = grades::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(input.student_id),
            teacher_id: Set(input.teacher_id),
            subject_id: Set(input.subject_id),
            assessment_name: Set(input.assessment_name),
            assessment_kind: Set(input.assessment_kind),
            marks_obtained: Set(input.marks_obtained),
            total_marks: Set(input.total_marks),
            percentage: Set(derived.percentage),
            letter_grade: Set(derived.letter_grade.to_string()),
            academic_year: Set(input.academic_year),
            semester: Set(input.semester),
            term: Set(input.term),
            remarks: Set(input.remarks),
            is_published: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(grade.insert(&self.db).await?)
    }

    /// Gets a grade by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the grade is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<grades::Model, GradeError> {
        grades::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(GradeError::NotFound(id))
    }

    /// Lists grades matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: GradeFilter,
        page: PageRequest,
    ) -> Result<PageResponse<grades::Model>, GradeError> {
        let query = apply_filter(grades::Entity::find(), &filter);

        let paginator = query
            .order_by_desc(grades::Column::CreatedAt)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(u64::from(page.page.saturating_sub(1))).await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Updates a grade.
    ///
    /// Derived columns are recomputed only when the patch touches a marks
    /// field; other updates leave them untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the grade is not found, the effective marks are
    /// invalid, or the update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateGradeInput,
    ) -> Result<grades::Model, GradeError> {
        let grade = self.get(id).await?;

        let rederived =
            GradingService::rederive(grade.marks_obtained, grade.total_marks, input.marks)?;

        let mut active: grades::ActiveModel = grade.into();

        if let Some(assessment_name) = input.assessment_name {
            active.assessment_name = Set(assessment_name);
        }
        if let Some(assessment_kind) = input.assessment_kind {
            active.assessment_kind = Set(assessment_kind);
        }
        if let Some(remarks) = input.remarks {
            active.remarks = Set(remarks);
        }
        if let Some(derived) = rederived {
            if let Patch::Set(obtained) = input.marks.marks_obtained {
                active.marks_obtained = Set(obtained);
            }
            if let Patch::Set(total) = input.marks.total_marks {
                active.total_marks = Set(total);
            }
            active.percentage = Set(derived.percentage);
            active.letter_grade = Set(derived.letter_grade.to_string());
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a grade.
    ///
    /// # Errors
    ///
    /// Returns an error if the grade is not found or the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), GradeError> {
        let result = grades::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(GradeError::NotFound(id));
        }

        Ok(())
    }

    /// Publishes a batch of grades in one transaction.
    ///
    /// Missing IDs are silently skipped; already-published grades stay
    /// published, so re-running the batch is a no-op. Returns the records
    /// that exist, in their post-publish state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database transaction fails.
    pub async fn publish(&self, ids: &[Uuid]) -> Result<Vec<grades::Model>, GradeError> {
        let txn = self.db.begin().await?;

        grades::Entity::update_many()
            .col_expr(
                grades::Column::IsPublished,
                sea_orm::sea_query::Expr::value(true),
            )
            .col_expr(
                grades::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now()),
            )
            .filter(grades::Column::Id.is_in(ids.to_vec()))
            .exec(&txn)
            .await?;

        let updated = grades::Entity::find()
            .filter(grades::Column::Id.is_in(ids.to_vec()))
            .all(&txn)
            .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Summarizes one student's published grades for a period.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::NoRecords` (wrapped) when the student has no
    /// matching published grade, or an error if the query fails.
    pub async fn student_summary(
        &self,
        student_id: Uuid,
        academic_year: &str,
        semester: Option<&str>,
        term: Option<&str>,
    ) -> Result<GradeSummary, GradeError> {
        let mut query = grades::Entity::find()
            .filter(grades::Column::StudentId.eq(student_id))
            .filter(grades::Column::AcademicYear.eq(academic_year))
            .filter(grades::Column::IsPublished.eq(true));

        if let Some(semester) = semester {
            query = query.filter(grades::Column::Semester.eq(semester));
        }
        if let Some(term) = term {
            query = query.filter(grades::Column::Term.eq(term));
        }

        let records = query.all(&self.db).await?;
        let rows = to_published(&records);

        Ok(SummaryService::summarize_grades(&rows)?)
    }
}

fn apply_filter(
    mut query: sea_orm::Select<grades::Entity>,
    filter: &GradeFilter,
) -> sea_orm::Select<grades::Entity> {
    if let Some(student_id) = filter.student_id {
        query = query.filter(grades::Column::StudentId.eq(student_id));
    }
    if let Some(teacher_id) = filter.teacher_id {
        query = query.filter(grades::Column::TeacherId.eq(teacher_id));
    }
    if let Some(subject_id) = filter.subject_id {
        query = query.filter(grades::Column::SubjectId.eq(subject_id));
    }
    if let Some(academic_year) = &filter.academic_year {
        query = query.filter(grades::Column::AcademicYear.eq(academic_year));
    }
    if let Some(semester) = &filter.semester {
        query = query.filter(grades::Column::Semester.eq(semester));
    }
    if let Some(term) = &filter.term {
        query = query.filter(grades::Column::Term.eq(term));
    }
    if let Some(is_published) = filter.is_published {
        query = query.filter(grades::Column::IsPublished.eq(is_published));
    }
    query
}

/// Projects stored grade rows onto the slice the aggregator consumes.
#[must_use]
pub fn to_published(records: &[grades::Model]) -> Vec<PublishedGrade> {
    records
        .iter()
        .map(|record| PublishedGrade {
            subject_id: SubjectId::from_uuid(record.subject_id),
            percentage: record.percentage,
        })
        .collect()
}

#[cfg(all(test, feature = "mock"))]
#[path = "grade_tests.rs"]
mod tests;
