//! Course and enrollment repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use acadia_shared::types::{PageRequest, PageResponse};

use crate::entities::{
    courses, enrollments,
    sea_orm_active_enums::EnrollmentStatus,
};

/// Error types for course operations.
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    /// Course not found.
    #[error("Course not found: {0}")]
    NotFound(Uuid),

    /// Course code already exists.
    #[error("Course code already exists: {0}")]
    DuplicateCode(String),

    /// Student is already enrolled in the course.
    #[error("Student {student_id} is already enrolled in course {course_id}")]
    AlreadyEnrolled {
        /// The student.
        student_id: Uuid,
        /// The course.
        course_id: Uuid,
    },

    /// Course has reached its enrollment cap.
    #[error("Course {0} is full")]
    CourseFull(Uuid),

    /// Enrollment not found.
    #[error("Enrollment not found: {0}")]
    EnrollmentNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a course.
#[derive(Debug, Clone)]
pub struct CreateCourseInput {
    /// Unique course code (e.g. CS101).
    pub code: String,
    /// Course name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Credit hours.
    pub credits: i32,
    /// Teacher running the course.
    pub teacher_id: Uuid,
    /// Enrollment cap.
    pub max_students: i32,
}

/// Input for updating a course.
#[derive(Debug, Clone, Default)]
pub struct UpdateCourseInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New credit hours.
    pub credits: Option<i32>,
    /// New teacher.
    pub teacher_id: Option<Uuid>,
    /// New enrollment cap.
    pub max_students: Option<i32>,
    /// New active status.
    pub is_active: Option<bool>,
}

/// Filter for listing courses.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Restrict to one teacher's courses.
    pub teacher_id: Option<Uuid>,
    /// Restrict to active or inactive courses.
    pub is_active: Option<bool>,
}

/// Course repository for CRUD and enrollment operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct CourseRepository {
    db: DatabaseConnection,
}

impl CourseRepository {
    /// Creates a new course repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new course.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is already taken or the insert fails.
    pub async fn create(&self, input: CreateCourseInput) -> Result<courses::Model, CourseError> {
        let existing = courses::Entity::find()
            .filter(courses::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(CourseError::DuplicateCode(input.code));
        }

        let now = chrono::Utc::now().into();
        let course = courses::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            credits: Set(input.credits),
            teacher_id: Set(input.teacher_id),
            max_students: Set(input.max_students),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(course.insert(&self.db).await?)
    }

    /// Gets a course by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the course is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<courses::Model, CourseError> {
        courses::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CourseError::NotFound(id))
    }

    /// Lists courses matching a filter, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: CourseFilter,
        page: PageRequest,
    ) -> Result<PageResponse<courses::Model>, CourseError> {
        let mut query = courses::Entity::find();

        if let Some(teacher_id) = filter.teacher_id {
            query = query.filter(courses::Column::TeacherId.eq(teacher_id));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(courses::Column::IsActive.eq(is_active));
        }

        let paginator = query
            .order_by_asc(courses::Column::Code)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(u64::from(page.page.saturating_sub(1))).await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Updates a course.
    ///
    /// # Errors
    ///
    /// Returns an error if the course is not found or the update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateCourseInput,
    ) -> Result<courses::Model, CourseError> {
        let course = self.get(id).await?;

        let mut active: courses::ActiveModel = course.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(credits) = input.credits {
            active.credits = Set(credits);
        }
        if let Some(teacher_id) = input.teacher_id {
            active.teacher_id = Set(teacher_id);
        }
        if let Some(max_students) = input.max_students {
            active.max_students = Set(max_students);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a course.
    ///
    /// # Errors
    ///
    /// Returns an error if the course is not found or the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), CourseError> {
        let result = courses::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(CourseError::NotFound(id));
        }

        Ok(())
    }

    /// Enrolls a student in a course.
    ///
    /// The active-enrollment count is checked against the course's
    /// `max_students` cap before inserting.
    ///
    /// # Errors
    ///
    /// Returns an error if the course is missing, full, the student is
    /// already enrolled, or the insert fails.
    pub async fn enroll(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<enrollments::Model, CourseError> {
        let course = self.get(course_id).await?;

        let existing = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::CourseId.eq(course_id))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(CourseError::AlreadyEnrolled {
                student_id,
                course_id,
            });
        }

        let active_count = enrollments::Entity::find()
            .filter(enrollments::Column::CourseId.eq(course_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Active))
            .count(&self.db)
            .await?;

        if active_count >= u64::try_from(course.max_students).unwrap_or(0) {
            return Err(CourseError::CourseFull(course_id));
        }

        let now = chrono::Utc::now().into();
        let enrollment = enrollments::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(student_id),
            course_id: Set(course_id),
            status: Set(EnrollmentStatus::Active),
            enrolled_at: Set(now),
            updated_at: Set(now),
        };

        Ok(enrollment.insert(&self.db).await?)
    }

    /// Updates an enrollment's status (drop or complete).
    ///
    /// # Errors
    ///
    /// Returns an error if the enrollment is not found or the update fails.
    pub async fn update_enrollment_status(
        &self,
        enrollment_id: Uuid,
        status: EnrollmentStatus,
    ) -> Result<enrollments::Model, CourseError> {
        let enrollment = enrollments::Entity::find_by_id(enrollment_id)
            .one(&self.db)
            .await?
            .ok_or(CourseError::EnrollmentNotFound(enrollment_id))?;

        let mut active: enrollments::ActiveModel = enrollment.into();
        active.status = Set(status);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Lists a course's enrollments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the course is not found or the query fails.
    pub async fn list_enrollments(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<enrollments::Model>, CourseError> {
        self.get(course_id).await?;

        Ok(enrollments::Entity::find()
            .filter(enrollments::Column::CourseId.eq(course_id))
            .order_by_desc(enrollments::Column::EnrolledAt)
            .all(&self.db)
            .await?)
    }

    /// Lists one student's enrollments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn student_enrollments(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<enrollments::Model>, CourseError> {
        Ok(enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .order_by_desc(enrollments::Column::EnrolledAt)
            .all(&self.db)
            .await?)
    }
}

#[cfg(all(test, feature = "mock"))]
#[path = "course_tests.rs"]
mod tests;
