//! Subject repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use acadia_shared::types::{PageRequest, PageResponse};

use crate::entities::{sea_orm_active_enums::InstitutionType, subjects};

/// Error types for subject operations.
#[derive(Debug, thiserror::Error)]
pub enum SubjectError {
    /// Subject not found.
    #[error("Subject not found: {0}")]
    NotFound(Uuid),

    /// Subject code already exists.
    #[error("Subject code already exists: {0}")]
    DuplicateCode(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a subject.
#[derive(Debug, Clone)]
pub struct CreateSubjectInput {
    /// Subject name.
    pub name: String,
    /// Unique subject code (e.g. MATH101).
    pub code: String,
    /// Optional description.
    pub description: Option<String>,
    /// Credit hours.
    pub credits: i32,
    /// School or college.
    pub institution_type: InstitutionType,
    /// Class level the subject is taught at.
    pub class_level: Option<i32>,
    /// Department offering the subject.
    pub department: Option<String>,
}

/// Input for updating a subject.
#[derive(Debug, Clone, Default)]
pub struct UpdateSubjectInput {
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<Option<String>>,
    /// New credit hours.
    pub credits: Option<i32>,
    /// New active status.
    pub is_active: Option<bool>,
}

/// Filter for listing subjects.
#[derive(Debug, Clone, Default)]
pub struct SubjectFilter {
    /// Restrict to one institution type.
    pub institution_type: Option<InstitutionType>,
    /// Restrict to one class level.
    pub class_level: Option<i32>,
    /// Restrict to one department.
    pub department: Option<String>,
    /// Restrict to active or inactive subjects.
    pub is_active: Option<bool>,
}

/// Subject repository for CRUD operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct SubjectRepository {
    db: DatabaseConnection,
}

impl SubjectRepository {
    /// Creates a new subject repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is already taken or the insert fails.
    pub async fn create(&self, input: CreateSubjectInput) -> Result<subjects::Model, SubjectError> {
        let existing = subjects::Entity::find()
            .filter(subjects::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;

        if existing.is_some() {
            return Err(SubjectError::DuplicateCode(input.code));
        }

        let now = chrono::Utc::now().into();
        let subject = subjects::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            code: Set(input.code),
            description: Set(input.description),
            credits: Set(input.credits),
            institution_type: Set(input.institution_type),
            class_level: Set(input.class_level),
            department: Set(input.department),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(subject.insert(&self.db).await?)
    }

    /// Gets a subject by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not found or the query fails.
    pub async fn get(&self, id: Uuid) -> Result<subjects::Model, SubjectError> {
        subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(SubjectError::NotFound(id))
    }

    /// Lists subjects matching a filter, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: SubjectFilter,
        page: PageRequest,
    ) -> Result<PageResponse<subjects::Model>, SubjectError> {
        let mut query = subjects::Entity::find();

        if let Some(institution_type) = filter.institution_type {
            query = query.filter(subjects::Column::InstitutionType.eq(institution_type));
        }
        if let Some(class_level) = filter.class_level {
            query = query.filter(subjects::Column::ClassLevel.eq(class_level));
        }
        if let Some(department) = filter.department {
            query = query.filter(subjects::Column::Department.eq(department));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(subjects::Column::IsActive.eq(is_active));
        }

        let paginator = query
            .order_by_asc(subjects::Column::Code)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(u64::from(page.page.saturating_sub(1))).await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Updates a subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not found or the update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateSubjectInput,
    ) -> Result<subjects::Model, SubjectError> {
        let subject = self.get(id).await?;

        let mut active: subjects::ActiveModel = subject.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(credits) = input.credits {
            active.credits = Set(credits);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes a subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is not found or the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), SubjectError> {
        let result = subjects::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(SubjectError::NotFound(id));
        }

        Ok(())
    }
}
