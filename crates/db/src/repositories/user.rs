//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use acadia_shared::types::{PageRequest, PageResponse};

use crate::entities::{
    sea_orm_active_enums::{InstitutionType, UserRole},
    users,
};

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Display name.
    pub full_name: String,
    /// Unique login email.
    pub email: String,
    /// Argon2id hash of the password.
    pub password_hash: String,
    /// Account role.
    pub role: UserRole,
    /// School or college.
    pub institution_type: InstitutionType,
    /// Class level for school students (1-12).
    pub class_level: Option<i32>,
    /// Department for college students.
    pub department: Option<String>,
}

/// Filter for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Restrict to one role.
    pub role: Option<UserRole>,
    /// Restrict to one institution type.
    pub institution_type: Option<InstitutionType>,
    /// Restrict to active or inactive accounts.
    pub is_active: Option<bool>,
}

/// User repository for CRUD operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(input.full_name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            role: Set(input.role),
            institution_type: Set(input.institution_type),
            class_level: Set(input.class_level),
            department: Set(input.department),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await
    }

    /// Lists users matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: UserFilter,
        page: PageRequest,
    ) -> Result<PageResponse<users::Model>, DbErr> {
        let mut query = users::Entity::find();

        if let Some(role) = filter.role {
            query = query.filter(users::Column::Role.eq(role));
        }
        if let Some(institution_type) = filter.institution_type {
            query = query.filter(users::Column::InstitutionType.eq(institution_type));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(users::Column::IsActive.eq(is_active));
        }

        let paginator = query
            .order_by_desc(users::Column::CreatedAt)
            .paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let data = paginator.fetch_page(u64::from(page.page.saturating_sub(1))).await?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Sets the active flag on a user.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if no user has the given ID, or an
    /// error if the database update fails.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<users::Model, DbErr> {
        let user = users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {id}")))?;

        let mut active: users::ActiveModel = user.into();
        active.is_active = Set(is_active);
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await
    }

    /// IDs of active students belonging to a cohort.
    ///
    /// School cohorts are keyed by class level, college cohorts by
    /// department; the caller passes whichever key applies.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn cohort_student_ids(
        &self,
        institution_type: InstitutionType,
        class_level: Option<i32>,
        department: Option<&str>,
    ) -> Result<Vec<Uuid>, DbErr> {
        let mut query = users::Entity::find()
            .select_only()
            .column(users::Column::Id)
            .filter(users::Column::Role.eq(UserRole::Student))
            .filter(users::Column::InstitutionType.eq(institution_type))
            .filter(users::Column::IsActive.eq(true));

        if let Some(class_level) = class_level {
            query = query.filter(users::Column::ClassLevel.eq(class_level));
        }
        if let Some(department) = department {
            query = query.filter(users::Column::Department.eq(department));
        }

        query.into_tuple::<Uuid>().all(&self.db).await
    }
}
