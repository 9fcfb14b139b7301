//! Assignment repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{assignment_students, assignments, sea_orm_active_enums::AssignmentKind};

/// Error types for assignment operations.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentError {
    /// Assignment not found.
    #[error("Assignment not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an assignment.
#[derive(Debug, Clone)]
pub struct CreateAssignmentInput {
    /// Assignment title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Homework or graded assignment.
    pub kind: Option<AssignmentKind>,
    /// Teacher issuing the assignment.
    pub teacher_id: Uuid,
    /// Due date.
    pub due_date: chrono::NaiveDate,
    /// Optional due time on the due date.
    pub due_time: Option<chrono::NaiveTime>,
    /// Students the assignment is issued to.
    pub student_ids: Vec<Uuid>,
}

/// An assignment together with the students it was issued to.
#[derive(Debug, Clone)]
pub struct AssignmentWithStudents {
    /// The assignment record.
    pub assignment: assignments::Model,
    /// IDs of the assigned students.
    pub student_ids: Vec<Uuid>,
}

/// Assignment repository for CRUD operations.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct AssignmentRepository {
    db: DatabaseConnection,
}

impl AssignmentRepository {
    /// Creates a new assignment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an assignment and its student links in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the database transaction fails.
    pub async fn create(
        &self,
        input: CreateAssignmentInput,
    ) -> Result<AssignmentWithStudents, AssignmentError> {
        let txn = self.db.begin().await?;

        let now = chrono::Utc::now().into();
        let assignment = assignments::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            description: Set(input.description),
            kind: Set(input.kind),
            teacher_id: Set(input.teacher_id),
            due_date: Set(input.due_date),
            due_time: Set(input.due_time),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let assignment = assignment.insert(&txn).await?;

        for student_id in &input.student_ids {
            let link = assignment_students::ActiveModel {
                assignment_id: Set(assignment.id),
                student_id: Set(*student_id),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(AssignmentWithStudents {
            assignment,
            student_ids: input.student_ids,
        })
    }

    /// Gets an assignment with its assigned student IDs.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment is not found or a query fails.
    pub async fn get(&self, id: Uuid) -> Result<AssignmentWithStudents, AssignmentError> {
        let assignment = assignments::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AssignmentError::NotFound(id))?;

        let student_ids = assignment_students::Entity::find()
            .filter(assignment_students::Column::AssignmentId.eq(id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.student_id)
            .collect();

        Ok(AssignmentWithStudents {
            assignment,
            student_ids,
        })
    }

    /// Lists a teacher's assignments, soonest due first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_by_teacher(
        &self,
        teacher_id: Uuid,
    ) -> Result<Vec<assignments::Model>, AssignmentError> {
        Ok(assignments::Entity::find()
            .filter(assignments::Column::TeacherId.eq(teacher_id))
            .order_by_asc(assignments::Column::DueDate)
            .all(&self.db)
            .await?)
    }

    /// Lists assignments issued to one student, soonest due first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<assignments::Model>, AssignmentError> {
        let assignment_ids: Vec<Uuid> = assignment_students::Entity::find()
            .filter(assignment_students::Column::StudentId.eq(student_id))
            .select_only()
            .column(assignment_students::Column::AssignmentId)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(assignments::Entity::find()
            .filter(assignments::Column::Id.is_in(assignment_ids))
            .order_by_asc(assignments::Column::DueDate)
            .all(&self.db)
            .await?)
    }

    /// Deletes an assignment and its student links in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment is not found or the delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<(), AssignmentError> {
        let txn = self.db.begin().await?;

        assignment_students::Entity::delete_many()
            .filter(assignment_students::Column::AssignmentId.eq(id))
            .exec(&txn)
            .await?;

        let result = assignments::Entity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            return Err(AssignmentError::NotFound(id));
        }

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(all(test, feature = "mock"))]
#[path = "assignment_tests.rs"]
mod tests;
