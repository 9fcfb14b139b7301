//! `SeaORM` Entity for report_cards table.
//!
//! Carries two independent derived groups: the marks group
//! (`percentage`, `letter_grade`, `grade_points`) and the attendance group
//! (`attendance_percentage`). Each is recomputed only with its own base
//! columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "report_cards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub teacher_id: Uuid,
    pub subject_id: Uuid,
    pub academic_year: String,
    pub semester: Option<String>,
    pub term: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub marks_obtained: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub total_marks: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 4)))")]
    pub percentage: Decimal,
    pub letter_grade: String,
    #[sea_orm(column_type = "Decimal(Some((3, 1)))")]
    pub grade_points: Decimal,
    pub classes_attended: i32,
    pub total_classes: i32,
    #[sea_orm(column_type = "Decimal(Some((8, 4)))")]
    pub attendance_percentage: Decimal,
    pub teacher_remarks: Option<String>,
    pub strengths: Option<String>,
    pub areas_for_improvement: Option<String>,
    pub is_published: bool,
    pub is_final: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subjects,
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
