//! `SeaORM` Entity for grades table.
//!
//! `percentage` and `letter_grade` are derived columns. They are only ever
//! written in the same statement as the marks they derive from.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AssessmentKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub teacher_id: Uuid,
    pub subject_id: Uuid,
    pub assessment_name: String,
    pub assessment_kind: AssessmentKind,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub marks_obtained: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub total_marks: Decimal,
    #[sea_orm(column_type = "Decimal(Some((8, 4)))")]
    pub percentage: Decimal,
    pub letter_grade: String,
    pub academic_year: String,
    pub semester: Option<String>,
    pub term: Option<String>,
    pub remarks: Option<String>,
    pub is_published: bool,
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
