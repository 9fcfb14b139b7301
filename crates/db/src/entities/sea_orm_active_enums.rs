//! Postgres enum mappings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Student account.
    #[sea_orm(string_value = "student")]
    Student,
    /// Teacher account.
    #[sea_orm(string_value = "teacher")]
    Teacher,
    /// Administrator account.
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl UserRole {
    /// Returns the snake_case name used in JWT claims and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }
}

/// Kind of institution a user or subject belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "institution_type")]
#[serde(rename_all = "snake_case")]
pub enum InstitutionType {
    /// School (cohorts keyed by class level).
    #[sea_orm(string_value = "school")]
    School,
    /// College (cohorts keyed by department).
    #[sea_orm(string_value = "college")]
    College,
}

/// Assessment category of a graded record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "assessment_kind")]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    /// In-class test.
    #[sea_orm(string_value = "test")]
    Test,
    /// Take-home assignment.
    #[sea_orm(string_value = "assignment")]
    Assignment,
    /// Short quiz.
    #[sea_orm(string_value = "quiz")]
    Quiz,
    /// Term or final exam.
    #[sea_orm(string_value = "exam")]
    Exam,
    /// Long-running project.
    #[sea_orm(string_value = "project")]
    Project,
}

/// Attendance status of one student for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Not yet marked.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Marked present.
    #[sea_orm(string_value = "present")]
    Present,
    /// Marked absent.
    #[sea_orm(string_value = "absent")]
    Absent,
}

/// Status of a student's enrollment in a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "enrollment_status")]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    /// Currently enrolled.
    #[sea_orm(string_value = "active")]
    Active,
    /// Withdrew before completion.
    #[sea_orm(string_value = "dropped")]
    Dropped,
    /// Finished the course.
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Category of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "assignment_kind")]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    /// Daily homework.
    #[sea_orm(string_value = "homework")]
    Homework,
    /// Longer-form assignment.
    #[sea_orm(string_value = "assignment")]
    Assignment,
}

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, awaiting settlement.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Settled successfully.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Settlement failed.
    #[sea_orm(string_value = "failed")]
    Failed,
    /// Refunded after settlement.
    #[sea_orm(string_value = "refunded")]
    Refunded,
}
