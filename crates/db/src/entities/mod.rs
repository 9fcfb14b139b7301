//! `SeaORM` entity definitions.

pub mod assignment_students;
pub mod assignments;
pub mod attendance;
pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod payments;
pub mod report_cards;
pub mod sea_orm_active_enums;
pub mod subjects;
pub mod users;
