//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Derivation and lifecycle rules live in `acadia_core`;
//! repositories apply them and persist the results.

pub mod assignment;
pub mod attendance;
pub mod course;
pub mod grade;
pub mod payment;
pub mod report_card;
pub mod subject;
pub mod user;

pub use assignment::{
    AssignmentError, AssignmentRepository, AssignmentWithStudents, CreateAssignmentInput,
};
pub use attendance::{
    AttendanceError, AttendanceFilter, AttendanceRepository, RecordAttendanceInput,
};
pub use course::{
    CourseError, CourseFilter, CourseRepository, CreateCourseInput, UpdateCourseInput,
};
pub use grade::{CreateGradeInput, GradeError, GradeFilter, GradeRepository, UpdateGradeInput};
pub use payment::{CreatePaymentInput, PaymentError, PaymentFilter, PaymentRepository};
pub use report_card::{
    CohortSelector, CreateReportCardInput, ReportCardError, ReportCardFilter,
    ReportCardRepository, UpdateReportCardInput,
};
pub use subject::{
    CreateSubjectInput, SubjectError, SubjectFilter, SubjectRepository, UpdateSubjectInput,
};
pub use user::{CreateUserInput, UserFilter, UserRepository};
