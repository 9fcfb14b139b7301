//! Student and cohort aggregation over published records.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::SummaryError;
pub use service::SummaryService;
pub use types::{
    ClassSummary, CohortGradeRow, GradeSummary, PublishedGrade, ReportCardFigures,
    ReportCardSummary, StudentStanding,
};
