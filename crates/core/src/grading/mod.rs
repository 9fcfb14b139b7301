//! Grading scale and per-assessment mark derivation.

pub mod error;
pub mod scale;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::GradingError;
pub use scale::{GRADING_SCALE, GradeBand, PASS_MARK_PERCENT};
pub use service::GradingService;
pub use types::{LetterGrade, MarkDerivation, MarksPatch};
