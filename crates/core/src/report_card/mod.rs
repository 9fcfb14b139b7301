//! Consolidated term report derivation.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportCardError;
pub use service::ReportCardService;
pub use types::{AttendancePatch, ReportDerivation};
