//! Attendance rate calculation.

pub mod service;

pub use service::attendance_rate;
