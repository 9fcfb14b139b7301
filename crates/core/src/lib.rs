//! Core business logic for Acadia.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `grading` - The grading scale and per-assessment mark derivation
//! - `report_card` - Consolidated term report derivation
//! - `summary` - Student and cohort aggregation
//! - `attendance` - Attendance rate calculation
//! - `payment` - Payment status machine
//! - `auth` - Password hashing

pub mod attendance;
pub mod auth;
pub mod grading;
pub mod payment;
pub mod report_card;
pub mod summary;
