//! Common types used across the application.

pub mod id;
pub mod pagination;
pub mod patch;

pub use id::*;
pub use pagination::{PageRequest, PageResponse};
pub use patch::Patch;
