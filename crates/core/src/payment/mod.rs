//! Payment status machine.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::PaymentError;
pub use service::PaymentService;
pub use types::{PaymentStatus, PaymentTransition};
