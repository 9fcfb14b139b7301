//! Authentication logic: password hashing.

pub mod password;

pub use password::{PasswordError, hash_password, verify_password};
