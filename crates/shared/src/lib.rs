//! Shared types and configuration for Acadia.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Presence-tagged patch fields for update payloads
//! - JWT claims and token handling
//! - Configuration management

pub mod auth;
pub mod config;
pub mod jwt;
pub mod types;

pub use auth::{Claims, LoginRequest, LoginResponse, RefreshRequest, RegisterRequest, UserInfo};
pub use config::AppConfig;
pub use jwt::{JwtConfig, JwtError, JwtService};
