//! Shared errors, configuration and token handling for Khata.
//!
//! Everything here is used by more than one crate:
//! - `AppError`, the application-wide error with HTTP status mapping
//! - `AppConfig`, layered configuration
//! - `JwtService` and the `Claims` it signs
//! - typed ids and pagination types

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
