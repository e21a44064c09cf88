//! Core business logic for Khata.
//!
//! This crate has no web or database dependencies. Roles, credential rules,
//! the balance settlement engine and document validation live here.
//!
//! # Modules
//!
//! - `auth` - Member roles, password hashing, login identifiers
//! - `settlement` - Balance effects of cash and bank settled documents
//! - `validation` - Input rules shared by every document type

pub mod auth;
pub mod settlement;
pub mod validation;
