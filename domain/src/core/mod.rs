//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: character-based clamping used for participant and engine output caps

pub mod error;
pub mod string;
