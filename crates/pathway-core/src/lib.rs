//! pathway-core
//!
//! Pure domain types and storage key conventions.
//! The shared vocabulary of the Pathway system. No AWS SDK dependency.

pub mod catalog;
pub mod directory;
pub mod error;
pub mod models;
pub mod s3_keys;
