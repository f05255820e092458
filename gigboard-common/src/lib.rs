//! # Gigboard Common Library
//!
//! Shared code for the gigboard booking directory:
//! - Database initialization and record models
//! - Error types
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
