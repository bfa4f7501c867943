//! # CRM Common Library
//!
//! Shared code for the CRM import tools including:
//! - Error types
//! - Database and logging configuration resolution
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
