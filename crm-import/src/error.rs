//! Run-aborting errors
//!
//! Per-row failures never surface here; they are counted in
//! [`ImportStats`](crate::stats::ImportStats) and the run continues.

use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid JSON input: {0}")]
    InvalidJson(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Common(#[from] crm_common::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;
