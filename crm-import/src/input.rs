//! Loading the JSON export
//!
//! The top-level value must be an array. Elements that do not fit the
//! record shape degrade to an empty record (and are later skipped for
//! lacking a `lead_id`) instead of failing the whole document.

use crate::error::{ImportError, Result};
use crate::models::RawContact;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Read and parse the export; `limit` keeps only the first N records
pub fn load_contacts(path: &Path, limit: Option<usize>) -> Result<Vec<RawContact>> {
    if !path.is_file() {
        return Err(ImportError::InputNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let contacts = parse_contacts(&content, limit)?;
    debug!("Loaded {} records from {}", contacts.len(), path.display());
    Ok(contacts)
}

pub fn parse_contacts(content: &str, limit: Option<usize>) -> Result<Vec<RawContact>> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    let Value::Array(elements) = document else {
        return Err(ImportError::InvalidJson(
            "top-level value must be an array of contact records".to_string(),
        ));
    };

    let take = limit.unwrap_or(elements.len());
    Ok(elements
        .into_iter()
        .take(take)
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value(element).unwrap_or_else(|e| {
                warn!(index, error = %e, "Record does not match the contact shape");
                RawContact::default()
            })
        })
        .collect())
}
