//! Schema loading from files and strings.
//!
//! Parsing uses serde_json's `preserve_order` map, so every object in the
//! loaded document iterates in declared textual order. Downstream passes
//! rely on this for deterministic discriminant selection.

use std::path::Path;

use serde_json::Value;

use crate::error::AnalyzeError;

/// Load a schema from a file path.
///
/// # Errors
///
/// Returns `AnalyzeError::FileNotFound` if the file doesn't exist,
/// or `AnalyzeError::InvalidJson` if the file isn't valid JSON.
pub fn load_schema(path: &Path) -> Result<Value, AnalyzeError> {
    if !path.exists() {
        return Err(AnalyzeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| AnalyzeError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| AnalyzeError::InvalidJson { source })
}

/// Load a schema from a JSON string.
///
/// # Errors
///
/// Returns `AnalyzeError::InvalidJson` if the string isn't valid JSON.
pub fn load_schema_str(content: &str) -> Result<Value, AnalyzeError> {
    serde_json::from_str(content).map_err(|source| AnalyzeError::InvalidJson { source })
}
