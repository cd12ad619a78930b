//! Error types for schema analysis and code emission.

use std::path::PathBuf;
use thiserror::Error;

/// Errors during schema loading and analysis.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    // Schema-structure errors (exit code 2)
    #[error("schema has no definitions section")]
    MissingDefinitions,

    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },
}

impl AnalyzeError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalyzeError::FileNotFound { .. } | AnalyzeError::ReadError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors during code emission.
///
/// An `UnknownUnionGroup` is a violated analysis invariant; the others mean
/// the base-model source does not match the schema. All are fatal; emission
/// never leaves a partial artifact set behind.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("reference site {owner}.{field} names unknown union group {union}")]
    UnknownUnionGroup {
        owner: String,
        field: String,
        union: String,
    },

    #[error("base model has no struct {name}")]
    MissingStruct { name: String },

    #[error("struct {owner} has no field for schema property \"{field}\"")]
    MissingField { owner: String, field: String },

    #[error("malformed base model: {message}")]
    MalformedModel { message: String },
}

impl EmitError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}
