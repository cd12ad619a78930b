//! Discriminated-union analysis and code generation for JSON Schema models.
//!
//! `union-schema` reads a JSON Schema document whose `definitions` use
//! `anyOf`-of-`$ref` union groups, infers a discriminant field for each
//! group, locates every field that references one, and emits three Rust
//! source artifacts: typed union enums, decode dispatch with hand-written
//! `Deserialize` impls for the owning structs, and an enhanced copy of the
//! hand-written base model with union placeholders replaced by the enum
//! types. The generated code depends only on `serde` and `serde_json`.
//!
//! # Example
//!
//! ```
//! use union_schema::{analyze, load_schema_str};
//!
//! let schema = load_schema_str(r##"{
//!     "title": "Scene",
//!     "properties": {},
//!     "definitions": {
//!         "Shape": { "anyOf": [{ "$ref": "#/definitions/Circle" }] },
//!         "Circle": { "properties": { "type": { "const": "circle" } } }
//!     }
//! }"##)?;
//!
//! let analysis = analyze(&schema)?;
//! assert_eq!(analysis.root_name, "Scene");
//! assert_eq!(analysis.unions[0].discriminant_field.as_deref(), Some("type"));
//! # Ok::<(), union_schema::AnalyzeError>(())
//! ```

pub mod analyzer;
pub mod error;
pub mod generator;
pub mod loader;
pub mod model;
pub mod names;
pub mod types;

pub use analyzer::analyze;
pub use error::{AnalyzeError, EmitError};
pub use generator::{generate, GeneratedArtifacts, GENERATED_HEADER};
pub use loader::{load_schema, load_schema_str};
pub use model::{parse_model, ModelSource};
pub use types::{AnalysisResult, Cardinality, ReferenceSite, UnionGroup};
