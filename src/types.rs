//! Core types describing the result of schema analysis.

use serde::Serialize;
use serde_json::Value;

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A definition whose body is a closed `anyOf` list of `$ref` alternatives.
///
/// Invariants: `variant_names` is non-empty and duplicate-free;
/// `discriminant_values` is present iff `discriminant_field` is, holds one
/// entry per variant in variant order, and its values are mutually distinct.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionGroup {
    /// Definition name, e.g. `Shape`.
    pub name: String,
    /// Variant definition names, in alternative-declaration order.
    pub variant_names: Vec<String>,
    /// Schema field that discriminates variants at runtime, if one validates.
    pub discriminant_field: Option<String>,
    /// `(variant name, literal value)` pairs, in variant order.
    pub discriminant_values: Vec<(String, String)>,
}

impl UnionGroup {
    /// The discriminant literal for a variant, if this group is discriminated.
    pub fn value_for(&self, variant: &str) -> Option<&str> {
        self.discriminant_values
            .iter()
            .find(|(name, _)| name == variant)
            .map(|(_, value)| value.as_str())
    }
}

/// How a reference site holds its union group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cardinality {
    /// Direct `$ref`.
    Single,
    /// `items.$ref`, an array of union values.
    List,
    /// `items.items.$ref`, an array of arrays of union values.
    NestedList,
    /// `additionalProperties.$ref`, a string-keyed map of union values.
    MapOfSingle,
}

/// A field whose declared type is a union group.
///
/// The owner is a schema definition, the document root, or a one-level-nested
/// object beneath the root's properties. `(owner, field)` pairs are unique
/// within one analysis, and `union_group` always names a detected group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceSite {
    /// Rust type name of the owning struct in the base model.
    pub owner: String,
    /// JSON field name within the owner.
    pub field: String,
    /// Name of the referenced union group.
    pub union_group: String,
    pub cardinality: Cardinality,
    pub required: bool,
}

/// The full analysis of one schema document.
///
/// Immutable once produced; the emitter is its only consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Rust type name of the document's root struct.
    pub root_name: String,
    /// Union groups, in document order.
    pub unions: Vec<UnionGroup>,
    /// Reference sites, in discovery order (definitions first, then the
    /// document root and its one-level-nested objects).
    pub sites: Vec<ReferenceSite>,
}

impl AnalysisResult {
    /// Look up a union group by name.
    pub fn union(&self, name: &str) -> Option<&UnionGroup> {
        self.unions.iter().find(|u| u.name == name)
    }
}
