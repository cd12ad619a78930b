//! Schema analysis - detects union groups, infers discriminants, and finds
//! every reference site.
//!
//! The three passes run in order over one document: `detect_unions`,
//! `infer_discriminants`, `scan_references`. All object iteration follows
//! declared textual order (serde_json `preserve_order`), so "first candidate
//! wins" decisions are deterministic across runs.

use serde_json::{Map, Value};

use crate::error::AnalyzeError;
use crate::names::{kind_variant_name, pascal_case};
use crate::types::{json_type_name, AnalysisResult, Cardinality, ReferenceSite, UnionGroup};

/// Reference prefix for definition-local `$ref` fragments.
const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Sibling keys that do not disqualify an `anyOf` definition from being a
/// union group. Anything structural (`properties`, `type`, `allOf`, ...)
/// marks the definition as a composite instead.
const ANNOTATION_KEYS: &[&str] = &["title", "description", "$comment", "examples", "default"];

/// Conventional discriminant field used when no declared literal validates.
const FALLBACK_DISCRIMINANT: &str = "type";

/// Analyze a schema document.
///
/// Runs union detection, discriminant inference, and reference scanning, and
/// returns the combined immutable result.
///
/// # Errors
///
/// Returns `AnalyzeError::InvalidSchema` if the document root is not an
/// object, or `AnalyzeError::MissingDefinitions` if it has no `definitions`
/// section.
pub fn analyze(schema: &Value) -> Result<AnalysisResult, AnalyzeError> {
    let root = schema.as_object().ok_or_else(|| AnalyzeError::InvalidSchema {
        message: format!("document root is {}, not an object", json_type_name(schema)),
    })?;

    let definitions = root
        .get("definitions")
        .and_then(Value::as_object)
        .ok_or(AnalyzeError::MissingDefinitions)?;

    let mut unions = detect_unions(definitions);
    infer_discriminants(definitions, &mut unions);

    let root_name = root_type_name(root);
    let sites = scan_references(root, definitions, &unions, &root_name);

    Ok(AnalysisResult {
        root_name,
        unions,
        sites,
    })
}

/// Rust type name for the document's root struct: PascalCase of the schema
/// `title`, falling back to `Root`.
fn root_type_name(root: &Map<String, Value>) -> String {
    root.get("title")
        .and_then(Value::as_str)
        .map(pascal_case)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Root".to_string())
}

/// Extract the definition name from a `#/definitions/<Name>` fragment.
///
/// Returns `None` for any other reference form, including nested fragments.
fn ref_name(reference: &str) -> Option<&str> {
    let name = reference.strip_prefix(DEFINITIONS_PREFIX)?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(name)
}

// --- Union detection ---

/// Find every definition whose body is exactly a list of reference
/// alternatives. A single non-reference alternative disqualifies the whole
/// definition; there is no partial adoption.
pub fn detect_unions(definitions: &Map<String, Value>) -> Vec<UnionGroup> {
    let mut unions = Vec::new();

    'defs: for (name, def) in definitions {
        let Some(def) = def.as_object() else {
            continue;
        };
        let Some(any_of) = def.get("anyOf").and_then(Value::as_array) else {
            continue;
        };
        if any_of.is_empty() {
            continue;
        }
        // Structural siblings mean this is a composite, not a plain union.
        if def
            .keys()
            .any(|key| key != "anyOf" && !ANNOTATION_KEYS.contains(&key.as_str()))
        {
            continue;
        }

        let mut variant_names = Vec::with_capacity(any_of.len());
        for alternative in any_of {
            let Some(target) = alternative
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(ref_name)
            else {
                continue 'defs;
            };
            variant_names.push(target.to_string());
        }

        // The variant list must be a set in declaration order.
        if has_duplicates(variant_names.iter()) {
            continue;
        }

        unions.push(UnionGroup {
            name: name.clone(),
            variant_names,
            discriminant_field: None,
            discriminant_values: Vec::new(),
        });
    }

    unions
}

fn has_duplicates<'a>(items: impl Iterator<Item = &'a String>) -> bool {
    let mut seen = std::collections::HashSet::new();
    for item in items {
        if !seen.insert(item.as_str()) {
            return true;
        }
    }
    false
}

// --- Discriminant inference ---

/// Infer a discriminant field and per-variant values for each union group.
///
/// Candidates are taken from the first variant's properties in declared
/// order; the first property that validates across every variant wins.
/// Groups where nothing validates keep `discriminant_field: None` and are
/// dispatched by trial decoding downstream.
pub fn infer_discriminants(definitions: &Map<String, Value>, unions: &mut [UnionGroup]) {
    for union in unions {
        let Some(first_props) = union
            .variant_names
            .first()
            .and_then(|name| variant_properties(definitions, name))
        else {
            continue;
        };

        // Phase 1: properties with a declared string literal.
        let mut found = false;
        for (prop_name, prop_schema) in first_props {
            if literal_string_value(prop_schema).is_none() {
                continue;
            }
            if let Some(values) = collect_literal_values(definitions, union, prop_name) {
                union.discriminant_field = Some(prop_name.clone());
                union.discriminant_values = values;
                found = true;
                break;
            }
        }
        if found {
            continue;
        }

        // Phase 2: conventional "type" field declared as an unconstrained
        // string on every variant; values come from the variant names.
        if let Some(values) = collect_fallback_values(definitions, union) {
            union.discriminant_field = Some(FALLBACK_DISCRIMINANT.to_string());
            union.discriminant_values = values;
        }
    }
}

fn variant_properties<'a>(
    definitions: &'a Map<String, Value>,
    variant: &str,
) -> Option<&'a Map<String, Value>> {
    definitions
        .get(variant)?
        .get("properties")
        .and_then(Value::as_object)
}

/// The string literal a property schema pins its value to, if any: a
/// single-element string `enum` or a string `const`.
fn literal_string_value(prop: &Value) -> Option<&str> {
    if let Some(enum_values) = prop.get("enum").and_then(Value::as_array) {
        if let [Value::String(only)] = enum_values.as_slice() {
            return Some(only);
        }
        return None;
    }
    prop.get("const").and_then(Value::as_str)
}

/// Collect `prop_name`'s literal value from every variant. Returns `None` if
/// any variant lacks a string literal there, or if the values collide
/// (directly or after identifier sanitization).
fn collect_literal_values(
    definitions: &Map<String, Value>,
    union: &UnionGroup,
    prop_name: &str,
) -> Option<Vec<(String, String)>> {
    let mut values = Vec::with_capacity(union.variant_names.len());
    for variant in &union.variant_names {
        let literal = variant_properties(definitions, variant)?
            .get(prop_name)
            .and_then(literal_string_value)?;
        values.push((variant.clone(), literal.to_string()));
    }
    distinct_values(&values).then_some(values)
}

/// Fallback values for the conventional `type` field: every variant must
/// declare it as a plain string with no literal constraint, and values are
/// the case-folded variant names.
fn collect_fallback_values(
    definitions: &Map<String, Value>,
    union: &UnionGroup,
) -> Option<Vec<(String, String)>> {
    let mut values = Vec::with_capacity(union.variant_names.len());
    for variant in &union.variant_names {
        let prop = variant_properties(definitions, variant)?.get(FALLBACK_DISCRIMINANT)?;
        let is_plain_string = prop.get("type").and_then(Value::as_str) == Some("string")
            && prop.get("enum").is_none()
            && prop.get("const").is_none();
        if !is_plain_string {
            return None;
        }
        values.push((variant.clone(), variant.to_lowercase()));
    }
    distinct_values(&values).then_some(values)
}

/// Discriminant values must stay distinct both verbatim and after
/// sanitization, since they become enum variant identifiers.
fn distinct_values(values: &[(String, String)]) -> bool {
    let mut raw = std::collections::HashSet::new();
    let mut sanitized = std::collections::HashSet::new();
    for (_, value) in values {
        if !raw.insert(value.as_str()) || !sanitized.insert(kind_variant_name(value)) {
            return false;
        }
    }
    true
}

// --- Reference scanning ---

/// Find every field whose type is a union group: in definition owners, in the
/// document's top-level properties, and exactly one level of nested-object
/// properties beneath them. Deeper nesting is out of scope by design.
pub fn scan_references(
    root: &Map<String, Value>,
    definitions: &Map<String, Value>,
    unions: &[UnionGroup],
    root_name: &str,
) -> Vec<ReferenceSite> {
    let mut sites = Vec::new();
    let mut seen = std::collections::HashSet::new();

    // Definition owners, in document order.
    for (def_name, def) in definitions {
        let Some(def) = def.as_object() else {
            continue;
        };
        let Some(properties) = def.get("properties").and_then(Value::as_object) else {
            continue;
        };
        let required = required_set(def);

        for (prop_name, prop) in properties {
            if let Some((union_name, cardinality)) = classify_property(prop, unions) {
                push_site(
                    &mut sites,
                    &mut seen,
                    ReferenceSite {
                        owner: def_name.clone(),
                        field: prop_name.clone(),
                        union_group: union_name,
                        cardinality,
                        required: required.contains(&prop_name.as_str()),
                    },
                );
            }
        }
    }

    // Top-level properties and one level of nested objects. Required-ness is
    // unconditionally asserted here - a documented simplification.
    if let Some(top_props) = root.get("properties").and_then(Value::as_object) {
        for (prop_name, prop) in top_props {
            if let Some((union_name, cardinality)) = classify_property(prop, unions) {
                push_site(
                    &mut sites,
                    &mut seen,
                    ReferenceSite {
                        owner: root_name.to_string(),
                        field: prop_name.clone(),
                        union_group: union_name,
                        cardinality,
                        required: true,
                    },
                );
                continue;
            }

            let Some(nested_props) = prop.get("properties").and_then(Value::as_object) else {
                continue;
            };
            let nested_owner = format!("{}{}", root_name, pascal_case(prop_name));
            for (nested_name, nested_prop) in nested_props {
                if let Some((union_name, cardinality)) = classify_property(nested_prop, unions) {
                    push_site(
                        &mut sites,
                        &mut seen,
                        ReferenceSite {
                            owner: nested_owner.clone(),
                            field: nested_name.clone(),
                            union_group: union_name,
                            cardinality,
                            required: true,
                        },
                    );
                }
            }
        }
    }

    sites
}

fn required_set(def: &Map<String, Value>) -> std::collections::HashSet<&str> {
    def.get("required")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Classify a property value against the union set.
///
/// Checks direct `$ref`, then `items` (nested array before plain array),
/// then `additionalProperties`. Returns `None` when nothing points at a
/// union group.
fn classify_property(prop: &Value, unions: &[UnionGroup]) -> Option<(String, Cardinality)> {
    let prop = prop.as_object()?;

    if let Some(name) = union_ref(prop.get("$ref"), unions) {
        return Some((name, Cardinality::Single));
    }

    if let Some(items) = prop.get("items").and_then(Value::as_object) {
        if let Some(inner) = items.get("items").and_then(Value::as_object) {
            if let Some(name) = union_ref(inner.get("$ref"), unions) {
                return Some((name, Cardinality::NestedList));
            }
        } else if let Some(name) = union_ref(items.get("$ref"), unions) {
            return Some((name, Cardinality::List));
        }
    }

    if let Some(additional) = prop.get("additionalProperties").and_then(Value::as_object) {
        if let Some(name) = union_ref(additional.get("$ref"), unions) {
            return Some((name, Cardinality::MapOfSingle));
        }
    }

    None
}

fn union_ref(reference: Option<&Value>, unions: &[UnionGroup]) -> Option<String> {
    let name = reference.and_then(Value::as_str).and_then(ref_name)?;
    unions
        .iter()
        .any(|u| u.name == name)
        .then(|| name.to_string())
}

fn push_site(
    sites: &mut Vec<ReferenceSite>,
    seen: &mut std::collections::HashSet<(String, String)>,
    site: ReferenceSite,
) {
    if seen.insert((site.owner.clone(), site.field.clone())) {
        sites.push(site);
    }
}
