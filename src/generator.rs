//! Code emission for the three generated artifacts.
//!
//! All three artifacts are emitted as strings and are expected to live in
//! one module alongside each other: the unions file declares the enums the
//! decode file implements, and the enhanced model references both. Emitted
//! code spells out every serde path in full, so the artifacts need no `use`
//! statements and depend only on `serde` and `serde_json`.

use crate::error::EmitError;
use crate::model::{rewrite_model, FieldDef, ModelSource, Retype, RewritePlan};
use crate::names::{field_ident, kind_variant_name};
use crate::types::{AnalysisResult, Cardinality, ReferenceSite, UnionGroup};

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by union-schema. DO NOT EDIT.\n";

/// The three generated files, ready to write to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedArtifacts {
    /// Enhanced base model (`model_enhanced.rs`).
    pub model: String,
    /// Union enums, aliases, and kind types (`model_unions.rs`).
    pub unions: String,
    /// Decode dispatch and owner deserializers (`model_decode.rs`).
    pub decode: String,
}

/// Emit all artifacts for one analysis against one base model.
///
/// # Errors
///
/// Returns `EmitError::UnknownUnionGroup` if a reference site names a union
/// the analysis does not contain, and `EmitError::MissingStruct` or
/// `EmitError::MissingField` if the base model is out of step with the
/// schema. Nothing is emitted partially.
pub fn generate(
    analysis: &AnalysisResult,
    model: &ModelSource,
) -> Result<GeneratedArtifacts, EmitError> {
    for site in &analysis.sites {
        if analysis.union(&site.union_group).is_none() {
            return Err(EmitError::UnknownUnionGroup {
                owner: site.owner.clone(),
                field: site.field.clone(),
                union: site.union_group.clone(),
            });
        }
    }

    Ok(GeneratedArtifacts {
        model: emit_enhanced(analysis, model)?,
        unions: emit_unions(analysis),
        decode: emit_decode(analysis, model)?,
    })
}

/// Rust type a reference site gets in the enhanced model.
fn site_type(site: &ReferenceSite) -> String {
    let base = match site.cardinality {
        Cardinality::Single => site.union_group.clone(),
        Cardinality::List => format!("{}List", site.union_group),
        Cardinality::NestedList => format!("Vec<{}List>", site.union_group),
        Cardinality::MapOfSingle => format!("{}Map", site.union_group),
    };
    if site.required {
        base
    } else {
        format!("Option<{}>", base)
    }
}

// --- Enhanced model ---

fn emit_enhanced(analysis: &AnalysisResult, model: &ModelSource) -> Result<String, EmitError> {
    let mut plan = RewritePlan::default();
    for union in &analysis.unions {
        plan.drop_aliases.insert(union.name.clone());
    }
    for site in &analysis.sites {
        plan.retypes.push(Retype {
            owner: site.owner.clone(),
            field: site.field.clone(),
            new_type: site_type(site),
        });
        plan.strip_deserialize.insert(site.owner.clone());
    }
    let body = rewrite_model(model, &plan)?;
    Ok(format!("{}\n{}", GENERATED_HEADER, body))
}

// --- Union enums ---

fn emit_unions(analysis: &AnalysisResult) -> String {
    let mut out = String::from(GENERATED_HEADER);
    for union in &analysis.unions {
        emit_union_sum(&mut out, union);
        if union.discriminant_field.is_some() {
            emit_union_kind(&mut out, union);
        }
    }
    out
}

fn emit_union_sum(out: &mut String, union: &UnionGroup) {
    let name = &union.name;

    out.push('\n');
    out.push_str(&format!("/// Closed sum over the `{}` alternatives.\n", name));
    out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
    out.push_str(&format!("pub enum {} {{\n", name));
    for variant in &union.variant_names {
        out.push_str(&format!("    {}({}),\n", variant, variant));
    }
    out.push_str("}\n");

    out.push('\n');
    out.push_str(&format!("pub type {}List = Vec<{}>;\n", name, name));
    out.push_str(&format!(
        "pub type {}Map = std::collections::BTreeMap<String, {}>;\n",
        name, name
    ));

    for variant in &union.variant_names {
        out.push('\n');
        out.push_str(&format!("impl From<{}> for {} {{\n", variant, name));
        out.push_str(&format!("    fn from(value: {}) -> Self {{\n", variant));
        out.push_str(&format!("        {}::{}(value)\n", name, variant));
        out.push_str("    }\n");
        out.push_str("}\n");
    }
}

fn emit_union_kind(out: &mut String, union: &UnionGroup) {
    let name = &union.name;
    let Some(field) = &union.discriminant_field else {
        return;
    };

    out.push('\n');
    out.push_str(&format!("/// Discriminant tags of `{}`.\n", name));
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n");
    out.push_str(&format!("pub enum {}Kind {{\n", name));
    for (_, value) in &union.discriminant_values {
        out.push_str(&format!("    {},\n", kind_variant_name(value)));
    }
    out.push_str("}\n");

    out.push('\n');
    out.push_str(&format!("impl {}Kind {{\n", name));
    out.push_str("    pub fn as_str(self) -> &'static str {\n");
    out.push_str("        match self {\n");
    for (_, value) in &union.discriminant_values {
        out.push_str(&format!(
            "            {}Kind::{} => {:?},\n",
            name,
            kind_variant_name(value),
            value
        ));
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push('\n');
    out.push_str("    pub fn from_tag(tag: &str) -> Option<Self> {\n");
    out.push_str("        match tag {\n");
    for (_, value) in &union.discriminant_values {
        out.push_str(&format!(
            "            {:?} => Some({}Kind::{}),\n",
            value,
            name,
            kind_variant_name(value)
        ));
    }
    out.push_str("            _ => None,\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    out.push('\n');
    out.push_str(&format!("impl {} {{\n", name));
    out.push_str(&format!(
        "    pub fn {}(&self) -> {}Kind {{\n",
        field_ident(field),
        name
    ));
    out.push_str("        match self {\n");
    for (variant, value) in &union.discriminant_values {
        out.push_str(&format!(
            "            {}::{}(_) => {}Kind::{},\n",
            name,
            variant,
            name,
            kind_variant_name(value)
        ));
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

// --- Decode dispatch ---

const DECODE_ERROR: &str = r#"
/// Errors produced when decoding union values from JSON.
#[derive(Debug)]
pub enum UnionDecodeError {
    InvalidDiscriminant { union: &'static str, value: String },
    NoVariantMatched { union: &'static str },
    Json(serde_json::Error),
}

impl std::fmt::Display for UnionDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnionDecodeError::InvalidDiscriminant { union, value } => {
                write!(f, "invalid {} discriminant value: {:?}", union, value)
            }
            UnionDecodeError::NoVariantMatched { union } => {
                write!(f, "no {} variant matched the payload", union)
            }
            UnionDecodeError::Json(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for UnionDecodeError {}

impl From<serde_json::Error> for UnionDecodeError {
    fn from(err: serde_json::Error) -> Self {
        UnionDecodeError::Json(err)
    }
}
"#;

fn emit_decode(analysis: &AnalysisResult, model: &ModelSource) -> Result<String, EmitError> {
    let mut out = String::from(GENERATED_HEADER);
    out.push_str(DECODE_ERROR);

    for union in &analysis.unions {
        if union.discriminant_field.is_some() {
            emit_discriminated_decode(&mut out, union);
        } else {
            emit_trial_decode(&mut out, union);
        }
    }

    // One Deserialize impl per owner, covering all of its union fields.
    let mut owners: Vec<(&str, Vec<&ReferenceSite>)> = Vec::new();
    for site in &analysis.sites {
        match owners.iter_mut().find(|(name, _)| *name == site.owner) {
            Some((_, sites)) => sites.push(site),
            None => owners.push((site.owner.as_str(), vec![site])),
        }
    }
    for (owner, sites) in &owners {
        emit_owner_deserialize(&mut out, owner, sites, model)?;
    }

    Ok(out)
}

fn emit_discriminated_decode(out: &mut String, union: &UnionGroup) {
    let name = &union.name;
    let Some(field) = &union.discriminant_field else {
        return;
    };

    out.push('\n');
    out.push_str(&format!("impl {} {{\n", name));
    out.push_str(
        "    pub fn from_value(value: &serde_json::Value) -> Result<Self, UnionDecodeError> {\n",
    );
    out.push_str(&format!(
        "        let tag = value.get({:?}).and_then(serde_json::Value::as_str).unwrap_or_default();\n",
        field
    ));
    out.push_str(&format!("        match {}Kind::from_tag(tag) {{\n", name));
    for (variant, value) in &union.discriminant_values {
        out.push_str(&format!(
            "            Some({}Kind::{}) => Ok({}::{}(serde_json::from_value(value.clone())?)),\n",
            name,
            kind_variant_name(value),
            name,
            variant
        ));
    }
    out.push_str("            None => Err(UnionDecodeError::InvalidDiscriminant {\n");
    out.push_str(&format!("                union: {:?},\n", name));
    out.push_str("                value: tag.to_string(),\n");
    out.push_str("            }),\n");
    out.push_str("        }\n");
    out.push_str("    }\n");

    out.push('\n');
    out.push_str(
        "    pub fn to_value(&self) -> Result<serde_json::Value, UnionDecodeError> {\n",
    );
    out.push_str("        let (mut value, kind) = match self {\n");
    for (variant, value) in &union.discriminant_values {
        out.push_str(&format!(
            "            {}::{}(inner) => (serde_json::to_value(inner)?, {}Kind::{}),\n",
            name,
            variant,
            name,
            kind_variant_name(value)
        ));
    }
    out.push_str("        };\n");
    out.push_str("        if let Some(object) = value.as_object_mut() {\n");
    out.push_str("            object.insert(\n");
    out.push_str(&format!("                {:?}.to_string(),\n", field));
    out.push_str("                serde_json::Value::String(kind.as_str().to_string()),\n");
    out.push_str("            );\n");
    out.push_str("        }\n");
    out.push_str("        Ok(value)\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    out.push('\n');
    out.push_str(&format!("impl serde::Serialize for {} {{\n", name));
    out.push_str("    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>\n");
    out.push_str("    where\n");
    out.push_str("        S: serde::Serializer,\n");
    out.push_str("    {\n");
    out.push_str("        let value = self.to_value().map_err(serde::ser::Error::custom)?;\n");
    out.push_str("        serde::Serialize::serialize(&value, serializer)\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn emit_trial_decode(out: &mut String, union: &UnionGroup) {
    let name = &union.name;

    out.push('\n');
    out.push_str(&format!("impl {} {{\n", name));
    out.push_str(
        "    pub fn from_value(value: &serde_json::Value) -> Result<Self, UnionDecodeError> {\n",
    );
    for variant in &union.variant_names {
        out.push_str(&format!(
            "        if let Ok(inner) = serde_json::from_value::<{}>(value.clone()) {{\n",
            variant
        ));
        out.push_str(&format!("            return Ok({}::{}(inner));\n", name, variant));
        out.push_str("        }\n");
    }
    out.push_str(&format!(
        "        Err(UnionDecodeError::NoVariantMatched {{ union: {:?} }})\n",
        name
    ));
    out.push_str("    }\n");

    out.push('\n');
    out.push_str(
        "    pub fn to_value(&self) -> Result<serde_json::Value, UnionDecodeError> {\n",
    );
    out.push_str("        match self {\n");
    for variant in &union.variant_names {
        out.push_str(&format!(
            "            {}::{}(inner) => Ok(serde_json::to_value(inner)?),\n",
            name, variant
        ));
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    out.push('\n');
    out.push_str(&format!("impl serde::Serialize for {} {{\n", name));
    out.push_str("    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>\n");
    out.push_str("    where\n");
    out.push_str("        S: serde::Serializer,\n");
    out.push_str("    {\n");
    out.push_str("        match self {\n");
    for variant in &union.variant_names {
        out.push_str(&format!(
            "            {}::{}(inner) => serde::Serialize::serialize(inner, serializer),\n",
            name, variant
        ));
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn emit_owner_deserialize(
    out: &mut String,
    owner: &str,
    sites: &[&ReferenceSite],
    model: &ModelSource,
) -> Result<(), EmitError> {
    let def = model.struct_def(owner)?;
    let is_union_field =
        |field: &FieldDef| sites.iter().any(|site| site.field == field.json_name);
    let plain_fields: Vec<&FieldDef> =
        def.fields.iter().filter(|field| !is_union_field(field)).collect();

    out.push('\n');
    out.push_str(&format!("impl<'de> serde::Deserialize<'de> for {} {{\n", owner));
    out.push_str("    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>\n");
    out.push_str("    where\n");
    out.push_str("        D: serde::Deserializer<'de>,\n");
    out.push_str("    {\n");
    out.push_str("        let mut raw: serde_json::Map<String, serde_json::Value> =\n");
    out.push_str("            serde::Deserialize::deserialize(deserializer)?;\n");

    // Pull the union fields out before the rest is decoded normally.
    for site in sites {
        let field = def.field(&site.field)?;
        out.push_str(&format!(
            "        let raw_{} = raw.remove({:?});\n",
            bare_ident(field),
            site.field
        ));
    }

    if !plain_fields.is_empty() {
        out.push_str("        #[derive(serde::Deserialize)]\n");
        out.push_str("        struct Plain {\n");
        for field in &plain_fields {
            for &attr in &field.attrs {
                out.push_str(&format!("            {}\n", model.lines[attr].trim()));
            }
            out.push_str(&format!("            {}\n", model.lines[field.line].trim()));
        }
        out.push_str("        }\n");
        out.push_str(
            "        let plain: Plain = serde_json::from_value(serde_json::Value::Object(raw))\n",
        );
        out.push_str("            .map_err(serde::de::Error::custom)?;\n");
    }

    for site in sites {
        let field = def.field(&site.field)?;
        emit_field_decode(out, site, field);
    }

    let inits: Vec<String> = def
        .fields
        .iter()
        .map(|field| {
            if is_union_field(field) {
                field.ident.clone()
            } else {
                format!("{}: plain.{}", field.ident, field.ident)
            }
        })
        .collect();
    out.push_str(&format!("        Ok({} {{ {} }})\n", owner, inits.join(", ")));
    out.push_str("    }\n");
    out.push_str("}\n");
    Ok(())
}

/// Identifier without any `r#` prefix, for naming scratch variables.
fn bare_ident(field: &FieldDef) -> &str {
    field.ident.trim_start_matches("r#")
}

fn emit_field_decode(out: &mut String, site: &ReferenceSite, field: &FieldDef) {
    let label = format!("field {} in {}", site.field, site.owner);
    let union = &site.union_group;

    out.push_str(&format!(
        "        let {} = match raw_{} {{\n",
        field.ident,
        bare_ident(field)
    ));

    if let Cardinality::Single = site.cardinality {
        if site.required {
            out.push_str(&format!(
                "            Some(value) => {}::from_value(&value).map_err(|err| {{\n",
                union
            ));
            out.push_str(&format!(
                "                serde::de::Error::custom(format!(\"{}: {{}}\", err))\n",
                label
            ));
            out.push_str("            })?,\n");
            out.push_str("            None => {\n");
            out.push_str(&format!(
                "                return Err(serde::de::Error::custom(\"{}: required\"));\n",
                label
            ));
            out.push_str("            }\n");
        } else {
            out.push_str("            None | Some(serde_json::Value::Null) => None,\n");
            out.push_str(&format!(
                "            Some(value) => Some({}::from_value(&value).map_err(|err| {{\n",
                union
            ));
            out.push_str(&format!(
                "                serde::de::Error::custom(format!(\"{}: {{}}\", err))\n",
                label
            ));
            out.push_str("            })?),\n");
        }
        out.push_str("        };\n");
        return;
    }

    let body = match site.cardinality {
        Cardinality::List => list_body(union, &label),
        Cardinality::NestedList => nested_list_body(union, &label),
        Cardinality::MapOfSingle => map_body(union, &label),
        Cardinality::Single => unreachable!(),
    };

    if site.required {
        out.push_str("            Some(value) => {\n");
        out.push_str(&body);
        out.push_str("                decoded\n");
        out.push_str("            }\n");
        out.push_str("            None => {\n");
        out.push_str(&format!(
            "                return Err(serde::de::Error::custom(\"{}: required\"));\n",
            label
        ));
        out.push_str("            }\n");
    } else {
        out.push_str("            None | Some(serde_json::Value::Null) => None,\n");
        out.push_str("            Some(value) => {\n");
        out.push_str(&body);
        out.push_str("                Some(decoded)\n");
        out.push_str("            }\n");
    }
    out.push_str("        };\n");
}

fn list_body(union: &str, label: &str) -> String {
    format!(
        r#"                let items = value.as_array().ok_or_else(|| {{
                    serde::de::Error::custom("{label}: expected array")
                }})?;
                let mut decoded = {union}List::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {{
                    let element = {union}::from_value(item).map_err(|err| {{
                        serde::de::Error::custom(format!(
                            "{label}: element {{}}: {{}}",
                            index, err
                        ))
                    }})?;
                    decoded.push(element);
                }}
"#
    )
}

fn nested_list_body(union: &str, label: &str) -> String {
    format!(
        r#"                let outer = value.as_array().ok_or_else(|| {{
                    serde::de::Error::custom("{label}: expected array")
                }})?;
                let mut decoded = Vec::with_capacity(outer.len());
                for (outer_index, row) in outer.iter().enumerate() {{
                    let items = row.as_array().ok_or_else(|| {{
                        serde::de::Error::custom(format!(
                            "{label}: element {{}}: expected array",
                            outer_index
                        ))
                    }})?;
                    let mut inner = {union}List::with_capacity(items.len());
                    for (inner_index, item) in items.iter().enumerate() {{
                        let element = {union}::from_value(item).map_err(|err| {{
                            serde::de::Error::custom(format!(
                                "{label}: element {{}}.{{}}: {{}}",
                                outer_index, inner_index, err
                            ))
                        }})?;
                        inner.push(element);
                    }}
                    decoded.push(inner);
                }}
"#
    )
}

fn map_body(union: &str, label: &str) -> String {
    format!(
        r#"                let entries = value.as_object().ok_or_else(|| {{
                    serde::de::Error::custom("{label}: expected object")
                }})?;
                let mut decoded = {union}Map::new();
                for (key, item) in entries {{
                    let element = {union}::from_value(item).map_err(|err| {{
                        serde::de::Error::custom(format!(
                            "{label}: key {{:?}}: {{}}",
                            key, err
                        ))
                    }})?;
                    decoded.insert(key.clone(), element);
                }}
"#
    )
}
