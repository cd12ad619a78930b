//! Line-oriented parsing and rewriting of the hand-written base model.
//!
//! The base model is plain Rust source with one struct per schema object.
//! Rewriting works on whole lines so everything the parser does not
//! understand (comments, blank lines, helper impls) passes through
//! untouched.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::EmitError;

static STRUCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*pub struct ([A-Za-z_]\w*)\s*\{\s*$").unwrap());
static DERIVE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\[derive\((.*)\)\]\s*$").unwrap());
static ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\[").unwrap());
static FIELD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)pub (r#)?([A-Za-z_]\w*):\s*(.+?),\s*$").unwrap());
static ALIAS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*pub type ([A-Za-z_]\w*)\s*=\s*.+;\s*$").unwrap());
static RENAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"rename\s*=\s*"([^"]+)""#).unwrap());

/// One field of a parsed struct.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Rust identifier, including any `r#` prefix.
    pub ident: String,
    /// JSON name this field binds to: a `#[serde(rename = ...)]` value, or
    /// the identifier itself (minus `r#`).
    pub json_name: String,
    /// Declared Rust type, verbatim.
    pub ty: String,
    /// Index of the declaration line.
    pub line: usize,
    /// Indexes of attribute lines immediately above the declaration.
    pub attrs: Vec<usize>,
}

/// One `pub struct` block of the base model.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    pub name: String,
    /// Index of the `#[derive(...)]` line above the struct, if present.
    pub derive_line: Option<usize>,
    pub fields: Vec<FieldDef>,
}

/// The parsed base model: raw lines plus an index of its declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSource {
    pub lines: Vec<String>,
    pub structs: Vec<StructDef>,
    /// `pub type Name = ...;` aliases, by name and line index.
    pub aliases: HashMap<String, usize>,
}

impl ModelSource {
    pub fn struct_def(&self, name: &str) -> Result<&StructDef, EmitError> {
        self.structs
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| EmitError::MissingStruct {
                name: name.to_string(),
            })
    }
}

impl StructDef {
    /// Find the field bound to a schema property.
    pub fn field(&self, json_name: &str) -> Result<&FieldDef, EmitError> {
        self.fields
            .iter()
            .find(|f| f.json_name == json_name)
            .ok_or_else(|| EmitError::MissingField {
                owner: self.name.clone(),
                field: json_name.to_string(),
            })
    }
}

/// Parse base-model source into lines plus a struct/alias index.
///
/// # Errors
///
/// Returns `EmitError::MalformedModel` if a struct block never closes.
pub fn parse_model(source: &str) -> Result<ModelSource, EmitError> {
    let lines: Vec<String> = source.lines().map(str::to_string).collect();
    let mut structs = Vec::new();
    let mut aliases = HashMap::new();

    let mut pending_derive: Option<usize> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];

        if DERIVE_RE.is_match(line) {
            pending_derive = Some(i);
            i += 1;
            continue;
        }
        if ATTR_RE.is_match(line) {
            // Non-derive outer attribute on the next item.
            i += 1;
            continue;
        }

        if let Some(caps) = STRUCT_RE.captures(line) {
            let name = caps[1].to_string();
            let (fields, end) = parse_fields(&lines, i + 1, &name)?;
            structs.push(StructDef {
                name,
                derive_line: pending_derive.take(),
                fields,
            });
            i = end + 1;
            continue;
        }

        if let Some(caps) = ALIAS_RE.captures(line) {
            aliases.insert(caps[1].to_string(), i);
        }

        pending_derive = None;
        i += 1;
    }

    Ok(ModelSource {
        lines,
        structs,
        aliases,
    })
}

/// Parse a struct body starting after its opening brace. Returns the fields
/// and the index of the closing brace line.
fn parse_fields(
    lines: &[String],
    start: usize,
    struct_name: &str,
) -> Result<(Vec<FieldDef>, usize), EmitError> {
    let mut fields = Vec::new();
    let mut attrs: Vec<usize> = Vec::new();

    for (i, line) in lines.iter().enumerate().skip(start) {
        if line.trim() == "}" {
            return Ok((fields, i));
        }
        if ATTR_RE.is_match(line) {
            attrs.push(i);
            continue;
        }
        if let Some(caps) = FIELD_RE.captures(line) {
            let raw = caps.get(2).is_some();
            let bare = caps[3].to_string();
            let ident = if raw { format!("r#{}", bare) } else { bare.clone() };
            let json_name = attrs
                .iter()
                .find_map(|&a| RENAME_RE.captures(&lines[a]))
                .map(|c| c[1].to_string())
                .unwrap_or(bare);
            fields.push(FieldDef {
                ident,
                json_name,
                ty: caps[4].to_string(),
                line: i,
                attrs: std::mem::take(&mut attrs),
            });
            continue;
        }
        attrs.clear();
    }

    Err(EmitError::MalformedModel {
        message: format!("struct {} has no closing brace", struct_name),
    })
}

/// One field-type replacement in the enhanced model.
#[derive(Debug, Clone, PartialEq)]
pub struct Retype {
    pub owner: String,
    /// JSON name of the field within the owner.
    pub field: String,
    pub new_type: String,
}

/// Everything the enhanced-model pass changes about the base source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewritePlan {
    /// `pub type` aliases to delete (union placeholders).
    pub drop_aliases: HashSet<String>,
    pub retypes: Vec<Retype>,
    /// Structs whose derive list must lose `Deserialize` because a
    /// hand-written impl replaces it.
    pub strip_deserialize: HashSet<String>,
}

/// Apply a rewrite plan, producing the enhanced model source.
///
/// # Errors
///
/// Returns `EmitError::MissingStruct` or `EmitError::MissingField` if the
/// plan names a declaration the base model does not have.
pub fn rewrite_model(model: &ModelSource, plan: &RewritePlan) -> Result<String, EmitError> {
    let mut skip: HashSet<usize> = HashSet::new();
    let mut replace: HashMap<usize, String> = HashMap::new();

    for alias in &plan.drop_aliases {
        if let Some(&line) = model.aliases.get(alias) {
            skip.insert(line);
        }
    }

    for retype in &plan.retypes {
        let field = model.struct_def(&retype.owner)?.field(&retype.field)?;
        let caps = FIELD_RE
            .captures(&model.lines[field.line])
            .ok_or_else(|| EmitError::MalformedModel {
                message: format!("unparsable field line {}", field.line + 1),
            })?;
        replace.insert(
            field.line,
            format!("{}pub {}: {},", &caps[1], field.ident, retype.new_type),
        );
    }

    for owner in &plan.strip_deserialize {
        let def = model.struct_def(owner)?;
        if let Some(line) = def.derive_line {
            replace.insert(line, strip_deserialize_derive(&model.lines[line]));
        }
    }

    let mut out = String::new();
    for (i, line) in model.lines.iter().enumerate() {
        if skip.contains(&i) {
            continue;
        }
        match replace.get(&i) {
            Some(replacement) => out.push_str(replacement),
            None => out.push_str(line),
        }
        out.push('\n');
    }
    Ok(out)
}

/// Remove `Deserialize` (bare or path-qualified) from a derive line.
fn strip_deserialize_derive(line: &str) -> String {
    let Some(caps) = DERIVE_RE.captures(line) else {
        return line.to_string();
    };
    let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
    let kept: Vec<&str> = caps[1]
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty() && *t != "Deserialize" && !t.ends_with("::Deserialize"))
        .collect();
    format!("{}#[derive({})]", indent, kept.join(", "))
}
