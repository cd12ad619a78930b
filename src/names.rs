//! Identifier helpers for generated code.

/// Rust keywords that need raw-identifier escaping in generated code.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "static", "struct", "trait", "true", "type", "unsafe", "use", "where", "while",
];

/// Convert a schema name to PascalCase.
///
/// Splits on non-alphanumeric runs and uppercases each segment's first
/// letter; segments keep their remaining characters as-is so names that are
/// already PascalCase pass through unchanged.
pub fn pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for segment in s.split(|c: char| !c.is_alphanumeric()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars);
        }
    }
    out
}

/// Build an enum-variant identifier from a discriminant literal.
///
/// Non-alphanumeric runs become segment boundaries, each segment is
/// capitalized, and a leading digit gets an `N` prefix so the result is a
/// valid identifier: `"light-blue"` → `LightBlue`, `"2d"` → `N2d`.
pub fn kind_variant_name(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    for segment in literal.split(|c: char| !c.is_alphanumeric()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            for c in chars {
                out.extend(c.to_lowercase());
            }
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'N');
    }
    out
}

/// Convert a schema field name to a snake_case Rust identifier, escaping
/// Rust keywords as raw identifiers (`type` → `r#type`).
pub fn field_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase() {
                if prev_lower {
                    out.push('_');
                }
                out.extend(c.to_lowercase());
                prev_lower = false;
            } else {
                out.push(c);
                prev_lower = c.is_lowercase() || c.is_ascii_digit();
            }
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
            prev_lower = false;
        }
    }
    if RUST_KEYWORDS.contains(&out.as_str()) {
        format!("r#{}", out)
    } else {
        out
    }
}
