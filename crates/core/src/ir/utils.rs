//! Common utilities for TypeScript code generation.
//!
//! Shared by the resolver passes and the emitter.

use super::types::TsPrimitive;

/// Map a declared type category to its TypeScript primitive.
///
/// The table is fixed: string-like formats that Swagger documents sometimes put
/// in `type` (binary, byte, date, dateTime, password) all map to `string`.
pub fn primitive_for(category: &str) -> Option<TsPrimitive> {
    let primitive = match category {
        // boolean types
        "boolean" => TsPrimitive::Boolean,

        // string types
        "binary" | "byte" | "date" | "dateTime" | "password" | "string" => TsPrimitive::String,

        // number types
        "double" | "float" | "integer" | "number" => TsPrimitive::Number,

        _ => return None,
    };
    Some(primitive)
}

/// True for categories the passes know how to resolve structurally or as primitives.
pub fn is_known_category(category: &str) -> bool {
    matches!(category, "object" | "array") || primitive_for(category).is_some()
}

/// Check if a property name has to be quoted in an object literal.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_quoting(name: &str) -> bool {
    !name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use inside a single-quoted TypeScript string literal.
///
/// Line terminators are escaped too; a raw one inside quotes is a syntax error.
pub fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// Quote a property key with single quotes if it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("'{}'", escape_single_quoted(name))
    } else {
        name.to_string()
    }
}
