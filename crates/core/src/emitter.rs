//! Assembles the named type container from resolved definitions.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::GenerateError;
use crate::ir::{Emit, Node};

/// Banner placed at the top of every generated file.
pub const WARNING_MESSAGE: &str = "/**
 * This file was auto-generated by swagger-ts.
 * Do not make direct changes to the file.
 */
";

/// Render `definitions` as `export interface <container> { ... }` behind `banner`.
///
/// Every definition must already be resolved; the first one that is not is
/// reported by name.
pub fn emit_definitions(
    definitions: IndexMap<String, Node>,
    container: &str,
    banner: &str,
) -> Result<String, GenerateError> {
    let mut out = String::with_capacity(banner.len() + 64 * definitions.len());
    out.push_str(banner);
    out.push_str("\n\n\nexport interface ");
    out.push_str(container);
    out.push_str(" {\n");

    for (name, node) in definitions {
        let ty = node
            .into_resolved()
            .map_err(|_| GenerateError::Unresolved { name: name.clone() })?;
        // JSON string quoting, control characters as `\uXXXX`.
        out.push_str("  ");
        out.push_str(&Value::from(name).to_string());
        out.push_str(": ");
        out.push_str(&ty.emit());
        out.push_str(";\n");
    }

    out.push_str("}\n");
    Ok(out)
}
