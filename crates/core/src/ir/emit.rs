//! TypeScript code emission via the Emit trait.
//!
//! Rendering happens once, after every pass has finished. Until then expressions
//! stay as `TsType` values inside the tree.

use super::types::{TsObject, TsPrimitive, TsProp, TsType};
use super::utils::{escape_single_quoted, quote_if_needed};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Any => "any".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Literal(value) => format!("'{}'", escape_single_quoted(value)),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap complex types in parentheses
                if matches!(**inner, TsType::Union(_) | TsType::Intersection(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => types.iter().map(|t| t.emit()).collect::<Vec<_>>().join(" | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    let s = t.emit();
                    if matches!(t, TsType::Union(_)) {
                        format!("({s})")
                    } else {
                        s
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(object) => object.emit(),
            TsType::Ref { container, name } => {
                format!("{container}['{}']", escape_single_quoted(name))
            }
            TsType::Raw(text) => text.clone(),
        }
    }
}

impl Emit for TsObject {
    fn emit(&self) -> String {
        let mut parts: Vec<_> = self.props.iter().map(|p| p.emit()).collect();
        if let Some(index) = &self.index {
            parts.push(format!("[key: string]: {}", index.emit()));
        }
        if parts.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", parts.join("; "))
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        let doc = self
            .doc
            .as_deref()
            .map(doc_comment)
            .unwrap_or_default();
        format!("{doc}{key}{opt}: {}", self.ty.emit())
    }
}

/// Single-line JSDoc comment, followed by a space.
fn doc_comment(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        return String::new();
    }
    format!("/** {} */ ", flat.replace("*/", "*\\/"))
}
