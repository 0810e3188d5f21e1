//! First pass: replace `$ref` pointers with container lookups.
//!
//! References are never inlined. A pointer to `#/definitions/Pet` becomes
//! `definitions['Pet']`, so self- and mutually-referential definitions need no
//! special handling.

use tracing::warn;

use crate::ir::{Node, TsType};

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Resolve every reference below (and including) `node`.
pub fn resolve_references(node: Node, container: &str) -> Node {
    match node {
        Node::Resolved(_) => node,
        Node::Unresolved(schema) => {
            if let Some(pointer) = &schema.ref_path {
                return Node::resolved(TsType::Ref {
                    container: container.to_string(),
                    name: definition_name(pointer),
                });
            }
            Node::Unresolved(Box::new(
                schema.map_children(|child| resolve_references(child, container)),
            ))
        }
    }
}

/// Definition name a pointer refers to, with JSON-pointer escapes decoded.
pub fn definition_name(pointer: &str) -> String {
    match pointer.strip_prefix(DEFINITIONS_PREFIX) {
        Some(name) => name.replace("~1", "/").replace("~0", "~"),
        None => {
            warn!("reference '{pointer}' does not point into #/definitions, using it as the name");
            pointer.to_string()
        }
    }
}
