//! Third pass: scalar and enumerated leaves.

use serde_json::Value;

use crate::ir::utils::primitive_for;
use crate::ir::{Node, SchemaNode, Shape, TsType};

/// Resolve every primitive node below (and including) `node`, bottom-up.
pub fn resolve_primitives(node: Node) -> Node {
    let Node::Unresolved(schema) = node else {
        return node;
    };
    let schema = schema.map_children(resolve_primitives);
    if schema.shape() == Shape::Primitive {
        Node::resolved(primitive_expression(&schema))
    } else {
        Node::Unresolved(Box::new(schema))
    }
}

/// Literal union for enums, otherwise the mapped keyword.
fn primitive_expression(schema: &SchemaNode) -> TsType {
    if let Some(values) = schema.enum_values.as_ref().filter(|v| !v.is_empty()) {
        return TsType::union(
            values
                .iter()
                .map(|value| TsType::Literal(literal_text(value)))
                .collect(),
        );
    }
    schema
        .declared_type
        .as_deref()
        .and_then(primitive_for)
        .map_or_else(TsType::any, TsType::Primitive)
}

fn literal_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ir::{Emit, TsPrimitive};
    use crate::spec::Schema;

    fn resolve(json: &str) -> Node {
        resolve_primitives(Node::from(serde_json::from_str::<Schema>(json).unwrap()))
    }

    fn emitted(json: &str) -> String {
        resolve(json).as_resolved().unwrap().emit()
    }

    #[test]
    fn test_keywords_follow_the_table() {
        assert_eq!(emitted(r#"{"type": "boolean"}"#), "boolean");
        assert_eq!(emitted(r#"{"type": "dateTime"}"#), "string");
        assert_eq!(emitted(r#"{"type": "integer", "format": "int64"}"#), "number");
        assert_eq!(emitted(r#"{"type": "float"}"#), "number");
    }

    #[test]
    fn test_enums_become_literal_unions_in_order() {
        assert_eq!(
            emitted(r#"{"type": "string", "enum": ["active", "inactive", "banned"]}"#),
            "'active' | 'inactive' | 'banned'"
        );
    }

    #[test]
    fn test_single_literal_enum() {
        assert_eq!(emitted(r#"{"type": "string", "enum": ["only"]}"#), "'only'");
    }

    #[test]
    fn test_non_string_enum_values_are_quoted_as_text() {
        assert_eq!(emitted(r#"{"type": "integer", "enum": [1, 2]}"#), "'1' | '2'");
    }

    #[test]
    fn test_enum_line_breaks_are_escaped() {
        assert_eq!(
            emitted(r#"{"type": "string", "enum": ["a\nb", "c\r\nd"]}"#),
            r"'a\nb' | 'c\r\nd'"
        );
    }

    #[test]
    fn test_untyped_enum_is_a_literal_union() {
        assert_eq!(emitted(r#"{"enum": ["x", "y"]}"#), "'x' | 'y'");
    }

    #[test]
    fn test_empty_enum_falls_back_to_keyword() {
        assert_eq!(emitted(r#"{"type": "string", "enum": []}"#), "string");
    }

    #[test]
    fn test_structural_nodes_pass_through_with_leaves_resolved() {
        let node = resolve(
            r#"{"type": "object", "properties": {"a": {"type": "string"}, "b": {"type": "object"}}}"#,
        );
        let Node::Unresolved(schema) = node else {
            panic!("object should stay structural");
        };
        let props = schema.properties.unwrap();
        assert_eq!(props["a"], Node::resolved(TsType::Primitive(TsPrimitive::String)));
        assert!(!props["b"].is_resolved());
    }

    #[test]
    fn test_array_items_are_resolved() {
        let Node::Unresolved(schema) = resolve(r#"{"type": "array", "items": {"type": "number"}}"#)
        else {
            panic!("array should stay structural");
        };
        assert!(schema.items.unwrap().is_resolved());
    }
}
