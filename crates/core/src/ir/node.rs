//! The tree the resolver passes operate on.
//!
//! Every position in a definition is a [`Node`]: either still structural
//! (`Unresolved`) or already a finished TypeScript expression (`Resolved`). The
//! `Resolved` tag is what keeps a produced expression inert: passes only ever
//! look inside `Unresolved` nodes, so nothing they do can reinterpret output as
//! schema content.

use std::convert::Infallible;

use indexmap::IndexMap;

use super::types::TsType;
use super::utils::primitive_for;
use crate::spec::{AdditionalProperties, Schema};

/// A schema position, before or after resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Schema structure still waiting for a pass.
    Unresolved(Box<SchemaNode>),
    /// Finished expression. Passes never look inside.
    Resolved(TsType),
}

/// Structural schema node. Children are themselves [`Node`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    /// `$ref` pointer.
    pub ref_path: Option<String>,
    /// `type`
    pub declared_type: Option<String>,
    /// `format`, only passed on to the mapper.
    pub format: Option<String>,
    /// `enum`
    pub enum_values: Option<Vec<serde_json::Value>>,
    /// `description`
    pub description: Option<String>,
    /// `properties`, in document order.
    pub properties: Option<IndexMap<String, Node>>,
    /// `required`
    pub required: RequiredSet,
    /// `additionalProperties`
    pub additional_properties: Option<AdditionalRule>,
    /// `allOf` members, in order.
    pub all_of: Option<Vec<Node>>,
    /// `items`
    pub items: Option<Box<Node>>,
    /// Property descriptions, kept here so they survive their property's resolution.
    pub property_docs: IndexMap<String, String>,
}

/// `additionalProperties` after conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalRule {
    /// `true` allows any value, `false` adds nothing.
    Allowed(bool),
    /// Value type of the index signature.
    Schema(Box<Node>),
}

/// Which pass is responsible for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Has a `$ref`.
    Reference,
    /// `string`, `number`, `integer`, `boolean`, or an enum.
    Primitive,
    /// `object`, or anything with properties, `allOf`, or `additionalProperties`.
    Object,
    /// `array`
    Array,
    /// No recognised type and no structure.
    Opaque,
}

/// Ordered, duplicate-free set of required property names.
///
/// Owned by a single object node; the mapper pass edits it while that node is
/// visited and the composite pass reads it once to mark properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSet(Vec<String>);

impl RequiredSet {
    /// True when `name` is required.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Add `name`. Returns false if it was already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    /// Remove `name`. Returns false if it was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|n| n != name);
        self.0.len() != before
    }

    /// Names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of required names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is required.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RequiredSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = RequiredSet::default();
        for name in iter {
            let name = name.into();
            if !set.contains(&name) {
                set.0.push(name);
            }
        }
        set
    }
}

impl Node {
    /// Wrap a finished expression so later passes leave it alone.
    pub const fn resolved(ty: TsType) -> Self {
        Node::Resolved(ty)
    }

    /// True for [`Node::Resolved`].
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Node::Resolved(_))
    }

    /// Borrow the finished expression, if there is one.
    pub const fn as_resolved(&self) -> Option<&TsType> {
        match self {
            Node::Resolved(ty) => Some(ty),
            Node::Unresolved(_) => None,
        }
    }

    /// Take the finished expression out, or hand back the structural node.
    pub fn into_resolved(self) -> Result<TsType, Box<SchemaNode>> {
        match self {
            Node::Resolved(ty) => Ok(ty),
            Node::Unresolved(schema) => Err(schema),
        }
    }
}

impl From<Schema> for Node {
    fn from(schema: Schema) -> Self {
        Node::Unresolved(Box::new(SchemaNode::from(schema)))
    }
}

impl From<Schema> for SchemaNode {
    fn from(schema: Schema) -> Self {
        let mut property_docs = IndexMap::new();
        let properties = schema.properties.map(|props| {
            props
                .into_iter()
                .map(|(name, prop)| {
                    if let Some(doc) = &prop.description {
                        property_docs.insert(name.clone(), doc.clone());
                    }
                    (name, Node::from(prop))
                })
                .collect()
        });

        SchemaNode {
            ref_path: schema.ref_path,
            declared_type: schema.schema_type,
            format: schema.format,
            enum_values: schema.enum_values,
            description: schema.description,
            properties,
            required: schema.required.unwrap_or_default().into_iter().collect(),
            additional_properties: schema.additional_properties.map(|rule| match rule {
                AdditionalProperties::Bool(allowed) => AdditionalRule::Allowed(allowed),
                AdditionalProperties::Schema(schema) => {
                    AdditionalRule::Schema(Box::new(Node::from(*schema)))
                }
            }),
            all_of: schema
                .all_of
                .map(|members| members.into_iter().map(Node::from).collect()),
            items: schema.items.map(|items| Box::new(Node::from(*items))),
            property_docs,
        }
    }
}

impl SchemaNode {
    /// Classify the node. References win, then primitives, then structure.
    pub fn shape(&self) -> Shape {
        if self.ref_path.is_some() {
            return Shape::Reference;
        }
        match self.declared_type.as_deref() {
            Some(t) if primitive_for(t).is_some() => return Shape::Primitive,
            None if self.enum_values.is_some() => return Shape::Primitive,
            _ => {}
        }
        if self.declared_type.as_deref() == Some("object")
            || self.properties.is_some()
            || self.all_of.is_some()
            || self.additional_properties.is_some()
        {
            return Shape::Object;
        }
        if self.declared_type.as_deref() == Some("array") || self.items.is_some() {
            return Shape::Array;
        }
        Shape::Opaque
    }

    /// No properties, no allOf members, and no additionalProperties rule.
    pub fn is_empty_shape(&self) -> bool {
        self.properties.as_ref().is_none_or(IndexMap::is_empty)
            && self.all_of.as_ref().is_none_or(Vec::is_empty)
            && matches!(
                self.additional_properties,
                None | Some(AdditionalRule::Allowed(false))
            )
    }

    /// Readiness check: every allOf member and property value is resolved.
    pub fn children_resolved(&self) -> bool {
        self.all_of.iter().flatten().all(Node::is_resolved)
            && self
                .properties
                .iter()
                .flat_map(IndexMap::values)
                .all(Node::is_resolved)
    }

    /// Rebuild the node with `f` applied to every direct child.
    pub fn map_children(self, mut f: impl FnMut(Node) -> Node) -> Self {
        match self.try_map_children(|child| Ok::<_, Infallible>(f(child))) {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }

    /// Fallible [`SchemaNode::map_children`]; stops at the first error.
    pub fn try_map_children<E>(
        mut self,
        mut f: impl FnMut(Node) -> Result<Node, E>,
    ) -> Result<Self, E> {
        if let Some(props) = self.properties.take() {
            let mut mapped = IndexMap::with_capacity(props.len());
            for (name, child) in props {
                mapped.insert(name, f(child)?);
            }
            self.properties = Some(mapped);
        }
        if let Some(members) = self.all_of.take() {
            self.all_of = Some(members.into_iter().map(&mut f).collect::<Result<_, _>>()?);
        }
        if let Some(items) = self.items.take() {
            self.items = Some(Box::new(f(*items)?));
        }
        self.additional_properties = match self.additional_properties.take() {
            Some(AdditionalRule::Schema(schema)) => {
                Some(AdditionalRule::Schema(Box::new(f(*schema)?)))
            }
            other => other,
        };
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ir::types::TsPrimitive;

    fn schema(json: &str) -> SchemaNode {
        SchemaNode::from(serde_json::from_str::<Schema>(json).unwrap())
    }

    #[test]
    fn test_required_set_has_no_duplicates() {
        let mut set: RequiredSet = ["a", "b", "a"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(!set.insert("b"));
        assert!(set.insert("c"));
        assert!(set.remove("a"));
        assert!(!set.remove("a"));
        assert_eq!(set.iter().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn test_shapes_are_classified_explicitly() {
        assert_eq!(schema(r##"{"$ref": "#/definitions/A"}"##).shape(), Shape::Reference);
        assert_eq!(schema(r#"{"type": "integer"}"#).shape(), Shape::Primitive);
        assert_eq!(schema(r#"{"enum": ["a"]}"#).shape(), Shape::Primitive);
        assert_eq!(schema(r#"{"type": "object"}"#).shape(), Shape::Object);
        assert_eq!(schema(r#"{"properties": {}}"#).shape(), Shape::Object);
        assert_eq!(schema(r#"{"allOf": []}"#).shape(), Shape::Object);
        assert_eq!(schema(r#"{"type": "array"}"#).shape(), Shape::Array);
        assert_eq!(schema(r#"{"items": {"type": "string"}}"#).shape(), Shape::Array);
        assert_eq!(schema(r#"{"description": "anything"}"#).shape(), Shape::Opaque);
        assert_eq!(schema(r#"{"type": "file"}"#).shape(), Shape::Opaque);
    }

    #[test]
    fn test_empty_shape_ignores_unrelated_fields() {
        assert!(schema(r#"{"type": "object", "description": "x", "format": "y"}"#).is_empty_shape());
        assert!(schema(r#"{"type": "object", "additionalProperties": false}"#).is_empty_shape());
        assert!(schema(r#"{"type": "object", "properties": {}, "allOf": []}"#).is_empty_shape());
        assert!(!schema(r#"{"type": "object", "additionalProperties": true}"#).is_empty_shape());
        assert!(!schema(r#"{"type": "object", "properties": {"a": {}}}"#).is_empty_shape());
    }

    #[test]
    fn test_property_descriptions_are_collected() {
        let node = schema(
            r#"{"type": "object", "properties": {"a": {"type": "string", "description": "first"}, "b": {}}}"#,
        );
        assert_eq!(node.property_docs.get("a").map(String::as_str), Some("first"));
        assert!(!node.property_docs.contains_key("b"));
    }

    #[test]
    fn test_readiness_tracks_children() {
        let mut node = schema(r#"{"type": "object", "properties": {"a": {"type": "string"}}}"#);
        assert!(!node.children_resolved());

        node = node.map_children(|_| Node::resolved(TsType::Primitive(TsPrimitive::String)));
        assert!(node.children_resolved());
    }

    #[test]
    fn test_map_children_visits_every_child_kind() {
        let node = schema(
            r#"{
                "properties": {"p": {}},
                "allOf": [{}, {}],
                "items": {},
                "additionalProperties": {}
            }"#,
        );
        let mut visited = 0;
        let node = node.map_children(|child| {
            visited += 1;
            child
        });
        assert_eq!(visited, 5);
        assert!(matches!(node.additional_properties, Some(AdditionalRule::Schema(_))));
    }

    #[test]
    fn test_try_map_children_stops_on_error() {
        let node = schema(r#"{"properties": {"a": {}, "b": {}}}"#);
        let mut calls = 0;
        let result = node.try_map_children(|_| {
            calls += 1;
            Err::<Node, _>("boom")
        });
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_resolved_round_trip() {
        let ty = TsType::Union(vec![
            TsType::Literal("a".to_string()),
            TsType::Literal("b".to_string()),
        ]);
        let node = Node::resolved(ty.clone());
        assert!(node.is_resolved());
        assert_eq!(node.as_resolved(), Some(&ty));
        assert_eq!(node.into_resolved().unwrap(), ty);
    }
}
