//! Fourth pass: objects, arrays, and intersections.
//!
//! The walk is bottom-up, so by the time an object is visited each of its
//! children is as resolved as it will ever get. An object whose properties or
//! allOf members are still structural is returned untouched; nothing deeper in
//! the tree can change afterwards, so one traversal is enough and the emitter
//! reports whatever is left.

use tracing::{debug, warn};

use crate::ir::{AdditionalRule, Node, RequiredSet, SchemaNode, Shape, TsObject, TsProp, TsType};

/// Resolve every object and array node below (and including) `node`.
pub fn resolve_composites(node: Node) -> Node {
    let Node::Unresolved(schema) = node else {
        return node;
    };
    let schema = schema.map_children(resolve_composites);
    match schema.shape() {
        Shape::Object => resolve_object(schema),
        Shape::Array => resolve_array(schema),
        Shape::Opaque => {
            match &schema.declared_type {
                Some(t) => warn!("unknown type '{t}', emitting any"),
                None => debug!("untyped schema, emitting any"),
            }
            Node::resolved(TsType::any())
        }
        // Handled by earlier passes; anything left here stays for the emitter to report.
        Shape::Reference | Shape::Primitive => Node::Unresolved(Box::new(schema)),
    }
}

fn resolve_object(mut schema: SchemaNode) -> Node {
    if schema.is_empty_shape() {
        return Node::resolved(TsType::open_dictionary());
    }
    if !schema.children_resolved() {
        debug!("object not ready, deferring");
        return Node::Unresolved(Box::new(schema));
    }

    let had_properties = schema.properties.is_some();
    let (names, prop_nodes): (Vec<String>, Vec<Node>) =
        schema.properties.take().into_iter().flatten().unzip();
    let had_all_of = schema.all_of.is_some();
    let member_nodes = schema.all_of.take().unwrap_or_default();

    let (prop_types, member_types) = match (resolve_all(prop_nodes), resolve_all(member_nodes)) {
        (Ok(props), Ok(members)) => (props, members),
        (props, members) => {
            warn!("structural child in an object marked ready, deferring");
            schema.properties =
                had_properties.then(|| names.into_iter().zip(restore(props)).collect());
            schema.all_of = had_all_of.then(|| restore(members));
            return Node::Unresolved(Box::new(schema));
        }
    };

    let SchemaNode {
        required,
        additional_properties,
        mut property_docs,
        ..
    } = schema;

    let props: Vec<TsProp> = names
        .into_iter()
        .zip(prop_types)
        .map(|(name, ty)| TsProp {
            optional: !required.contains(&name),
            doc: property_docs.shift_remove(&name),
            name,
            ty,
        })
        .collect();

    let index = match additional_properties {
        None | Some(AdditionalRule::Allowed(false)) => None,
        Some(AdditionalRule::Allowed(true)) => Some(Box::new(TsType::any())),
        Some(AdditionalRule::Schema(value)) => Some(Box::new(index_value_type(&value))),
    };

    let mut members: Vec<TsType> = member_types
        .into_iter()
        .map(|member| remark_required(member, &required))
        .collect();

    let own = TsObject { props, index };
    if !own.is_empty() {
        members.push(TsType::Object(own));
    }

    Node::resolved(TsType::intersection(members))
}

/// Every node as its type, or all of them back unchanged when one is still structural.
fn resolve_all(nodes: Vec<Node>) -> Result<Vec<TsType>, Vec<Node>> {
    let mut types = Vec::with_capacity(nodes.len());
    let mut rest = nodes.into_iter();
    while let Some(node) = rest.next() {
        match node {
            Node::Resolved(ty) => types.push(ty),
            pending @ Node::Unresolved(_) => {
                let mut nodes: Vec<Node> = types.into_iter().map(Node::Resolved).collect();
                nodes.push(pending);
                nodes.extend(rest);
                return Err(nodes);
            }
        }
    }
    Ok(types)
}

fn restore(result: Result<Vec<TsType>, Vec<Node>>) -> Vec<Node> {
    match result {
        Ok(types) => types.into_iter().map(Node::Resolved).collect(),
        Err(nodes) => nodes,
    }
}

/// Primitive keyword when the rule resolved to one, otherwise `any`.
fn index_value_type(value: &Node) -> TsType {
    value
        .as_resolved()
        .and_then(TsType::as_primitive)
        .map_or_else(TsType::any, TsType::Primitive)
}

/// Mark allOf object-literal members' properties required where the parent requires them.
fn remark_required(member: TsType, required: &RequiredSet) -> TsType {
    match member {
        TsType::Object(mut object) => {
            for prop in &mut object.props {
                if required.contains(&prop.name) {
                    prop.optional = false;
                }
            }
            TsType::Object(object)
        }
        other => other,
    }
}

fn resolve_array(schema: SchemaNode) -> Node {
    match schema.items {
        None => Node::resolved(TsType::Array(Box::new(TsType::any()))),
        Some(items) => match *items {
            Node::Resolved(item) => Node::resolved(TsType::Array(Box::new(item))),
            unresolved @ Node::Unresolved(_) => {
                debug!("array items not ready, deferring");
                Node::Unresolved(Box::new(SchemaNode {
                    items: Some(Box::new(unresolved)),
                    ..schema
                }))
            }
        },
    }
}
