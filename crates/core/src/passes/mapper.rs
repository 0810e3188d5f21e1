//! Second pass: let a user hook override individual properties.
//!
//! The mapper sees every own property of every object node that is not a
//! reference, in declaration order, and answers with the property's type,
//! optionality, and description. Optionality is written back to the owning
//! node's [`RequiredSet`](crate::ir::RequiredSet) so the required list and the
//! optional flag can never disagree.

use indexmap::IndexMap;
use tracing::debug;

use super::refs::resolve_references;
use crate::error::BoxError;
use crate::ir::{Fragment, Node, SchemaNode, Shape, TsType};

/// What the mapper is told about a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyContext {
    /// The property's declared `type`, if any.
    pub declared_type: Option<String>,
    /// True when the property is not in its object's required list.
    pub optional: bool,
    /// The property's `description`.
    pub description: Option<String>,
}

/// The mapper's answer for a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMapping {
    /// A type category, a JSON schema fragment, or TypeScript text.
    pub declared_type: Option<String>,
    /// False marks the property required on its owner.
    pub optional: bool,
    /// Replaces the property's description.
    pub description: Option<String>,
}

impl From<&PropertyContext> for PropertyMapping {
    fn from(context: &PropertyContext) -> Self {
        PropertyMapping {
            declared_type: context.declared_type.clone(),
            optional: context.optional,
            description: context.description.clone(),
        }
    }
}

/// Hook consulted once per property.
pub trait PropertyMapper {
    /// Answer for one property. `schema` is the property as it stands after
    /// reference resolution; an error aborts generation unchanged.
    fn map(&self, schema: &SchemaNode, context: &PropertyContext)
    -> Result<PropertyMapping, BoxError>;
}

impl<F> PropertyMapper for F
where
    F: Fn(&SchemaNode, &PropertyContext) -> Result<PropertyMapping, BoxError>,
{
    fn map(
        &self,
        schema: &SchemaNode,
        context: &PropertyContext,
    ) -> Result<PropertyMapping, BoxError> {
        self(schema, context)
    }
}

/// Apply `mapper` to every object node below (and including) `node`.
///
/// Children are mapped before their parent. Errors from the mapper are
/// returned as-is.
pub fn apply_property_mapper(
    node: Node,
    mapper: &dyn PropertyMapper,
    container: &str,
) -> Result<Node, BoxError> {
    let Node::Unresolved(schema) = node else {
        return Ok(node);
    };
    let mut schema =
        schema.try_map_children(|child| apply_property_mapper(child, mapper, container))?;

    if schema.shape() == Shape::Object
        && let Some(properties) = schema.properties.take()
    {
        let mut mapped = IndexMap::with_capacity(properties.len());
        for (name, property) in properties {
            let property = match property {
                Node::Unresolved(prop) => {
                    map_property(&mut schema, &name, *prop, mapper, container)?
                }
                resolved @ Node::Resolved(_) => resolved,
            };
            mapped.insert(name, property);
        }
        schema.properties = Some(mapped);
    }

    Ok(Node::Unresolved(Box::new(schema)))
}

fn map_property(
    owner: &mut SchemaNode,
    name: &str,
    mut property: SchemaNode,
    mapper: &dyn PropertyMapper,
    container: &str,
) -> Result<Node, BoxError> {
    let context = PropertyContext {
        declared_type: property.declared_type.clone(),
        optional: !owner.required.contains(name),
        description: property.description.clone(),
    };
    let mapping = mapper.map(&property, &context)?;

    if mapping.optional {
        owner.required.remove(name);
    } else {
        owner.required.insert(name);
    }
    match &mapping.description {
        Some(doc) => owner.property_docs.insert(name.to_string(), doc.clone()),
        None => owner.property_docs.shift_remove(name),
    };

    if mapping.declared_type == context.declared_type {
        property.description = mapping.description;
        return Ok(Node::Unresolved(Box::new(property)));
    }

    debug!(
        "property '{name}' remapped from {:?} to {:?}",
        context.declared_type, mapping.declared_type
    );
    let node = match mapping.declared_type.as_deref().map(Fragment::decode) {
        None => {
            property.declared_type = None;
            property.description = mapping.description;
            Node::Unresolved(Box::new(property))
        }
        Some(Fragment::DeclaredType(category)) => {
            property.declared_type = Some(category);
            property.description = mapping.description;
            Node::Unresolved(Box::new(property))
        }
        Some(Fragment::Schema(fragment)) => {
            let mut spliced = SchemaNode::from(*fragment);
            spliced.description = mapping.description;
            resolve_references(Node::Unresolved(Box::new(spliced)), container)
        }
        Some(Fragment::Verbatim(text)) => Node::resolved(TsType::Raw(text)),
    };
    Ok(node)
}
