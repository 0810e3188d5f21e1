//! Swagger 2.0 document structs for serde deserialization.
//!
//! Only the keywords the generator understands are modelled; everything else in
//! the document is ignored. Maps use `IndexMap` so definition and property order
//! survive deserialization.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::GenerateError;

/// Root document. Only `definitions` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// Named schemas, in document order.
    pub definitions: Option<IndexMap<String, Schema>>,
}

/// JSON Schema subset used by Swagger 2.0 definitions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Pointer to another definition, e.g. `#/definitions/Pet`.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    /// Declared type category (string, integer, object, array, ...).
    #[serde(rename = "type")]
    pub schema_type: Option<String>,

    /// Format hint. Parsed but not used for type selection.
    pub format: Option<String>,

    /// Enumerated literals, in declaration order.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<serde_json::Value>>,

    /// Free-form description, carried into the output as a doc comment.
    pub description: Option<String>,

    /// Properties for object types.
    pub properties: Option<IndexMap<String, Schema>>,

    /// Required property names for object types.
    pub required: Option<Vec<String>>,

    /// Rule for undeclared properties.
    pub additional_properties: Option<AdditionalProperties>,

    /// Intersection members.
    pub all_of: Option<Vec<Schema>>,

    /// Item schema for array types.
    pub items: Option<Box<Schema>>,
}

/// Additional properties can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` or `false`.
    Bool(bool),
    /// Schema for the values.
    Schema(Box<Schema>),
}

impl Document {
    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, GenerateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, GenerateError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}
