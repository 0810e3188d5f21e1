//! Generation pipeline.
//!
//! 1. Parse: JSON/YAML -> `Document`
//! 2. Build: `Schema` -> `Node` tree per definition
//! 3. Passes: refs -> mapper -> primitives -> composites
//! 4. Emit: resolved definitions -> source text
//! 5. Format: source text -> formatter output

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info};

use crate::emitter::{WARNING_MESSAGE, emit_definitions};
use crate::error::GenerateError;
use crate::format::{FormatOptions, Formatter, NoopFormatter};
use crate::ir::Node;
use crate::passes::{
    PropertyMapper, apply_property_mapper, resolve_composites, resolve_primitives,
    resolve_references,
};
use crate::spec::Document;

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GenerateOptions {
    /// Name of the exported interface; references render as `<container>['Name']`.
    pub container_name: String,
    /// Text placed before the interface.
    pub banner: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            container_name: "definitions".to_string(),
            banner: WARNING_MESSAGE.to_string(),
        }
    }
}

/// Turns Swagger 2.0 definitions into a TypeScript interface.
pub struct Generator {
    options: GenerateOptions,
    mapper: Option<Box<dyn PropertyMapper>>,
    formatter: Box<dyn Formatter>,
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("options", &self.options)
            .field("mapper", &self.mapper.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new(GenerateOptions::default())
    }
}

impl Generator {
    /// Generator with `options`, no mapper, and [`NoopFormatter`].
    pub fn new(options: GenerateOptions) -> Self {
        Generator {
            options,
            mapper: None,
            formatter: Box::new(NoopFormatter),
        }
    }

    /// Consult `mapper` for every object property.
    pub fn with_mapper(mut self, mapper: impl PropertyMapper + 'static) -> Self {
        self.mapper = Some(Box::new(mapper));
        self
    }

    /// Pass the final source through `formatter`.
    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Replace the output settings.
    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Current output settings.
    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Parse `json` and generate.
    pub fn generate_json(&self, json: &str) -> Result<String, GenerateError> {
        self.generate(Document::from_json(json)?)
    }

    /// Parse `yaml` and generate.
    pub fn generate_yaml(&self, yaml: &str) -> Result<String, GenerateError> {
        self.generate(Document::from_yaml(yaml)?)
    }

    /// Generate the interface for an already parsed document.
    ///
    /// Fails with [`GenerateError::MissingDefinitions`] before any other work
    /// when the document has no `definitions`. The formatter runs once, on the
    /// complete source.
    pub fn generate(&self, document: Document) -> Result<String, GenerateError> {
        let definitions = document
            .definitions
            .ok_or(GenerateError::MissingDefinitions)?;
        info!("generating types for {} definitions", definitions.len());

        let container = self.options.container_name.as_str();
        let mut resolved = IndexMap::with_capacity(definitions.len());
        for (name, schema) in definitions {
            debug!("resolving definition '{name}'");
            let node = self.resolve(Node::from(schema), container)?;
            resolved.insert(name, node);
        }

        let source = emit_definitions(resolved, container, &self.options.banner)?;
        Ok(self.formatter.format(&source, &FormatOptions::typescript())?)
    }

    fn resolve(&self, node: Node, container: &str) -> Result<Node, GenerateError> {
        let mut node = resolve_references(node, container);
        if let Some(mapper) = &self.mapper {
            node = apply_property_mapper(node, mapper.as_ref(), container)
                .map_err(GenerateError::Mapper)?;
        }
        Ok(resolve_composites(resolve_primitives(node)))
    }
}

/// Generate with default options, no mapper, and no formatting.
pub fn generate(json: &str) -> Result<String, GenerateError> {
    Generator::default().generate_json(json)
}
