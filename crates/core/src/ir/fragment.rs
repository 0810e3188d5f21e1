//! Decoding of type text that re-enters the tree from outside the pipeline.
//!
//! A property mapper answers with a type as text. That text is one of three
//! things, tried in order:
//! 1. a type category the passes already understand (`integer`, `object`, ...)
//! 2. a JSON schema fragment (`{"type": "array", "items": {...}}`), which is
//!    spliced back in as structure
//! 3. anything else: target-language text, used verbatim
//!
//! Text that looks like a fragment but does not parse falls through to (3).
//! A single odd property is not worth failing the whole document for.

use tracing::debug;

use super::utils::is_known_category;
use crate::spec::Schema;

/// Decoded form of a type string.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A category handled by the primitive or composite pass.
    DeclaredType(String),
    /// A re-embedded schema fragment.
    Schema(Box<Schema>),
    /// Opaque TypeScript text.
    Verbatim(String),
}

impl Fragment {
    /// Classify `text`. Never fails; unparseable text is [`Fragment::Verbatim`].
    pub fn decode(text: &str) -> Self {
        let trimmed = text.trim();
        if is_known_category(trimmed) {
            return Fragment::DeclaredType(trimmed.to_string());
        }
        if trimmed.starts_with('{') {
            match serde_json::from_str::<Schema>(trimmed) {
                Ok(schema) => return Fragment::Schema(Box::new(schema)),
                Err(e) => debug!("type text is not a schema fragment ({e}), using it verbatim"),
            }
        }
        Fragment::Verbatim(text.to_string())
    }
}
