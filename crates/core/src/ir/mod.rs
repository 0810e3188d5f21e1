//! Intermediate representation for Swagger definitions to TypeScript generation.
//!
//! ## Module Structure
//!
//! - `node`: the schema tree the passes walk (`Node`, `SchemaNode`, `RequiredSet`)
//! - `types`: TypeScript expression IR (`TsType`, `TsObject`, `TsProp`)
//! - `emit`: expression IR -> code strings (via the `Emit` trait)
//! - `fragment`: decoding of type text handed back by property mappers
//! - `utils`: primitive table and quoting helpers

pub mod emit;
pub mod fragment;
pub mod node;
pub mod types;
pub mod utils;

pub use emit::Emit;
pub use fragment::Fragment;
pub use node::{AdditionalRule, Node, RequiredSet, SchemaNode, Shape};
pub use types::{TsObject, TsPrimitive, TsProp, TsType};
