#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Swagger 2.0 `definitions` to TypeScript.
//!
//! Every named schema in a document's `definitions` becomes a member of one
//! exported interface:
//!
//! ```text
//! export interface definitions {
//!   "Pet": { name: string; age?: number };
//!   "Dog": definitions['Pet'] & { breed?: string };
//! }
//! ```
//!
//! Use [`generate`] for the defaults, or [`Generator`] to plug in a
//! [`PropertyMapper`] or a [`Formatter`].

pub mod emitter;
pub mod error;
pub mod format;
pub mod generator;
pub mod ir;
pub mod passes;
pub mod spec;

pub use emitter::WARNING_MESSAGE;
pub use error::{BoxError, FormatError, GenerateError};
pub use format::{CommandFormatter, FormatOptions, Formatter, NoopFormatter, SourceParser};
pub use generator::{GenerateOptions, Generator, generate};
pub use ir::{Node, SchemaNode, TsType};
pub use passes::{PropertyContext, PropertyMapper, PropertyMapping};
pub use spec::{Document, Schema};
