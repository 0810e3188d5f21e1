//! The resolver passes, in the order the generator runs them.
//!
//! 1. `refs`: `$ref` pointers -> container lookups
//! 2. `mapper`: optional per-property user overrides
//! 3. `primitives`: scalar and enum leaves -> keywords and literal unions
//! 4. `composite`: objects and arrays -> object literals, intersections, arrays
//!
//! Each pass consumes a tree and returns a new one.

pub mod composite;
pub mod mapper;
pub mod primitives;
pub mod refs;

pub use composite::resolve_composites;
pub use mapper::{PropertyContext, PropertyMapper, PropertyMapping, apply_property_mapper};
pub use primitives::resolve_primitives;
pub use refs::resolve_references;
