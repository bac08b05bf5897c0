//! Two-phase construction: raw nodes decode into builders, builders build
//! into the resolved model.

pub mod context;
pub mod decode;
pub mod resolver;
pub mod schema;

pub use context::{Build, BuildContext, Component, ComponentKind, ComponentSource, SpecFormat, Table};
pub use decode::{Decode, Fields};
pub use resolver::{resolve, resolve_map, resolve_named, resolve_reference, resolve_table};
pub use schema::SchemaBuilder;
