//! The resolved document model shared by both formats.

pub mod algebra;
pub mod format;
pub mod info;
pub mod metadata;
pub mod reference;
pub mod schema;
pub mod version;

pub use algebra::{Either, OneOrMany, Resolved};
pub use format::{IntegerFormat, NumberFormat, StringFormat};
pub use info::{
    Contact, ExternalDocumentation, Info, License, OperationType, SecurityRequirement, Server,
    ServerVariable, Tag,
};
pub use metadata::{
    ArrayMetadata, DataType, Metadata, NumericMetadata, ObjectMetadata, StringMetadata,
};
pub use reference::{Pointer, Reference, Structure};
pub use schema::{AllOfSchema, ArraySchema, ObjectSchema, Schema, SchemaType};
pub use version::Version;
