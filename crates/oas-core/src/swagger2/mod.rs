//! Swagger 2.0 documents.

pub mod document;
pub mod items;
pub mod operation;
pub mod parameter;
pub mod response;
pub mod security;

pub use document::{Swagger2, Swagger2Builder, TransferScheme};
pub use items::{ArrayItem, CollectionFormat, IntegerItem, Items, ItemsType, NumberItem, StringItem};
pub use operation::{Operation, PathItem};
pub use parameter::{FixedParameterFields, Parameter, ParameterLocation};
pub use response::Response;
pub use security::{ApiKeyLocation, OAuth2Flow, SecurityScheme};
