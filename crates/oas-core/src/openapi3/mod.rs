//! OpenAPI 3.0 documents.

pub mod callback;
pub mod components;
pub mod document;
pub mod example;
pub mod link;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod security;

pub use callback::Callback;
pub use components::Components;
pub use document::{OpenApi3, OpenApi3Builder};
pub use example::Example;
pub use link::Link;
pub use media_type::{Encoding, MediaType};
pub use operation::{Operation, PathItem};
pub use parameter::{Header, Parameter, ParameterDefinition, ParameterLocation, SerializationStyle};
pub use request_body::RequestBody;
pub use response::Response;
pub use security::{ApiKeyLocation, OAuthFlow, OAuthFlows, SecurityScheme};
