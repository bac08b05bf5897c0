use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::items::Items;
use crate::build::schema::SchemaBuilder;
use crate::build::{Build, BuildContext, Component, ComponentKind, Decode, Fields};
use crate::error::{BuildError, DecodeError};
use crate::model::Schema;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Items>,

    /// Example payloads keyed by MIME type.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, Value>,
}

#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    pub description: String,
    pub schema: Option<SchemaBuilder>,
    pub headers: IndexMap<String, Items>,
    pub examples: IndexMap<String, Value>,
}

impl Decode for ResponseBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "response")?;
        Ok(ResponseBuilder {
            description: fields.required("description")?,
            schema: fields.nested("schema")?,
            headers: fields.nested_map("headers")?,
            examples: fields.optional("examples").unwrap_or_default(),
        })
    }
}

impl Build for ResponseBuilder {
    type Output = Response;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Response, BuildError> {
        Ok(Response {
            description: self.description.clone(),
            schema: self.schema.build(cx)?,
            headers: self.headers.clone(),
            examples: self.examples.clone(),
        })
    }
}

impl Component for ResponseBuilder {
    const KIND: ComponentKind = ComponentKind::Responses;
}
