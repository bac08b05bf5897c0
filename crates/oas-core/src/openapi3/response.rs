use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::link::Link;
use super::media_type::{MediaType, MediaTypeBuilder};
use super::parameter::{Header, HeaderBuilder};
use crate::build::{Build, BuildContext, Component, ComponentKind, Decode, Fields, resolve_map};
use crate::error::{BuildError, DecodeError};
use crate::model::{Reference, Resolved};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Resolved<Header>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub links: IndexMap<String, Resolved<Link>>,
}

#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    pub description: String,
    pub headers: IndexMap<String, Reference<HeaderBuilder>>,
    pub content: IndexMap<String, MediaTypeBuilder>,
    pub links: IndexMap<String, Reference<Link>>,
}

impl Decode for ResponseBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "response")?;
        Ok(ResponseBuilder {
            description: fields.required("description")?,
            headers: fields.nested_map("headers")?,
            content: fields.nested_map("content")?,
            links: fields.nested_map("links")?,
        })
    }
}

impl Build for ResponseBuilder {
    type Output = Response;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Response, BuildError> {
        Ok(Response {
            description: self.description.clone(),
            headers: resolve_map(cx, &self.headers)?,
            content: self.content.build(cx)?,
            links: resolve_map(cx, &self.links)?,
        })
    }
}

impl Component for ResponseBuilder {
    const KIND: ComponentKind = ComponentKind::Responses;
}
