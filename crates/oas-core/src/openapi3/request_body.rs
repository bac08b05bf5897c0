use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::media_type::{MediaType, MediaTypeBuilder};
use crate::build::{Build, BuildContext, Component, ComponentKind, Decode, Fields};
use crate::error::{BuildError, DecodeError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: IndexMap<String, MediaType>,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct RequestBodyBuilder {
    pub description: Option<String>,
    pub content: IndexMap<String, MediaTypeBuilder>,
    pub required: bool,
}

impl Decode for RequestBodyBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "request body")?;
        if !fields.contains("content") {
            return Err(fields.missing("content"));
        }
        Ok(RequestBodyBuilder {
            description: fields.optional("description"),
            content: fields.nested_map("content")?,
            required: fields.flag("required"),
        })
    }
}

impl Build for RequestBodyBuilder {
    type Output = RequestBody;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<RequestBody, BuildError> {
        Ok(RequestBody {
            description: self.description.clone(),
            content: self.content.build(cx)?,
            required: self.required,
        })
    }
}

impl Component for RequestBodyBuilder {
    const KIND: ComponentKind = ComponentKind::RequestBodies;
}
