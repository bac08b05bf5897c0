use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::example::Example;
use super::parameter::{Header, HeaderBuilder, SerializationStyle};
use crate::build::schema::SchemaBuilder;
use crate::build::{Build, BuildContext, Decode, Fields, resolve_map, resolve_reference};
use crate::error::{BuildError, DecodeError};
use crate::model::{Reference, Resolved, Schema};

/// Payload description for one media type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Resolved<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, Resolved<Example>>,
    /// Per-property encoding for multipart and form bodies.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub encoding: IndexMap<String, Encoding>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, Resolved<Header>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<SerializationStyle>,
    pub explode: bool,
    pub allow_reserved: bool,
}

#[derive(Debug, Clone)]
pub struct MediaTypeBuilder {
    pub schema: Option<Reference<SchemaBuilder>>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Reference<Example>>,
    pub encoding: IndexMap<String, EncodingBuilder>,
}

#[derive(Debug, Clone)]
pub struct EncodingBuilder {
    pub content_type: Option<String>,
    pub headers: IndexMap<String, Reference<HeaderBuilder>>,
    pub style: Option<SerializationStyle>,
    pub explode: bool,
    pub allow_reserved: bool,
}

impl Decode for MediaTypeBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "media type")?;
        Ok(MediaTypeBuilder {
            schema: fields.nested("schema")?,
            example: fields.raw("example").cloned(),
            examples: fields.nested_map("examples")?,
            encoding: fields.nested_map("encoding")?,
        })
    }
}

impl Decode for EncodingBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "encoding")?;
        let style: Option<SerializationStyle> = fields.optional("style");
        // `form` explodes unless told otherwise.
        let explode = fields
            .optional("explode")
            .unwrap_or(style.is_none_or(|style| style == SerializationStyle::Form));
        Ok(EncodingBuilder {
            content_type: fields.optional("contentType"),
            headers: fields.nested_map("headers")?,
            style,
            explode,
            allow_reserved: fields.flag("allowReserved"),
        })
    }
}

impl Build for MediaTypeBuilder {
    type Output = MediaType;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<MediaType, BuildError> {
        let schema = self
            .schema
            .as_ref()
            .map(|schema| resolve_reference(cx, schema))
            .transpose()?;
        Ok(MediaType {
            schema,
            example: self.example.clone(),
            examples: resolve_map(cx, &self.examples)?,
            encoding: self.encoding.build(cx)?,
        })
    }
}

impl Build for EncodingBuilder {
    type Output = Encoding;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Encoding, BuildError> {
        Ok(Encoding {
            content_type: self.content_type.clone(),
            headers: resolve_map(cx, &self.headers)?,
            style: self.style,
            explode: self.explode,
            allow_reserved: self.allow_reserved,
        })
    }
}
