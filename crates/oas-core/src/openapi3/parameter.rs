use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::example::Example;
use super::media_type::{MediaType, MediaTypeBuilder};
use crate::build::schema::SchemaBuilder;
use crate::build::{
    Build, BuildContext, Component, ComponentKind, Decode, Fields, resolve_map, resolve_reference,
};
use crate::error::{BuildError, DecodeError};
use crate::model::{Reference, Resolved, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// How a parameter value is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SerializationStyle {
    Matrix,
    Label,
    Form,
    Simple,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
}

/// Everything a parameter says about its value. Headers are exactly this,
/// without a name or location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub deprecated: bool,
    pub allow_empty_value: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<SerializationStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    pub allow_reserved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Resolved<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, Resolved<Example>>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

pub type Header = ParameterDefinition;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(flatten)]
    pub definition: ParameterDefinition,
}

#[derive(Debug, Clone)]
pub struct ParameterDefinitionBuilder {
    pub description: Option<String>,
    pub required: bool,
    pub deprecated: bool,
    pub allow_empty_value: bool,
    pub style: Option<SerializationStyle>,
    pub explode: Option<bool>,
    pub allow_reserved: bool,
    pub schema: Option<Reference<SchemaBuilder>>,
    pub example: Option<Value>,
    pub examples: IndexMap<String, Reference<Example>>,
    pub content: IndexMap<String, MediaTypeBuilder>,
}

#[derive(Debug, Clone)]
pub struct ParameterBuilder {
    pub name: String,
    pub location: ParameterLocation,
    pub definition: ParameterDefinitionBuilder,
}

/// Distinct from [`ParameterDefinitionBuilder`] so headers get their own
/// component table.
#[derive(Debug, Clone)]
pub struct HeaderBuilder(pub ParameterDefinitionBuilder);

impl Decode for ParameterDefinitionBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "parameter")?;
        Ok(ParameterDefinitionBuilder {
            description: fields.optional("description"),
            required: fields.flag("required"),
            deprecated: fields.flag("deprecated"),
            allow_empty_value: fields.flag("allowEmptyValue"),
            style: fields.optional("style"),
            explode: fields.optional("explode"),
            allow_reserved: fields.flag("allowReserved"),
            schema: fields.nested("schema")?,
            example: fields.raw("example").cloned(),
            examples: fields.nested_map("examples")?,
            content: fields.nested_map("content")?,
        })
    }
}

impl Decode for ParameterBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "parameter")?;
        Ok(ParameterBuilder {
            name: fields.required("name")?,
            location: fields.required("in")?,
            definition: ParameterDefinitionBuilder::decode(value)?,
        })
    }
}

impl Decode for HeaderBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        ParameterDefinitionBuilder::decode(value).map(HeaderBuilder)
    }
}

impl Build for ParameterDefinitionBuilder {
    type Output = ParameterDefinition;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<ParameterDefinition, BuildError> {
        let schema = self
            .schema
            .as_ref()
            .map(|schema| resolve_reference(cx, schema))
            .transpose()?;
        Ok(ParameterDefinition {
            description: self.description.clone(),
            required: self.required,
            deprecated: self.deprecated,
            allow_empty_value: self.allow_empty_value,
            style: self.style,
            explode: self.explode,
            allow_reserved: self.allow_reserved,
            schema,
            example: self.example.clone(),
            examples: resolve_map(cx, &self.examples)?,
            content: self.content.build(cx)?,
        })
    }
}

impl Build for ParameterBuilder {
    type Output = Parameter;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Parameter, BuildError> {
        Ok(Parameter {
            name: self.name.clone(),
            location: self.location,
            definition: self.definition.build(cx)?,
        })
    }
}

impl Build for HeaderBuilder {
    type Output = Header;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Header, BuildError> {
        self.0.build(cx)
    }
}

impl Component for ParameterBuilder {
    const KIND: ComponentKind = ComponentKind::Parameters;
}

impl Component for HeaderBuilder {
    const KIND: ComponentKind = ComponentKind::Headers;
}
