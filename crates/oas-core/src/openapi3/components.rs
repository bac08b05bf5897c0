use std::any::Any;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::callback::{Callback, CallbackBuilder};
use super::example::Example;
use super::link::Link;
use super::parameter::{Header, HeaderBuilder, Parameter, ParameterBuilder};
use super::request_body::{RequestBody, RequestBodyBuilder};
use super::response::{Response, ResponseBuilder};
use super::security::SecurityScheme;
use crate::build::schema::SchemaBuilder;
use crate::build::{
    BuildContext, ComponentKind, Decode, Fields, Table, resolve_table,
};
use crate::error::{BuildError, DecodeError};
use crate::model::reference::serialize_table;
use crate::model::{Schema, Structure};

/// Every reusable component, resolved and named.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(serialize_with = "serialize_table")]
    pub schemas: IndexMap<String, Structure<Schema>>,
    #[serde(serialize_with = "serialize_table")]
    pub parameters: IndexMap<String, Structure<Parameter>>,
    #[serde(serialize_with = "serialize_table")]
    pub responses: IndexMap<String, Structure<Response>>,
    #[serde(serialize_with = "serialize_table")]
    pub security_schemes: IndexMap<String, Structure<SecurityScheme>>,
    #[serde(serialize_with = "serialize_table")]
    pub examples: IndexMap<String, Structure<Example>>,
    #[serde(serialize_with = "serialize_table")]
    pub request_bodies: IndexMap<String, Structure<RequestBody>>,
    #[serde(serialize_with = "serialize_table")]
    pub headers: IndexMap<String, Structure<Header>>,
    #[serde(serialize_with = "serialize_table")]
    pub links: IndexMap<String, Structure<Link>>,
    #[serde(serialize_with = "serialize_table")]
    pub callbacks: IndexMap<String, Structure<Callback>>,
}

#[derive(Debug, Clone, Default)]
pub struct ComponentsBuilder {
    pub schemas: Table<SchemaBuilder>,
    pub parameters: Table<ParameterBuilder>,
    pub responses: Table<ResponseBuilder>,
    pub security_schemes: Table<SecurityScheme>,
    pub examples: Table<Example>,
    pub request_bodies: Table<RequestBodyBuilder>,
    pub headers: Table<HeaderBuilder>,
    pub links: Table<Link>,
    pub callbacks: Table<CallbackBuilder>,
}

impl ComponentsBuilder {
    /// The table for `kind`, typed as the matching `Table<C>`.
    pub fn table(&self, kind: ComponentKind) -> &dyn Any {
        match kind {
            ComponentKind::Schemas => &self.schemas as &dyn Any,
            ComponentKind::Parameters => &self.parameters as &dyn Any,
            ComponentKind::Responses => &self.responses as &dyn Any,
            ComponentKind::SecuritySchemes => &self.security_schemes as &dyn Any,
            ComponentKind::Examples => &self.examples as &dyn Any,
            ComponentKind::RequestBodies => &self.request_bodies as &dyn Any,
            ComponentKind::Headers => &self.headers as &dyn Any,
            ComponentKind::Links => &self.links as &dyn Any,
            ComponentKind::Callbacks => &self.callbacks as &dyn Any,
        }
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
            + self.parameters.len()
            + self.responses.len()
            + self.security_schemes.len()
            + self.examples.len()
            + self.request_bodies.len()
            + self.headers.len()
            + self.links.len()
            + self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve every table, in a fixed order.
    pub fn build_in(&self, cx: &mut BuildContext<'_>) -> Result<Components, BuildError> {
        Ok(Components {
            schemas: resolve_table(cx, &self.schemas)?,
            parameters: resolve_table(cx, &self.parameters)?,
            responses: resolve_table(cx, &self.responses)?,
            security_schemes: resolve_table(cx, &self.security_schemes)?,
            examples: resolve_table(cx, &self.examples)?,
            request_bodies: resolve_table(cx, &self.request_bodies)?,
            headers: resolve_table(cx, &self.headers)?,
            links: resolve_table(cx, &self.links)?,
            callbacks: resolve_table(cx, &self.callbacks)?,
        })
    }
}

impl Decode for ComponentsBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "components")?;
        Ok(ComponentsBuilder {
            schemas: fields.nested_map("schemas")?,
            parameters: fields.nested_map("parameters")?,
            responses: fields.nested_map("responses")?,
            security_schemes: fields.nested_map("securitySchemes")?,
            examples: fields.nested_map("examples")?,
            request_bodies: fields.nested_map("requestBodies")?,
            headers: fields.nested_map("headers")?,
            links: fields.nested_map("links")?,
            callbacks: fields.nested_map("callbacks")?,
        })
    }
}
