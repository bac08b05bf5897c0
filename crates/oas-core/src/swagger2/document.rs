use std::any::Any;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operation::{PathItem, PathItemBuilder};
use super::parameter::{Parameter, ParameterBuilder};
use super::response::{Response, ResponseBuilder};
use super::security::SecurityScheme;
use crate::build::schema::SchemaBuilder;
use crate::build::{
    Build, BuildContext, ComponentKind, ComponentSource, Fields, SpecFormat, Table,
    resolve_table,
};
use crate::error::{BuildError, DecodeError, DecodeErrorKind, ParseError};
use crate::model::reference::serialize_table;
use crate::model::{
    ExternalDocumentation, Info, Schema, SecurityRequirement, Structure, Tag, Version,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferScheme {
    Http,
    Https,
    Ws,
    Wss,
}

/// A resolved Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swagger2 {
    pub version: Version,
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<TransferScheme>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    pub paths: IndexMap<String, PathItem>,
    #[serde(serialize_with = "serialize_table")]
    pub definitions: IndexMap<String, Structure<Schema>>,
    #[serde(serialize_with = "serialize_table")]
    pub parameters: IndexMap<String, Structure<Parameter>>,
    #[serde(serialize_with = "serialize_table")]
    pub responses: IndexMap<String, Structure<Response>>,
    pub security_definitions: IndexMap<String, SecurityScheme>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
}

/// A decoded Swagger 2.0 document whose references are not yet resolved.
#[derive(Debug, Clone)]
pub struct Swagger2Builder {
    pub version: Version,
    pub info: Info,
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Vec<TransferScheme>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub paths: IndexMap<String, PathItemBuilder>,
    pub definitions: Table<SchemaBuilder>,
    pub parameters: Table<ParameterBuilder>,
    pub responses: Table<ResponseBuilder>,
    pub security_definitions: IndexMap<String, SecurityScheme>,
    pub security: Vec<SecurityRequirement>,
    pub tags: Vec<Tag>,
    pub external_docs: Option<ExternalDocumentation>,
}

impl Swagger2Builder {
    /// Decode a raw document. The `swagger` version is checked before
    /// anything else is read.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let fields = Fields::of(value, "swagger document")?;
        let version = document_version(&fields, "swagger")?.expect_swagger2()?;
        debug!("Decoding swagger {version} document");

        Ok(Swagger2Builder {
            version,
            info: fields.required("info")?,
            host: fields.optional("host"),
            base_path: fields.optional("basePath"),
            schemes: fields.list("schemes"),
            consumes: fields.list("consumes"),
            produces: fields.list("produces"),
            paths: fields.required_nested_map("paths")?,
            definitions: fields.nested_map("definitions")?,
            parameters: fields.nested_map("parameters")?,
            responses: fields.nested_map("responses")?,
            security_definitions: fields.nested_map("securityDefinitions")?,
            security: fields.list("security"),
            tags: fields.list("tags"),
            external_docs: fields.optional("externalDocs"),
        })
    }

    /// Resolve every reference and produce the document.
    pub fn build(&self) -> Result<Swagger2, BuildError> {
        let mut cx = BuildContext::new(self);
        cx.setup();
        let document = self.build_in(&mut cx);
        cx.teardown();
        document
    }

    fn build_in(&self, cx: &mut BuildContext<'_>) -> Result<Swagger2, BuildError> {
        // Component tables first, so paths only ever see finished values.
        let definitions = resolve_table(cx, &self.definitions)?;
        let parameters = resolve_table(cx, &self.parameters)?;
        let responses = resolve_table(cx, &self.responses)?;
        let paths = self.paths.build(cx)?;

        Ok(Swagger2 {
            version: self.version.clone(),
            info: self.info.clone(),
            host: self.host.clone(),
            base_path: self.base_path.clone(),
            schemes: self.schemes.clone(),
            consumes: self.consumes.clone(),
            produces: self.produces.clone(),
            paths,
            definitions,
            parameters,
            responses,
            security_definitions: self.security_definitions.clone(),
            security: self.security.clone(),
            tags: self.tags.clone(),
            external_docs: self.external_docs.clone(),
        })
    }
}

impl ComponentSource for Swagger2Builder {
    fn format(&self) -> SpecFormat {
        SpecFormat::Swagger2
    }

    fn table(&self, kind: ComponentKind) -> Option<&dyn Any> {
        match kind {
            ComponentKind::Schemas => Some(&self.definitions as &dyn Any),
            ComponentKind::Parameters => Some(&self.parameters as &dyn Any),
            ComponentKind::Responses => Some(&self.responses as &dyn Any),
            _ => None,
        }
    }
}

/// Read and parse the version field named `key`, accepting a string or a
/// bare number.
pub(crate) fn document_version(fields: &Fields<'_>, key: &str) -> Result<Version, ParseError> {
    let text = match fields.raw(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => {
            return Err(DecodeError::new(DecodeErrorKind::InvalidField {
                field: key.to_string(),
                reason: format!("expected a version string, found {other}"),
            })
            .into());
        }
        None => return Err(DecodeError::new(DecodeErrorKind::MissingField(key.to_string())).into()),
    };
    Ok(text.parse()?)
}
