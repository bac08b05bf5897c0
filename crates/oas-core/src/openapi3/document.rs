use std::any::Any;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use serde_json::Value;

use super::components::{Components, ComponentsBuilder};
use super::operation::{PathItem, PathItemBuilder};
use crate::build::{Build, BuildContext, ComponentKind, ComponentSource, Fields, SpecFormat};
use crate::error::{BuildError, ParseError};
use crate::model::{ExternalDocumentation, Info, SecurityRequirement, Server, Tag, Version};
use crate::swagger2::document::document_version;

/// A resolved OpenAPI 3.0 document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApi3 {
    pub version: Version,
    pub info: Info,
    /// Never empty: a document without servers gets the root server `/`.
    pub servers: Vec<Server>,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
}

#[derive(Debug, Clone)]
pub struct OpenApi3Builder {
    pub version: Version,
    pub info: Info,
    pub servers: Vec<Server>,
    pub paths: IndexMap<String, PathItemBuilder>,
    pub components: ComponentsBuilder,
    pub security: Vec<SecurityRequirement>,
    pub tags: Vec<Tag>,
    pub external_docs: Option<ExternalDocumentation>,
}

impl OpenApi3Builder {
    /// Decode a raw document. The `openapi` version is checked before
    /// anything else is read.
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let fields = Fields::of(value, "openapi document")?;
        let version = document_version(&fields, "openapi")?.expect_openapi3()?;
        debug!("Decoding openapi {version} document");

        let mut servers: Vec<Server> = fields.list("servers");
        if servers.is_empty() {
            servers.push(Server::root());
        }

        Ok(OpenApi3Builder {
            version,
            info: fields.required("info")?,
            servers,
            paths: fields.required_nested_map("paths")?,
            components: fields.nested("components")?.unwrap_or_default(),
            security: fields.list("security"),
            tags: fields.list("tags"),
            external_docs: fields.optional("externalDocs"),
        })
    }

    /// Resolve every reference and produce the document.
    pub fn build(&self) -> Result<OpenApi3, BuildError> {
        let mut cx = BuildContext::new(self);
        cx.setup();
        let document = self.build_in(&mut cx);
        cx.teardown();
        document
    }

    fn build_in(&self, cx: &mut BuildContext<'_>) -> Result<OpenApi3, BuildError> {
        let components = self.components.build_in(cx)?;
        let paths = self.paths.build(cx)?;

        Ok(OpenApi3 {
            version: self.version.clone(),
            info: self.info.clone(),
            servers: self.servers.clone(),
            paths,
            components,
            security: self.security.clone(),
            tags: self.tags.clone(),
            external_docs: self.external_docs.clone(),
        })
    }
}

impl ComponentSource for OpenApi3Builder {
    fn format(&self) -> SpecFormat {
        SpecFormat::OpenApi3
    }

    fn table(&self, kind: ComponentKind) -> Option<&dyn Any> {
        Some(self.components.table(kind))
    }
}
