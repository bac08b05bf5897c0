use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::document::TransferScheme;
use super::parameter::{Parameter, ParameterBuilder};
use super::response::{Response, ResponseBuilder};
use crate::build::{Build, BuildContext, Decode, Fields, resolve_reference};
use crate::error::{BuildError, DecodeError};
use crate::model::{
    ExternalDocumentation, OperationType, Reference, Resolved, SecurityRequirement,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<TransferScheme>,
    pub parameters: Vec<Resolved<Parameter>>,
    pub responses: IndexMap<u16, Resolved<Response>>,
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_response: Option<Resolved<Response>>,
    pub deprecated: bool,
    /// `None` inherits the document requirements; an empty list removes them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,
}

#[derive(Debug, Clone)]
pub struct OperationBuilder {
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub external_docs: Option<ExternalDocumentation>,
    pub operation_id: Option<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub schemes: Vec<TransferScheme>,
    pub parameters: Vec<Reference<ParameterBuilder>>,
    pub responses: IndexMap<u16, Reference<ResponseBuilder>>,
    pub default_response: Option<Reference<ResponseBuilder>>,
    pub deprecated: bool,
    pub security: Option<Vec<SecurityRequirement>>,
}

/// Operations keyed by method, plus parameters shared by all of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathItem {
    pub operations: IndexMap<OperationType, Operation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Resolved<Parameter>>,
}

#[derive(Debug, Clone)]
pub struct PathItemBuilder {
    pub operations: IndexMap<OperationType, OperationBuilder>,
    pub parameters: Vec<Reference<ParameterBuilder>>,
}

impl Decode for OperationBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "operation")?;
        let (responses, default_response) = fields.responses()?;
        Ok(OperationBuilder {
            tags: fields.list("tags"),
            summary: fields.optional("summary"),
            description: fields.optional("description"),
            external_docs: fields.optional("externalDocs"),
            operation_id: fields.optional("operationId"),
            consumes: fields.list("consumes"),
            produces: fields.list("produces"),
            schemes: fields.list("schemes"),
            parameters: fields.nested_list("parameters")?,
            responses,
            default_response,
            deprecated: fields.flag("deprecated"),
            security: fields.optional("security"),
        })
    }
}

impl Decode for PathItemBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "path item")?;
        let mut operations = IndexMap::new();
        for operation_type in OperationType::ALL {
            if let Some(operation) = fields.nested(operation_type.as_str())? {
                operations.insert(operation_type, operation);
            }
        }
        Ok(PathItemBuilder {
            operations,
            parameters: fields.nested_list("parameters")?,
        })
    }
}

impl Build for OperationBuilder {
    type Output = Operation;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Operation, BuildError> {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| resolve_reference(cx, parameter))
            .collect::<Result<_, _>>()?;
        let responses = self
            .responses
            .iter()
            .map(|(code, response)| Ok((*code, resolve_reference(cx, response)?)))
            .collect::<Result<_, BuildError>>()?;
        let default_response = self
            .default_response
            .as_ref()
            .map(|response| resolve_reference(cx, response))
            .transpose()?;

        Ok(Operation {
            tags: self.tags.clone(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            external_docs: self.external_docs.clone(),
            operation_id: self.operation_id.clone(),
            consumes: self.consumes.clone(),
            produces: self.produces.clone(),
            schemes: self.schemes.clone(),
            parameters,
            responses,
            default_response,
            deprecated: self.deprecated,
            security: self.security.clone(),
        })
    }
}

impl Build for PathItemBuilder {
    type Output = PathItem;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<PathItem, BuildError> {
        let mut operations = IndexMap::new();
        for (operation_type, builder) in &self.operations {
            operations.insert(*operation_type, builder.build(cx)?);
        }
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| resolve_reference(cx, parameter))
            .collect::<Result<_, _>>()?;
        Ok(PathItem {
            operations,
            parameters,
        })
    }
}
