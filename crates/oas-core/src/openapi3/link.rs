use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::{Build, BuildContext, Component, ComponentKind, Decode, Fields};
use crate::error::{BuildError, DecodeError};
use crate::model::Server;

/// A design-time link from a response to another operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Parameter name to a constant or runtime expression.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<Server>,
}

impl Decode for Link {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "link")?;
        Ok(Link {
            operation_ref: fields.optional("operationRef"),
            operation_id: fields.optional("operationId"),
            parameters: fields.optional("parameters").unwrap_or_default(),
            request_body: fields.raw("requestBody").cloned(),
            description: fields.optional("description"),
            server: fields.optional("server"),
        })
    }
}

impl Build for Link {
    type Output = Link;

    fn build(&self, _cx: &mut BuildContext<'_>) -> Result<Link, BuildError> {
        Ok(self.clone())
    }
}

impl Component for Link {
    const KIND: ComponentKind = ComponentKind::Links;
}
