use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::{Build, BuildContext, Component, ComponentKind, Decode, Fields};
use crate::error::{BuildError, DecodeError};

/// Examples hold no references, so the decoded value is its own builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,
}

impl Decode for Example {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "example")?;
        Ok(Example {
            summary: fields.optional("summary"),
            description: fields.optional("description"),
            value: fields.raw("value").cloned(),
            external_value: fields.optional("externalValue"),
        })
    }
}

impl Build for Example {
    type Output = Example;

    fn build(&self, _cx: &mut BuildContext<'_>) -> Result<Example, BuildError> {
        Ok(self.clone())
    }
}

impl Component for Example {
    const KIND: ComponentKind = ComponentKind::Examples;
}
