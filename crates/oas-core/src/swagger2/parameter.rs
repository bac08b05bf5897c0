use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::items::Items;
use crate::build::schema::SchemaBuilder;
use crate::build::{Build, BuildContext, Component, ComponentKind, Decode, Fields};
use crate::error::{BuildError, DecodeError};
use crate::model::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    FormData,
    Body,
}

/// Fields shared by every parameter location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedParameterFields {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub required: bool,

    /// `x-example`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// A body parameter carries a schema; every other location is described by
/// items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parameter {
    Body {
        #[serde(flatten)]
        fixed: FixedParameterFields,
        schema: Schema,
    },
    Other {
        #[serde(flatten)]
        fixed: FixedParameterFields,
        items: Items,
    },
}

impl Parameter {
    pub fn fixed(&self) -> &FixedParameterFields {
        match self {
            Parameter::Body { fixed, .. } | Parameter::Other { fixed, .. } => fixed,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ParameterBuilder {
    Body {
        fixed: FixedParameterFields,
        schema: SchemaBuilder,
    },
    Other {
        fixed: FixedParameterFields,
        items: Items,
    },
}

impl Decode for FixedParameterFields {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "parameter")?;
        Ok(FixedParameterFields {
            name: fields.required("name")?,
            location: fields.required("in")?,
            description: fields.optional("description"),
            required: fields.flag("required"),
            example: fields.raw("x-example").cloned(),
        })
    }
}

impl Decode for ParameterBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "parameter")?;
        let fixed = FixedParameterFields::decode(value)?;
        Ok(match fixed.location {
            ParameterLocation::Body => ParameterBuilder::Body {
                fixed,
                schema: fields.required_nested("schema")?,
            },
            _ => ParameterBuilder::Other {
                fixed,
                items: Items::decode(value)?,
            },
        })
    }
}

impl Build for ParameterBuilder {
    type Output = Parameter;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Parameter, BuildError> {
        Ok(match self {
            ParameterBuilder::Body { fixed, schema } => Parameter::Body {
                fixed: fixed.clone(),
                schema: schema.build(cx)?,
            },
            ParameterBuilder::Other { fixed, items } => Parameter::Other {
                fixed: fixed.clone(),
                items: items.clone(),
            },
        })
    }
}

impl Component for ParameterBuilder {
    const KIND: ComponentKind = ComponentKind::Parameters;
}
