use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::{Decode, Fields};
use crate::error::{DecodeError, DecodeErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OAuth2Flow {
    Implicit,
    Password,
    Application,
    AccessCode,
}

/// An entry of `securityDefinitions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SecurityScheme {
    Basic {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    ApiKey {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        flow: OAuth2Flow,
        #[serde(rename = "authorizationUrl", default, skip_serializing_if = "Option::is_none")]
        authorization_url: Option<String>,
        #[serde(rename = "tokenUrl", default, skip_serializing_if = "Option::is_none")]
        token_url: Option<String>,
        #[serde(default)]
        scopes: IndexMap<String, String>,
    },
}

impl Decode for SecurityScheme {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        Fields::of(value, "security definition")?;
        SecurityScheme::deserialize(value).map_err(|err| {
            DecodeError::new(DecodeErrorKind::InvalidField {
                field: "securityDefinitions".to_string(),
                reason: err.to_string(),
            })
        })
    }
}
