use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::{Build, BuildContext, Component, ComponentKind, Decode, Fields};
use crate::error::{BuildError, DecodeError, DecodeErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,
    #[serde(default)]
    pub scopes: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit: Option<OAuthFlow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<OAuthFlow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<OAuthFlow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<OAuthFlow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SecurityScheme {
    ApiKey {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        name: String,
        #[serde(rename = "in")]
        location: ApiKeyLocation,
    },
    Http {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        scheme: String,
        #[serde(rename = "bearerFormat", default, skip_serializing_if = "Option::is_none")]
        bearer_format: Option<String>,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        flows: OAuthFlows,
    },
    OpenIdConnect {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(rename = "openIdConnectUrl")]
        open_id_connect_url: String,
    },
}

impl Decode for SecurityScheme {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        Fields::of(value, "security scheme")?;
        SecurityScheme::deserialize(value).map_err(|err| {
            DecodeError::new(DecodeErrorKind::InvalidField {
                field: "securitySchemes".to_string(),
                reason: err.to_string(),
            })
        })
    }
}

impl Build for SecurityScheme {
    type Output = SecurityScheme;

    fn build(&self, _cx: &mut BuildContext<'_>) -> Result<SecurityScheme, BuildError> {
        Ok(self.clone())
    }
}

impl Component for SecurityScheme {
    const KIND: ComponentKind = ComponentKind::SecuritySchemes;
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_http_and_oauth2() {
        let bearer = SecurityScheme::decode(&json!({
            "type": "http", "scheme": "bearer", "bearerFormat": "JWT"
        }))
        .unwrap();
        assert!(matches!(bearer, SecurityScheme::Http { ref scheme, .. } if scheme == "bearer"));

        let oauth = SecurityScheme::decode(&json!({
            "type": "oauth2",
            "flows": {
                "clientCredentials": {"tokenUrl": "https://auth/token", "scopes": {"read": "Read"}}
            }
        }))
        .unwrap();
        let SecurityScheme::OAuth2 { flows, .. } = oauth else {
            panic!("expected oauth2");
        };
        let flow = flows.client_credentials.unwrap();
        assert_eq!(flow.token_url.as_deref(), Some("https://auth/token"));
        assert_eq!(flow.scopes["read"], "Read");
        assert!(flows.implicit.is_none());
    }

    #[test]
    fn cookie_api_key_is_accepted() {
        let key = SecurityScheme::decode(&json!({"type": "apiKey", "name": "sid", "in": "cookie"}))
            .unwrap();
        assert!(matches!(key, SecurityScheme::ApiKey { location: ApiKeyLocation::Cookie, .. }));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = SecurityScheme::decode(&json!({"type": "basic"})).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::InvalidField { .. }));
    }
}
