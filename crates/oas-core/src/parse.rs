//! Entry points: raw text in, resolved document out.

use serde::Serialize;
use serde_json::Value;

use crate::build::SpecFormat;
use crate::error::ParseError;
use crate::model::{Info, Version};
use crate::openapi3::{OpenApi3, OpenApi3Builder};
use crate::swagger2::{Swagger2, Swagger2Builder};

/// A resolved document of either format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Swagger2(Box<Swagger2>),
    OpenApi3(Box<OpenApi3>),
}

impl Document {
    pub fn format(&self) -> SpecFormat {
        match self {
            Document::Swagger2(_) => SpecFormat::Swagger2,
            Document::OpenApi3(_) => SpecFormat::OpenApi3,
        }
    }

    pub fn version(&self) -> &Version {
        match self {
            Document::Swagger2(document) => &document.version,
            Document::OpenApi3(document) => &document.version,
        }
    }

    pub fn info(&self) -> &Info {
        match self {
            Document::Swagger2(document) => &document.info,
            Document::OpenApi3(document) => &document.info,
        }
    }

    pub fn as_swagger2(&self) -> Option<&Swagger2> {
        match self {
            Document::Swagger2(document) => Some(&**document),
            Document::OpenApi3(_) => None,
        }
    }

    pub fn as_openapi3(&self) -> Option<&OpenApi3> {
        match self {
            Document::OpenApi3(document) => Some(&**document),
            Document::Swagger2(_) => None,
        }
    }
}

/// The format a raw document declares through its top-level `swagger` or
/// `openapi` field.
pub fn detect_format(value: &Value) -> Result<SpecFormat, ParseError> {
    if value.get("swagger").is_some() {
        Ok(SpecFormat::Swagger2)
    } else if value.get("openapi").is_some() {
        Ok(SpecFormat::OpenApi3)
    } else {
        Err(ParseError::UnknownFormat)
    }
}

/// Decode and resolve a raw document, detecting its format.
pub fn from_value(value: &Value) -> Result<Document, ParseError> {
    from_value_as(value, detect_format(value)?)
}

/// Decode and resolve a raw document as the given format.
pub fn from_value_as(value: &Value, format: SpecFormat) -> Result<Document, ParseError> {
    Ok(match format {
        SpecFormat::Swagger2 => {
            Document::Swagger2(Box::new(Swagger2Builder::from_value(value)?.build()?))
        }
        SpecFormat::OpenApi3 => {
            Document::OpenApi3(Box::new(OpenApi3Builder::from_value(value)?.build()?))
        }
    })
}

/// Parse a document from JSON.
pub fn from_json(input: &str) -> Result<Document, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    from_value(&value)
}

/// Parse a document from YAML.
pub fn from_yaml(input: &str) -> Result<Document, ParseError> {
    let value: Value = serde_yaml_ng::from_str(input)?;
    from_value(&value)
}

pub fn swagger2_from_json(input: &str) -> Result<Swagger2, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    Ok(Swagger2Builder::from_value(&value)?.build()?)
}

pub fn openapi3_from_json(input: &str) -> Result<OpenApi3, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    Ok(OpenApi3Builder::from_value(&value)?.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_by_version_key() {
        let document = from_json(
            r#"{"swagger": "2.0", "info": {"title": "t", "version": "1"}, "paths": {}}"#,
        )
        .unwrap();
        assert_eq!(document.format(), SpecFormat::Swagger2);
        assert_eq!(document.info().title, "t");

        let document =
            from_yaml("openapi: 3.0.0\ninfo:\n  title: t\n  version: '1'\npaths: {}\n").unwrap();
        assert_eq!(document.format(), SpecFormat::OpenApi3);
        assert_eq!(document.version().to_string(), "3.0.0");
    }

    #[test]
    fn neither_version_key_is_unknown() {
        let err = from_json(r#"{"info": {"title": "t", "version": "1"}}"#).unwrap_err();
        assert!(matches!(err, ParseError::UnknownFormat));
    }

    #[test]
    fn explicit_format_overrides_detection() {
        let value: Value = serde_json::from_str(r#"{"openapi": "3.0.0"}"#).unwrap();
        let err = from_value_as(&value, SpecFormat::Swagger2).unwrap_err();
        assert!(matches!(err, ParseError::Decode(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(from_json("{"), Err(ParseError::Json(_))));
    }
}
