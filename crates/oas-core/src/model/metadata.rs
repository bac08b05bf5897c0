use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeErrorKind};

/// The declared (or inferred) data type of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Enumeration,
    AllOf,
    Pointer,
    File,
    Any,
}

impl DataType {
    /// Map an explicit `type` keyword.
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "object" => Some(DataType::Object),
            "array" => Some(DataType::Array),
            "string" => Some(DataType::String),
            "number" => Some(DataType::Number),
            "integer" => Some(DataType::Integer),
            "boolean" => Some(DataType::Boolean),
            "file" => Some(DataType::File),
            _ => None,
        }
    }

    /// Infer the data type of a schema node from the keys it carries.
    ///
    /// Structural keys win over the explicit `type` keyword: `$ref`, then
    /// `items`, `allOf`, `properties` and `enum`. Only when none is present is
    /// `type` consulted, and only then can an unknown type name fail.
    #[track_caller]
    pub fn infer(node: &Map<String, Value>) -> Result<Self, DecodeError> {
        if node.contains_key("$ref") {
            return Ok(DataType::Pointer);
        }
        if node.contains_key("items") {
            return Ok(DataType::Array);
        }
        if node.contains_key("allOf") {
            return Ok(DataType::AllOf);
        }
        if node.contains_key("properties") {
            return Ok(DataType::Object);
        }
        if node.contains_key("enum") {
            return Ok(DataType::Enumeration);
        }
        match node.get("type") {
            None | Some(Value::Null) => Ok(DataType::Any),
            Some(Value::String(name)) => Self::from_type_name(name).ok_or_else(|| {
                DecodeError::new(DecodeErrorKind::UnknownDataType(name.clone()))
            }),
            Some(other) => Err(DecodeError::new(DecodeErrorKind::UnknownDataType(
                other.to_string(),
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Object => "object",
            DataType::Array => "array",
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Integer => "integer",
            DataType::Boolean => "boolean",
            DataType::Enumeration => "enumeration",
            DataType::AllOf => "allOf",
            DataType::Pointer => "pointer",
            DataType::File => "file",
            DataType::Any => "any",
        }
    }
}

/// Attributes shared by every schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub data_type: DataType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    /// Allowed values; a JSON `null` member is kept as `None`.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumerated_values: Option<Vec<Option<Value>>>,

    pub nullable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl Metadata {
    /// Metadata carrying only a type tag.
    pub fn bare(data_type: DataType) -> Self {
        Self {
            data_type,
            title: None,
            description: None,
            default_value: None,
            enumerated_values: None,
            nullable: false,
            example: None,
        }
    }
}

/// Bounds on an integer or number.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericMetadata<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<T>,
    pub exclusive_minimum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<T>,
    pub exclusive_maximum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    pub unique_items: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,
    /// Property used to tell subtypes apart.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// `x-abstract`: the schema is an interface, not a concrete model.
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
}
