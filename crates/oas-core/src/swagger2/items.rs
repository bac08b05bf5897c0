//! Non-body parameter and header descriptions. Items carry no references,
//! so they decode straight into the model.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::build::{Decode, Fields};
use crate::error::{DecodeError, DecodeErrorKind};
use crate::model::{
    ArrayMetadata, DataType, IntegerFormat, Metadata, NumberFormat, NumericMetadata,
    StringFormat, StringMetadata,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Items {
    pub metadata: Metadata,
    #[serde(rename = "type")]
    pub items_type: ItemsType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ItemsType {
    String(StringItem),
    Number(NumberItem),
    Integer(IntegerItem),
    Array(Box<ArrayItem>),
    Boolean,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<StringFormat>,
    pub metadata: StringMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<NumberFormat>,
    pub metadata: NumericMetadata<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegerItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<IntegerFormat>,
    pub metadata: NumericMetadata<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrayItem {
    pub metadata: ArrayMetadata,
    pub items: Items,
    pub collection_format: CollectionFormat,
}

/// How array values are joined in a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    /// `a,b`
    #[default]
    Csv,
    /// `a b`
    Ssv,
    /// `a\tb`
    Tsv,
    /// `a|b`
    Pipes,
    /// Repeated parameter instances, `a=1&a=2`.
    Multi,
}

impl Decode for Items {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "items")?;
        let type_name: String = fields.required("type")?;
        let data_type = DataType::from_type_name(&type_name)
            .ok_or_else(|| DecodeError::new(DecodeErrorKind::UnknownDataType(type_name.clone())))?;

        let items_type = match data_type {
            DataType::String => ItemsType::String(StringItem {
                format: fields.optional("format"),
                metadata: string_metadata(&fields),
            }),
            DataType::Number => ItemsType::Number(NumberItem {
                format: fields.optional("format"),
                metadata: numeric_metadata(&fields),
            }),
            DataType::Integer => ItemsType::Integer(IntegerItem {
                format: fields.optional("format"),
                metadata: numeric_metadata(&fields),
            }),
            DataType::Array => ItemsType::Array(Box::new(ArrayItem {
                metadata: ArrayMetadata::decode(value)?,
                items: fields.required_nested("items")?,
                collection_format: fields.optional("collectionFormat").unwrap_or_default(),
            })),
            DataType::Boolean => ItemsType::Boolean,
            DataType::File => ItemsType::File,
            _ => {
                return Err(DecodeError::new(DecodeErrorKind::UnsupportedDataType(
                    type_name,
                )));
            }
        };

        // The declared type is authoritative here, even next to `enum`.
        let metadata = Metadata {
            data_type,
            ..Metadata::decode(value)?
        };
        Ok(Items {
            metadata,
            items_type,
        })
    }
}

fn string_metadata(fields: &Fields<'_>) -> StringMetadata {
    StringMetadata {
        pattern: fields.optional("pattern"),
        min_length: fields.optional("minLength"),
        max_length: fields.optional("maxLength"),
    }
}

fn numeric_metadata<T: DeserializeOwned>(fields: &Fields<'_>) -> NumericMetadata<T> {
    NumericMetadata {
        minimum: fields.optional("minimum"),
        exclusive_minimum: fields.flag("exclusiveMinimum"),
        maximum: fields.optional("maximum"),
        exclusive_maximum: fields.flag("exclusiveMaximum"),
        multiple_of: fields.optional("multipleOf"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_enum_keeps_string_type() {
        let items = Items::decode(&json!({"type": "string", "enum": ["asc", "desc"]})).unwrap();
        assert_eq!(items.metadata.data_type, DataType::String);
        assert_eq!(items.metadata.enumerated_values.as_ref().map(Vec::len), Some(2));
        assert!(matches!(items.items_type, ItemsType::String(_)));
    }

    #[test]
    fn nested_array_defaults_to_csv() {
        let items = Items::decode(&json!({
            "type": "array",
            "items": {"type": "integer", "format": "int64", "minimum": 1},
            "maxItems": 5
        }))
        .unwrap();
        let ItemsType::Array(array) = items.items_type else {
            panic!("expected array items");
        };
        assert_eq!(array.collection_format, CollectionFormat::Csv);
        assert_eq!(array.metadata.max_items, Some(5));
        let ItemsType::Integer(inner) = array.items.items_type else {
            panic!("expected integer items");
        };
        assert_eq!(inner.format, Some(IntegerFormat::Int64));
        assert_eq!(inner.metadata.minimum, Some(1));
    }

    #[test]
    fn collection_format_is_read() {
        let items = Items::decode(&json!({
            "type": "array", "items": {"type": "string"}, "collectionFormat": "multi"
        }))
        .unwrap();
        let ItemsType::Array(array) = items.items_type else {
            panic!("expected array items");
        };
        assert_eq!(array.collection_format, CollectionFormat::Multi);
    }

    #[test]
    fn object_items_are_unsupported() {
        let err = Items::decode(&json!({"type": "object"})).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::UnsupportedDataType("object".into()));
    }

    #[test]
    fn unknown_items_type_fails() {
        let err = Items::decode(&json!({"type": "decimal"})).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::UnknownDataType("decimal".into()));
    }

    #[test]
    fn items_require_a_type() {
        let err = Items::decode(&json!({"format": "int32"})).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::MissingField(_)));
    }
}
