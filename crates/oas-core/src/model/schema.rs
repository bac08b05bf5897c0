use indexmap::IndexMap;
use serde::Serialize;

use super::algebra::{Either, OneOrMany};
use super::format::{IntegerFormat, NumberFormat, StringFormat};
use super::info::ExternalDocumentation;
use super::metadata::{ArrayMetadata, Metadata, ObjectMetadata};
use super::reference::Structure;

/// A resolved schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    pub metadata: Metadata,

    #[serde(rename = "type")]
    pub schema_type: SchemaType,

    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocumentation>,
}

/// The shape of a schema node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum SchemaType {
    /// A named schema reached through a pointer.
    Structure(Structure<Schema>),
    Object(Box<ObjectSchema>),
    Array(Box<ArraySchema>),
    AllOf(AllOfSchema),
    String(Option<StringFormat>),
    Number(Option<NumberFormat>),
    Integer(Option<IntegerFormat>),
    /// Allowed values live in the owning schema's metadata.
    Enumeration,
    Boolean,
    File,
    Any,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema {
    pub metadata: ObjectMetadata,
    pub required: Vec<String>,
    pub properties: IndexMap<String, Schema>,
    /// `false` (the default) forbids extra properties; a schema constrains them.
    pub additional_properties: Either<bool, Schema>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArraySchema {
    pub metadata: ArrayMetadata,
    /// Many items describe a fixed-arity tuple.
    pub items: OneOrMany<Schema>,
    pub additional_items: Either<bool, Schema>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllOfSchema {
    pub subschemas: Vec<Schema>,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
}

impl Schema {
    /// Follow structure links to the schema they name. `None` when a link is
    /// a cycle placeholder.
    pub fn resolved(&self) -> Option<&Schema> {
        match &self.schema_type {
            SchemaType::Structure(structure) => structure.value().and_then(Schema::resolved),
            _ => Some(self),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.schema_type {
            SchemaType::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySchema> {
        match &self.schema_type {
            SchemaType::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_structure(&self) -> Option<&Structure<Schema>> {
        match &self.schema_type {
            SchemaType::Structure(structure) => Some(structure),
            _ => None,
        }
    }
}

impl SchemaType {
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaType::Structure(_) => "structure",
            SchemaType::Object(_) => "object",
            SchemaType::Array(_) => "array",
            SchemaType::AllOf(_) => "allOf",
            SchemaType::String(_) => "string",
            SchemaType::Number(_) => "number",
            SchemaType::Integer(_) => "integer",
            SchemaType::Enumeration => "enumeration",
            SchemaType::Boolean => "boolean",
            SchemaType::File => "file",
            SchemaType::Any => "any",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::metadata::DataType;

    fn string_schema() -> Schema {
        Schema {
            metadata: Metadata::bare(DataType::String),
            schema_type: SchemaType::String(None),
            external_docs: None,
        }
    }

    fn structure(name: &str, value: Option<Schema>) -> Schema {
        Schema {
            metadata: Metadata::bare(DataType::Pointer),
            schema_type: SchemaType::Structure(Structure::new(name, value.map(Arc::new))),
            external_docs: None,
        }
    }

    #[test]
    fn resolved_follows_structure_chains() {
        let chained = structure("Outer", Some(structure("Inner", Some(string_schema()))));
        let target = chained.resolved().unwrap();
        assert_eq!(target.schema_type, SchemaType::String(None));
    }

    #[test]
    fn resolved_stops_at_cycle_placeholder() {
        assert!(structure("Loop", None).resolved().is_none());
    }

    #[test]
    fn kind_names_match_type_keywords() {
        assert_eq!(string_schema().schema_type.kind_name(), "string");
        assert_eq!(structure("A", None).schema_type.kind_name(), "structure");
    }
}
