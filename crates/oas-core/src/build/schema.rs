//! Schema builders.
//!
//! A [`SchemaBuilder`] mirrors one raw schema node with its `$ref`s left as
//! pointers. Building it resolves those pointers into shared structures.
//!
//! `allOf` is format dependent. Swagger 2 documents use it for inheritance
//! and it is merged into a single object schema; OpenAPI 3 keeps the
//! composition as its own shape.

use indexmap::IndexMap;
use log::warn;
use serde_json::Value;

use super::context::{Build, BuildContext, Component, ComponentKind, SpecFormat};
use super::decode::{Decode, Fields};
use super::resolver::resolve;
use crate::error::{BuildError, DecodeError, DecodeErrorKind};
use crate::model::{
    AllOfSchema, ArrayMetadata, ArraySchema, DataType, Either, ExternalDocumentation,
    IntegerFormat, Metadata, NumberFormat, ObjectMetadata, ObjectSchema, OneOrMany, Pointer,
    Schema, SchemaType, StringFormat,
};

impl Decode for Metadata {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "schema")?;
        let enumerated_values = fields.optional::<Vec<Value>>("enum").map(|values| {
            values
                .into_iter()
                .map(|value| (!value.is_null()).then_some(value))
                .collect()
        });
        Ok(Metadata {
            data_type: DataType::infer(fields.node())?,
            title: fields.optional("title"),
            description: fields.optional("description"),
            default_value: fields.raw("default").cloned(),
            enumerated_values,
            nullable: fields
                .optional("nullable")
                .or_else(|| fields.optional("x-nullable"))
                .unwrap_or(false),
            example: fields.raw("x-example").or(fields.raw("example")).cloned(),
        })
    }
}

impl Decode for ObjectMetadata {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "object schema")?;
        // Swagger 2 names the property directly; OpenAPI 3 wraps it.
        let discriminator = match fields.raw("discriminator") {
            None => None,
            Some(Value::String(property)) => Some(property.clone()),
            Some(Value::Object(discriminator)) => discriminator
                .get("propertyName")
                .and_then(Value::as_str)
                .map(str::to_string),
            Some(other) => {
                warn!("Ignoring malformed discriminator {other}");
                None
            }
        };
        Ok(ObjectMetadata {
            min_properties: fields.optional("minProperties"),
            max_properties: fields.optional("maxProperties"),
            discriminator,
            is_abstract: fields.flag("x-abstract"),
        })
    }
}

impl Decode for ArrayMetadata {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "array schema")?;
        Ok(ArrayMetadata {
            min_items: fields.optional("minItems"),
            max_items: fields.optional("maxItems"),
            unique_items: fields.flag("uniqueItems"),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    pub metadata: Metadata,
    pub schema_type: SchemaTypeBuilder,
    pub external_docs: Option<ExternalDocumentation>,
}

/// One variant per shape, chosen once from the inferred [`DataType`].
#[derive(Debug, Clone)]
pub enum SchemaTypeBuilder {
    Pointer(Pointer<SchemaBuilder>),
    Object(Box<ObjectSchemaBuilder>),
    Array(Box<ArraySchemaBuilder>),
    AllOf(Box<AllOfSchemaBuilder>),
    String(Option<StringFormat>),
    Number(Option<NumberFormat>),
    Integer(Option<IntegerFormat>),
    Enumeration,
    Boolean,
    File,
    Any,
}

#[derive(Debug, Clone)]
pub struct ObjectSchemaBuilder {
    pub metadata: ObjectMetadata,
    pub required: Vec<String>,
    pub properties: IndexMap<String, SchemaBuilder>,
    pub additional_properties: Either<bool, SchemaBuilder>,
}

#[derive(Debug, Clone)]
pub struct ArraySchemaBuilder {
    pub metadata: ArrayMetadata,
    pub items: OneOrMany<SchemaBuilder>,
    pub additional_items: Either<bool, SchemaBuilder>,
}

#[derive(Debug, Clone)]
pub struct AllOfSchemaBuilder {
    pub subschemas: Vec<SchemaBuilder>,
    pub is_abstract: bool,
    /// `properties` / `required` written next to `allOf` on the same node.
    pub siblings: Option<ObjectSchemaBuilder>,
}

impl Decode for SchemaBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "schema")?;
        let metadata = Metadata::decode(value)?;
        let schema_type = SchemaTypeBuilder::decode_as(metadata.data_type, value)?;
        Ok(SchemaBuilder {
            metadata,
            schema_type,
            external_docs: fields.optional("externalDocs"),
        })
    }
}

impl SchemaTypeBuilder {
    fn decode_as(data_type: DataType, value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "schema")?;
        Ok(match data_type {
            DataType::Pointer => SchemaTypeBuilder::Pointer(Pointer::decode(value)?),
            DataType::Object => {
                SchemaTypeBuilder::Object(Box::new(ObjectSchemaBuilder::decode(value)?))
            }
            DataType::Array => {
                SchemaTypeBuilder::Array(Box::new(ArraySchemaBuilder::decode(value)?))
            }
            DataType::AllOf => {
                SchemaTypeBuilder::AllOf(Box::new(AllOfSchemaBuilder::decode(value)?))
            }
            DataType::String => SchemaTypeBuilder::String(fields.optional("format")),
            DataType::Number => SchemaTypeBuilder::Number(fields.optional("format")),
            DataType::Integer => SchemaTypeBuilder::Integer(fields.optional("format")),
            DataType::Enumeration => SchemaTypeBuilder::Enumeration,
            DataType::Boolean => SchemaTypeBuilder::Boolean,
            DataType::File => SchemaTypeBuilder::File,
            DataType::Any => SchemaTypeBuilder::Any,
        })
    }
}

impl Decode for ObjectSchemaBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "object schema")?;
        Ok(ObjectSchemaBuilder {
            metadata: ObjectMetadata::decode(value)?,
            required: fields.list("required"),
            properties: fields.nested_map("properties")?,
            additional_properties: fields.flag_or_nested("additionalProperties", false)?,
        })
    }
}

impl Decode for ArraySchemaBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "array schema")?;
        Ok(ArraySchemaBuilder {
            metadata: ArrayMetadata::decode(value)?,
            items: fields.one_or_many("items")?,
            additional_items: fields.flag_or_nested("additionalItems", false)?,
        })
    }
}

impl Decode for AllOfSchemaBuilder {
    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let fields = Fields::of(value, "allOf schema")?;
        let has_siblings = ["properties", "required", "discriminator"]
            .iter()
            .any(|key| fields.contains(key));
        let siblings = if has_siblings {
            Some(ObjectSchemaBuilder::decode(value)?)
        } else {
            None
        };
        Ok(AllOfSchemaBuilder {
            subschemas: fields.nested_list("allOf")?,
            is_abstract: fields.flag("x-abstract"),
            siblings,
        })
    }
}

impl Build for SchemaBuilder {
    type Output = Schema;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<Schema, BuildError> {
        let schema_type = self.schema_type.build(cx)?;
        let mut metadata = self.metadata.clone();
        // A merged allOf is an object from here on.
        if metadata.data_type == DataType::AllOf && matches!(schema_type, SchemaType::Object(_)) {
            metadata.data_type = DataType::Object;
        }
        Ok(Schema {
            metadata,
            schema_type,
            external_docs: self.external_docs.clone(),
        })
    }
}

impl Component for SchemaBuilder {
    const KIND: ComponentKind = ComponentKind::Schemas;
}

impl Build for SchemaTypeBuilder {
    type Output = SchemaType;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<SchemaType, BuildError> {
        Ok(match self {
            SchemaTypeBuilder::Pointer(pointer) => SchemaType::Structure(resolve(cx, pointer)?),
            SchemaTypeBuilder::Object(builder) => SchemaType::Object(Box::new(builder.build(cx)?)),
            SchemaTypeBuilder::Array(builder) => SchemaType::Array(Box::new(builder.build(cx)?)),
            SchemaTypeBuilder::AllOf(builder) => match cx.format() {
                SpecFormat::Swagger2 => SchemaType::Object(Box::new(builder.merge(cx)?)),
                SpecFormat::OpenApi3 => SchemaType::AllOf(builder.build(cx)?),
            },
            SchemaTypeBuilder::String(format) => SchemaType::String(format.clone()),
            SchemaTypeBuilder::Number(format) => SchemaType::Number(*format),
            SchemaTypeBuilder::Integer(format) => SchemaType::Integer(*format),
            SchemaTypeBuilder::Enumeration => SchemaType::Enumeration,
            SchemaTypeBuilder::Boolean => SchemaType::Boolean,
            SchemaTypeBuilder::File => SchemaType::File,
            SchemaTypeBuilder::Any => SchemaType::Any,
        })
    }
}

impl Build for ObjectSchemaBuilder {
    type Output = ObjectSchema;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<ObjectSchema, BuildError> {
        Ok(ObjectSchema {
            metadata: self.metadata.clone(),
            required: self.required.clone(),
            properties: self.properties.build(cx)?,
            additional_properties: self.additional_properties.build(cx)?,
        })
    }
}

impl Build for ArraySchemaBuilder {
    type Output = ArraySchema;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<ArraySchema, BuildError> {
        Ok(ArraySchema {
            metadata: self.metadata.clone(),
            items: self.items.build(cx)?,
            additional_items: self.additional_items.build(cx)?,
        })
    }
}

/// Composition kept as is, with sibling properties appended as one last
/// anonymous object subschema.
impl Build for AllOfSchemaBuilder {
    type Output = AllOfSchema;

    fn build(&self, cx: &mut BuildContext<'_>) -> Result<AllOfSchema, BuildError> {
        let mut subschemas = self.subschemas.build(cx)?;
        if let Some(siblings) = &self.siblings {
            subschemas.push(Schema {
                metadata: Metadata::bare(DataType::Object),
                schema_type: SchemaType::Object(Box::new(siblings.build(cx)?)),
                external_docs: None,
            });
        }
        Ok(AllOfSchema {
            subschemas,
            is_abstract: self.is_abstract,
        })
    }
}

impl AllOfSchemaBuilder {
    /// Combine every subschema into one object: `required` is the union in
    /// first-seen order and properties overlay in list order, so a later
    /// subschema's property replaces an earlier one of the same name.
    pub fn merge(&self, cx: &mut BuildContext<'_>) -> Result<ObjectSchema, BuildError> {
        let mut merged = ObjectSchema {
            metadata: ObjectMetadata {
                is_abstract: self.is_abstract,
                ..ObjectMetadata::default()
            },
            required: Vec::new(),
            properties: IndexMap::new(),
            additional_properties: Either::A(false),
        };

        for (index, builder) in self.subschemas.iter().enumerate() {
            let schema = builder.build(cx)?;
            let label = match schema.as_structure() {
                Some(structure) => structure.name().to_string(),
                None => format!("#{index}"),
            };
            let Some(target) = schema.resolved() else {
                warn!("Skipping allOf subschema {label}: it is still being resolved");
                continue;
            };
            let Some(object) = target.as_object() else {
                return Err(DecodeError::new(DecodeErrorKind::NonObjectSubschema(label)).into());
            };
            overlay(&mut merged, object);
        }

        if let Some(siblings) = &self.siblings {
            let own = siblings.build(cx)?;
            overlay(&mut merged, &own);
            merged.metadata.min_properties = own.metadata.min_properties;
            merged.metadata.max_properties = own.metadata.max_properties;
            merged.additional_properties = own.additional_properties;
        }
        Ok(merged)
    }
}

fn overlay(merged: &mut ObjectSchema, object: &ObjectSchema) {
    for name in &object.required {
        if !merged.required.contains(name) {
            merged.required.push(name.clone());
        }
    }
    for (name, schema) in &object.properties {
        merged.properties.insert(name.clone(), schema.clone());
    }
    if merged.metadata.discriminator.is_none() {
        merged.metadata.discriminator = object.metadata.discriminator.clone();
    }
}
