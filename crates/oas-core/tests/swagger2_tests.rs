use std::sync::Arc;

use oas_core::model::{Either, IntegerFormat, Schema, SchemaType, Structure};
use oas_core::parse;
use oas_core::swagger2::{CollectionFormat, ItemsType, Parameter, SecurityScheme, TransferScheme};
use oas_core::{ParseError, ResolveError, VersionError};

const FOO_BAR: &str = include_str!("fixtures/foo-bar.json");
const CYCLES: &str = include_str!("fixtures/cycles.json");
const PETSTORE: &str = include_str!("fixtures/petstore-2.json");

fn property<'a>(schema: &'a Schema, name: &str) -> &'a Schema {
    let object = schema.as_object().expect("should be an object schema");
    object
        .properties
        .get(name)
        .unwrap_or_else(|| panic!("should have property {name}"))
}

fn structure(schema: &Schema) -> &Structure<Schema> {
    schema.as_structure().expect("should be a structure reference")
}

#[test]
fn foo_bar_end_to_end() {
    let document = parse::swagger2_from_json(FOO_BAR).expect("should build foo-bar");

    let foo = document.definitions["Foo"].value().expect("Foo should resolve");
    let bar = structure(property(foo, "bar"));
    assert_eq!(bar.name(), "Bar");

    let bar = bar.value().expect("Bar should resolve");
    assert_eq!(property(bar, "name").schema_type, SchemaType::String(None));
}

#[test]
fn tables_serialize_in_full_and_references_by_name() {
    let document = parse::swagger2_from_json(FOO_BAR).unwrap();
    let value = serde_json::to_value(&document).unwrap();

    let foo = &value["definitions"]["Foo"];
    assert_eq!(foo["type"]["kind"], "object");
    let bar = &foo["type"]["value"]["properties"]["bar"]["type"];
    assert_eq!(bar["kind"], "structure");
    assert_eq!(bar["value"], serde_json::json!({"name": "Bar", "resolved": true}));
}

#[test]
fn cycle_is_cut_for_the_first_consumer_only() {
    let document = parse::swagger2_from_json(CYCLES).expect("cyclic definitions should build");

    // A resolves B, which reaches A while A is still resolving.
    let a = document.definitions["A"].value().expect("A should resolve");
    let b = structure(property(a, "b"));
    let back = structure(property(b.value().expect("B should resolve"), "a"));
    assert_eq!(back.name(), "A");
    assert!(!back.is_resolved());

    // C is built after A finished and sees the full value.
    let c = document.definitions["C"].value().expect("C should resolve");
    let a_from_c = structure(property(c, "a"));
    assert!(a_from_c.is_resolved());
    assert!(Arc::ptr_eq(
        a_from_c.shared().unwrap(),
        document.definitions["A"].shared().unwrap()
    ));

    // The B table entry is the value A already built.
    assert!(Arc::ptr_eq(b.shared().unwrap(), document.definitions["B"].shared().unwrap()));

    // Paths are built after every table and only see finished values.
    let get = &document.paths["/a"].operations[&oas_core::model::OperationType::Get];
    let response = get.responses[&200u16].value().expect("inline response");
    let schema = response.schema.as_ref().expect("response schema");
    assert!(structure(schema).is_resolved());
}

#[test]
fn petstore_document_fields() {
    let document = parse::swagger2_from_json(PETSTORE).expect("should build petstore");

    assert_eq!(document.info.title, "Swagger Petstore");
    assert_eq!(document.host.as_deref(), Some("petstore.example.com"));
    assert_eq!(document.base_path.as_deref(), Some("/v1"));
    assert_eq!(document.schemes, [TransferScheme::Https]);
    assert_eq!(document.security.len(), 1);
    assert!(matches!(
        document.security_definitions["petstore_auth"],
        SecurityScheme::OAuth2 { ref scopes, .. } if scopes.len() == 2
    ));
    assert_eq!(
        document.definitions.keys().collect::<Vec<_>>(),
        ["NewPet", "Pet", "Animal", "Error"]
    );
}

#[test]
fn petstore_all_of_is_merged() {
    let document = parse::swagger2_from_json(PETSTORE).unwrap();
    let pet = document.definitions["Pet"].value().unwrap();
    let object = pet.as_object().expect("merged into one object");

    assert_eq!(object.required, ["name", "id"]);
    assert_eq!(
        object.properties.keys().collect::<Vec<_>>(),
        ["name", "tag", "id"]
    );
    assert!(object.properties["tag"].metadata.nullable);
    assert_eq!(
        object.properties["id"].schema_type,
        SchemaType::Integer(Some(IntegerFormat::Int64))
    );
    assert_eq!(object.additional_properties, Either::A(false));
}

#[test]
fn alias_shares_its_target() {
    let document = parse::swagger2_from_json(PETSTORE).unwrap();
    let animal = &document.definitions["Animal"];
    assert_eq!(animal.name(), "Animal");
    assert!(Arc::ptr_eq(
        animal.shared().unwrap(),
        document.definitions["Pet"].shared().unwrap()
    ));

    let limit = &document.parameters["limit"];
    let page_size = &document.parameters["PageSize"];
    assert!(Arc::ptr_eq(limit.shared().unwrap(), page_size.shared().unwrap()));
}

#[test]
fn petstore_operations() {
    use oas_core::model::OperationType;

    let document = parse::swagger2_from_json(PETSTORE).unwrap();
    let list = &document.paths["/pets"].operations[&OperationType::Get];
    assert_eq!(list.operation_id.as_deref(), Some("listPets"));
    assert!(!list.deprecated);

    // A pointer through an alias keeps the name it was written with.
    let page_size = &list.parameters[0];
    assert_eq!(page_size.reference_name(), Some("PageSize"));
    let Parameter::Other { fixed, items } = page_size.value().unwrap() else {
        panic!("limit is a query parameter");
    };
    assert_eq!(fixed.name, "limit");
    assert_eq!(fixed.example, Some(serde_json::json!(20)));
    let ItemsType::Integer(integer) = &items.items_type else {
        panic!("limit is an integer");
    };
    assert_eq!(integer.metadata.maximum, Some(100));

    let Parameter::Other { items, .. } = list.parameters[1].value().unwrap() else {
        panic!("tags is a query parameter");
    };
    let ItemsType::Array(array) = &items.items_type else {
        panic!("tags is an array");
    };
    assert_eq!(array.collection_format, CollectionFormat::Multi);

    let default = list.default_response.as_ref().expect("default response");
    assert_eq!(default.value().unwrap().description, "unexpected error");

    let create = &document.paths["/pets"].operations[&OperationType::Post];
    assert!(matches!(create.parameters[0].value(), Some(Parameter::Body { .. })));

    let show = &document.paths["/pets/{petId}"];
    assert_eq!(show.parameters.len(), 1);
    let get = &show.operations[&OperationType::Get];
    assert!(get.deprecated);
    let not_found = &get.responses[&404u16];
    assert_eq!(not_found.reference_name(), Some("NotFound"));
    assert!(not_found.value().unwrap().headers.contains_key("X-Request-Id"));
}

#[test]
fn chained_references_resolve_to_the_end() {
    let document = parse::swagger2_from_json(
        r##"{
            "swagger": "2.0",
            "info": {"title": "Chain", "version": "1"},
            "paths": {},
            "definitions": {
                "First": {"$ref": "#/definitions/Second"},
                "Second": {"$ref": "#/definitions/Third"},
                "Third": {"type": "boolean"}
            }
        }"##,
    )
    .unwrap();
    for name in ["First", "Second", "Third"] {
        let schema = document.definitions[name].value().unwrap();
        assert_eq!(schema.schema_type, SchemaType::Boolean);
    }
}

#[test]
fn pointer_errors_abort_the_build() {
    let wrong_segment = parse::swagger2_from_json(
        r##"{
            "swagger": "2.0",
            "info": {"title": "t", "version": "1"},
            "paths": {},
            "definitions": {
                "Foo": {"type": "object"},
                "Uses": {"type": "object", "properties": {"foo": {"$ref": "#/schemas/Foo"}}}
            }
        }"##,
    )
    .unwrap_err();
    assert!(matches!(wrong_segment, ParseError::Resolve(ResolveError::InvalidPath(_))));

    let missing = parse::swagger2_from_json(
        r##"{
            "swagger": "2.0",
            "info": {"title": "t", "version": "1"},
            "paths": {},
            "definitions": {
                "Uses": {"type": "object", "properties": {"m": {"$ref": "#/definitions/Missing"}}}
            }
        }"##,
    )
    .unwrap_err();
    assert!(matches!(
        missing,
        ParseError::Resolve(ResolveError::UnresolvedReference(ref name)) if name == "Missing"
    ));

    let current_format = parse::swagger2_from_json(
        r##"{
            "swagger": "2.0",
            "info": {"title": "t", "version": "1"},
            "paths": {},
            "definitions": {
                "Uses": {"$ref": "#/components/schemas/Foo"}
            }
        }"##,
    )
    .unwrap_err();
    assert!(matches!(current_format, ParseError::Resolve(ResolveError::InvalidPath(_))));
}

#[test]
fn unsupported_version_is_rejected() {
    let err = parse::swagger2_from_json(r#"{"swagger": "2.1", "info": {"title": "t", "version": "1"}}"#)
        .unwrap_err();
    assert!(matches!(err, ParseError::Version(VersionError::Unexpected { .. })));
}

#[test]
fn unknown_schema_type_is_a_decode_error() {
    let err = parse::swagger2_from_json(
        r#"{
            "swagger": "2.0",
            "info": {"title": "t", "version": "1"},
            "paths": {},
            "definitions": {"Odd": {"type": "decimal"}}
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::Decode(_)));
    assert!(err.to_string().contains("Unknown data type decimal"));
}
