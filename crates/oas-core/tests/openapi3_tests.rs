use std::sync::Arc;

use oas_core::model::{OperationType, SchemaType, Server};
use oas_core::openapi3::{ParameterLocation, SecurityScheme, SerializationStyle};
use oas_core::parse::{self, Document};
use oas_core::{ParseError, ResolveError, SpecFormat};

const PETSTORE: &str = include_str!("fixtures/petstore-3.yaml");

fn petstore() -> oas_core::openapi3::OpenApi3 {
    match parse::from_yaml(PETSTORE).expect("should build petstore") {
        Document::OpenApi3(document) => *document,
        Document::Swagger2(_) => panic!("expected an openapi 3 document"),
    }
}

#[test]
fn yaml_document_is_detected_as_openapi3() {
    let document = parse::from_yaml(PETSTORE).unwrap();
    assert_eq!(document.format(), SpecFormat::OpenApi3);
    assert_eq!(document.version().to_string(), "3.0.3");
    assert_eq!(document.info().title, "Petstore");
}

#[test]
fn missing_servers_default_to_root() {
    let document = petstore();
    assert_eq!(document.servers, [Server::root()]);
}

#[test]
fn every_component_table_is_resolved() {
    let components = petstore().components;
    assert_eq!(
        components.schemas.keys().collect::<Vec<_>>(),
        ["Pet", "NewPet", "Pets", "Error"]
    );
    assert!(components.schemas.values().all(|schema| schema.is_resolved()));
    assert_eq!(components.parameters.len(), 1);
    assert_eq!(components.headers.len(), 1);
    assert_eq!(components.responses.len(), 1);
    assert_eq!(components.examples.len(), 1);
    assert_eq!(components.request_bodies.len(), 1);
    assert_eq!(components.links.len(), 1);
    assert_eq!(components.callbacks.len(), 1);
    assert_eq!(components.security_schemes.len(), 2);
}

#[test]
fn all_of_stays_a_composition() {
    let components = petstore().components;
    let pet = components.schemas["Pet"].value().unwrap();
    let SchemaType::AllOf(all_of) = &pet.schema_type else {
        panic!("Pet should stay an allOf");
    };
    assert_eq!(all_of.subschemas.len(), 2);
    let new_pet = all_of.subschemas[0].as_structure().unwrap();
    assert_eq!(new_pet.name(), "NewPet");
    assert!(Arc::ptr_eq(
        new_pet.shared().unwrap(),
        components.schemas["NewPet"].shared().unwrap()
    ));
    let own = all_of.subschemas[1].as_object().unwrap();
    assert_eq!(own.required, ["id"]);

    let new_pet = components.schemas["NewPet"].value().unwrap();
    assert!(new_pet.as_object().unwrap().properties["tag"].metadata.nullable);
}

#[test]
fn security_scheme_alias_shares_its_target() {
    let components = petstore().components;
    let token = &components.security_schemes["Token"];
    assert_eq!(token.name(), "Token");
    assert!(matches!(
        token.value(),
        Some(SecurityScheme::Http { bearer_format: Some(format), .. }) if format == "JWT"
    ));
    assert!(Arc::ptr_eq(
        token.shared().unwrap(),
        components.security_schemes["bearer"].shared().unwrap()
    ));
}

#[test]
fn list_operation_references() {
    let document = petstore();
    let list = &document.paths["/pets"].operations[&OperationType::Get];

    let limit = &list.parameters[0];
    assert_eq!(limit.reference_name(), Some("Limit"));
    let limit = limit.value().unwrap();
    assert_eq!(limit.name, "limit");
    assert_eq!(limit.location, ParameterLocation::Query);
    assert_eq!(limit.definition.style, Some(SerializationStyle::Form));
    assert_eq!(limit.definition.explode, Some(false));

    let ok = list.responses[&200u16].value().expect("inline response");
    assert_eq!(ok.headers["X-Next"].reference_name(), Some("Next"));
    let schema = ok.content["application/json"].schema.as_ref().unwrap();
    assert_eq!(schema.reference_name(), Some("Pets"));

    let error = list.default_response.as_ref().unwrap();
    assert_eq!(error.reference_name(), Some("Error"));
    let media = &error.value().unwrap().content["application/json"];
    assert_eq!(media.examples["notFound"].reference_name(), Some("NotFound"));
}

#[test]
fn create_operation_references() {
    let document = petstore();
    let create = &document.paths["/pets"].operations[&OperationType::Post];
    assert_eq!(create.security, Some(Vec::new()));

    let body = create.request_body.as_ref().unwrap().value().unwrap();
    assert!(body.required);
    let form = &body.content["multipart/form-data"];
    assert_eq!(form.encoding["name"].content_type.as_deref(), Some("text/plain"));
    assert!(form.encoding["name"].explode);

    let callback = create.callbacks["onCreated"].value().unwrap();
    let item = &callback.paths["{$request.body#/callbackUrl}"];
    assert!(item.operations.contains_key(&OperationType::Post));

    let created = create.responses[&201u16].value().unwrap();
    let link = created.links["GetPet"].value().unwrap();
    assert_eq!(link.operation_id.as_deref(), Some("showPetById"));
    assert_eq!(link.parameters["petId"], "$response.body#/id");
}

#[test]
fn schema_pointer_in_legacy_shape_is_invalid() {
    let err = parse::openapi3_from_json(
        r##"{
            "openapi": "3.0.0",
            "info": {"title": "t", "version": "1"},
            "paths": {},
            "components": {
                "schemas": {"Uses": {"$ref": "#/definitions/Foo"}}
            }
        }"##,
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::Resolve(ResolveError::InvalidPath(_))));
}

#[test]
fn pointer_into_the_wrong_table_is_invalid() {
    let err = parse::openapi3_from_json(
        r##"{
            "openapi": "3.0.0",
            "info": {"title": "t", "version": "1"},
            "paths": {},
            "components": {
                "schemas": {"Foo": {"type": "string"}},
                "parameters": {"Bad": {"$ref": "#/components/schemas/Foo"}}
            }
        }"##,
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::Resolve(ResolveError::InvalidPath(_))));
}

#[test]
fn explicit_servers_are_kept() {
    let document = parse::openapi3_from_json(
        r#"{
            "openapi": "3.0.2",
            "info": {"title": "t", "version": "1"},
            "paths": {},
            "servers": [
                {"url": "https://{region}.api.example", "variables": {"region": {"default": "eu"}}}
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(document.servers.len(), 1);
    assert_eq!(document.servers[0].variables["region"].default, "eu");
}
