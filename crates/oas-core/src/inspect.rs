//! Summaries of resolved documents, as printed by `oas inspect`.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::build::{ComponentKind, SpecFormat};
use crate::model::{Either, OperationType, Schema, SchemaType, Structure};
use crate::parse::Document;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub format: String,
    pub version: String,
    pub title: String,
    pub api_version: String,
    pub operations: Vec<OperationSummary>,
    /// Component names per non-empty table, keyed by the table's pointer
    /// segment.
    pub components: IndexMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cycles: Vec<CyclePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationSummary {
    pub method: OperationType,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

/// A reference left unresolved because it closes a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CyclePoint {
    /// The named schema containing the reference.
    pub schema: String,
    /// Location of the reference inside that schema, `/`-separated.
    pub location: String,
    /// The schema the reference names.
    pub target: String,
}

impl DocumentSummary {
    pub fn of(document: &Document) -> Self {
        let format = document.format();
        let mut components = IndexMap::new();
        let mut operations = Vec::new();

        match document {
            Document::Swagger2(document) => {
                push_names(&mut components, format, ComponentKind::Schemas, &document.definitions);
                push_names(&mut components, format, ComponentKind::Parameters, &document.parameters);
                push_names(&mut components, format, ComponentKind::Responses, &document.responses);
                for (path, item) in &document.paths {
                    for (method, operation) in &item.operations {
                        operations.push(OperationSummary {
                            method: *method,
                            path: path.clone(),
                            operation_id: operation.operation_id.clone(),
                        });
                    }
                }
            }
            Document::OpenApi3(document) => {
                let tables = &document.components;
                push_names(&mut components, format, ComponentKind::Schemas, &tables.schemas);
                push_names(&mut components, format, ComponentKind::Parameters, &tables.parameters);
                push_names(&mut components, format, ComponentKind::Responses, &tables.responses);
                push_names(
                    &mut components,
                    format,
                    ComponentKind::SecuritySchemes,
                    &tables.security_schemes,
                );
                push_names(&mut components, format, ComponentKind::Examples, &tables.examples);
                push_names(
                    &mut components,
                    format,
                    ComponentKind::RequestBodies,
                    &tables.request_bodies,
                );
                push_names(&mut components, format, ComponentKind::Headers, &tables.headers);
                push_names(&mut components, format, ComponentKind::Links, &tables.links);
                push_names(&mut components, format, ComponentKind::Callbacks, &tables.callbacks);
                for (path, item) in &document.paths {
                    for (method, operation) in &item.operations {
                        operations.push(OperationSummary {
                            method: *method,
                            path: path.clone(),
                            operation_id: operation.operation_id.clone(),
                        });
                    }
                }
            }
        }

        DocumentSummary {
            format: format.to_string(),
            version: document.version().to_string(),
            title: document.info().title.clone(),
            api_version: document.info().version.clone(),
            operations,
            components,
            cycles: cycle_points(document),
        }
    }
}

fn push_names<T>(
    components: &mut IndexMap<String, Vec<String>>,
    format: SpecFormat,
    kind: ComponentKind,
    table: &IndexMap<String, Structure<T>>,
) {
    if table.is_empty() {
        return;
    }
    if let Some(segment) = kind.segment(format) {
        components.insert(segment.to_string(), table.keys().cloned().collect());
    }
}

/// Every reference in the named schemas that was left without a value
/// because it closes a cycle, in table order.
pub fn cycle_points(document: &Document) -> Vec<CyclePoint> {
    let schemas = match document {
        Document::Swagger2(document) => &document.definitions,
        Document::OpenApi3(document) => &document.components.schemas,
    };

    let mut walker = CycleWalker::default();
    for (name, structure) in schemas {
        match structure.shared() {
            Some(value) => {
                // An alias shares its target's value; walk each value once.
                if walker.seen.insert(Arc::as_ptr(value)) {
                    walker.walk(name, "", value);
                }
            }
            None => walker.points.push(CyclePoint {
                schema: name.clone(),
                location: String::new(),
                target: structure.name().to_string(),
            }),
        }
    }
    walker.points
}

#[derive(Default)]
struct CycleWalker {
    seen: HashSet<*const Schema>,
    points: Vec<CyclePoint>,
}

impl CycleWalker {
    fn walk(&mut self, owner: &str, location: &str, schema: &Schema) {
        match &schema.schema_type {
            // Resolved structures are walked through their own table entry.
            SchemaType::Structure(structure) if !structure.is_resolved() => {
                self.points.push(CyclePoint {
                    schema: owner.to_string(),
                    location: location.to_string(),
                    target: structure.name().to_string(),
                });
            }
            SchemaType::Object(object) => {
                for (property, child) in &object.properties {
                    self.walk(owner, &join(location, &format!("properties/{property}")), child);
                }
                if let Either::B(child) = &object.additional_properties {
                    self.walk(owner, &join(location, "additionalProperties"), child);
                }
            }
            SchemaType::Array(array) => {
                if array.items.is_tuple() {
                    for (index, child) in array.items.iter().enumerate() {
                        self.walk(owner, &join(location, &format!("items/{index}")), child);
                    }
                } else {
                    for child in array.items.iter() {
                        self.walk(owner, &join(location, "items"), child);
                    }
                }
                if let Either::B(child) = &array.additional_items {
                    self.walk(owner, &join(location, "additionalItems"), child);
                }
            }
            SchemaType::AllOf(all_of) => {
                for (index, child) in all_of.subschemas.iter().enumerate() {
                    self.walk(owner, &join(location, &format!("allOf/{index}")), child);
                }
            }
            _ => {}
        }
    }
}

fn join(location: &str, segment: &str) -> String {
    if location.is_empty() {
        segment.to_string()
    } else {
        format!("{location}/{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::from_json;

    #[test]
    fn finds_the_reference_closing_a_cycle() {
        let document = from_json(
            r##"{
                "swagger": "2.0",
                "info": {"title": "Nodes", "version": "1"},
                "paths": {},
                "definitions": {
                    "Node": {
                        "type": "object",
                        "properties": {
                            "children": {"type": "array", "items": {"$ref": "#/definitions/Node"}}
                        }
                    }
                }
            }"##,
        )
        .unwrap();
        assert_eq!(
            cycle_points(&document),
            [CyclePoint {
                schema: "Node".into(),
                location: "properties/children/items".into(),
                target: "Node".into(),
            }]
        );
    }

    #[test]
    fn summary_lists_operations_and_tables() {
        let document = from_json(
            r##"{
                "openapi": "3.0.1",
                "info": {"title": "Pets", "version": "2"},
                "paths": {
                    "/pets": {"get": {"operationId": "listPets", "responses": {}}}
                },
                "components": {"schemas": {"Pet": {"type": "object"}}}
            }"##,
        )
        .unwrap();
        let summary = DocumentSummary::of(&document);
        assert_eq!(summary.format, "openapi 3.0");
        assert_eq!(summary.operations.len(), 1);
        assert_eq!(summary.operations[0].operation_id.as_deref(), Some("listPets"));
        assert_eq!(summary.components["schemas"], ["Pet"]);
        assert!(summary.cycles.is_empty());
    }
}
