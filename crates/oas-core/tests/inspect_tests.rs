use oas_core::inspect::{DocumentSummary, cycle_points};
use oas_core::parse;

const NODES: &str = include_str!("fixtures/nodes.json");
const FOO_BAR: &str = include_str!("fixtures/foo-bar.json");

#[test]
fn summary_of_a_recursive_document() {
    let document = parse::from_json(NODES).expect("should build nodes");
    let summary = DocumentSummary::of(&document);
    insta::assert_json_snapshot!(summary, @r#"
    {
      "format": "swagger 2.0",
      "version": "2.0",
      "title": "Nodes",
      "api_version": "1",
      "operations": [
        {
          "method": "get",
          "path": "/nodes",
          "operation_id": "listNodes"
        }
      ],
      "components": {
        "definitions": [
          "Node"
        ]
      },
      "cycles": [
        {
          "schema": "Node",
          "location": "properties/children/items",
          "target": "Node"
        }
      ]
    }
    "#);
}

#[test]
fn acyclic_document_has_no_cycle_points() {
    let document = parse::from_json(FOO_BAR).unwrap();
    assert!(cycle_points(&document).is_empty());
}
