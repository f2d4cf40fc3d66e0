//! Integration tests for rule-driven unmarshalling.
//!
//! These tests parse realistic ECS documents and check the shape of the
//! resulting object graphs.

use ecs_api::{markup, ObjectGraph, TransformRules, Unmarshaller, Value};
use std::sync::Arc;

fn unmarshal(rules: TransformRules, xml: &str) -> ObjectGraph {
    let document = markup::parse(xml).unwrap();
    Unmarshaller::new(Arc::new(rules)).unmarshal_object(&document)
}

fn item_rules() -> TransformRules {
    TransformRules::builder()
        .bypassed(["OperationRequest"])
        .pivoted(["ItemAttributes"])
        .collective(["Items", "Offers"])
        .collected(["Item", "Offer"])
        .build()
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn test_collective_and_collected_tags_build_a_list() {
    let response = unmarshal(
        item_rules(),
        "<R><Items><Item><ASIN>X</ASIN></Item><Item><ASIN>Y</ASIN></Item></Items></R>",
    );

    let items = response.list("Items").unwrap();
    let asins: Vec<&str> = items
        .iter()
        .map(|item| item.as_object().unwrap().text("ASIN").unwrap())
        .collect();
    assert_eq!(asins, vec!["X", "Y"]);
}

#[test]
fn test_list_keeps_uncollected_children_as_fields() {
    let response = unmarshal(
        item_rules(),
        "<R><Items><TotalResults>2</TotalResults><TotalPages>1</TotalPages>\
         <Item><ASIN>X</ASIN></Item><Item><ASIN>Y</ASIN></Item></Items></R>",
    );

    let items = response.list("Items").unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items.fields().text("TotalResults").unwrap(), "2");
    assert_eq!(items.fields().text("TotalPages").unwrap(), "1");
}

#[test]
fn test_nested_lists_do_not_leak_into_outer_list() {
    let response = unmarshal(
        item_rules(),
        "<R><Items><Item><ASIN>X</ASIN><Offers>\
         <Offer><Price>1</Price></Offer><Offer><Price>2</Price></Offer>\
         </Offers></Item></Items></R>",
    );

    let items = response.list("Items").unwrap();
    assert_eq!(items.len(), 1);
    let offers = items[0].as_object().unwrap().list("Offers").unwrap();
    assert_eq!(offers.len(), 2);
}

#[test]
fn test_repeated_tags_fold_into_list_without_rules() {
    let response = unmarshal(
        TransformRules::default(),
        "<Item><Author>Mark Lutz</Author><Author>David Ascher</Author></Item>",
    );

    let authors = response.list("Author").unwrap();
    assert_eq!(authors.len(), 2);
    assert!(authors.fields().is_empty());
    assert_eq!(authors[1].as_text(), Some("David Ascher"));
}

// ============================================================================
// Pivot and bypass
// ============================================================================

#[test]
fn test_pivot_lifts_children_into_parent() {
    let flattened = unmarshal(
        item_rules(),
        "<Item><ASIN>X</ASIN><ItemAttributes><Title>T</Title><Binding>Paperback</Binding></ItemAttributes></Item>",
    );
    let plain = unmarshal(
        item_rules(),
        "<Item><ASIN>X</ASIN><Title>T</Title><Binding>Paperback</Binding></Item>",
    );

    assert_eq!(
        serde_json::to_value(&flattened).unwrap(),
        serde_json::to_value(&plain).unwrap()
    );
}

#[test]
fn test_bypassed_subtree_leaves_no_trace() {
    let response = unmarshal(
        item_rules(),
        "<ItemLookupResponse><OperationRequest><HTTPHeaders><Header Name=\"UserAgent\"/></HTTPHeaders>\
         <RequestId>0KQ</RequestId></OperationRequest><Items/></ItemLookupResponse>",
    );

    assert_eq!(response.names().collect::<Vec<_>>(), vec!["Items"]);
}

// ============================================================================
// Leaves and JSON output
// ============================================================================

#[test]
fn test_empty_element_is_empty_text() {
    let response = unmarshal(TransformRules::default(), "<R><IsValid/></R>");
    assert_eq!(response.text("IsValid").unwrap(), "");
}

#[test]
fn test_object_graph_serializes_to_json() {
    let response = unmarshal(
        item_rules(),
        "<R><Items><TotalResults>1</TotalResults><Item><ASIN>X</ASIN></Item></Items></R>",
    );

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::json!({ "Items": [{ "ASIN": "X" }] })
    );
}

#[test]
fn test_typed_accessors_report_missing_and_mismatched_fields() {
    let response = unmarshal(item_rules(), "<R><ASIN>X</ASIN></R>");

    assert!(matches!(
        response.list("ASIN"),
        Err(ecs_api::EcsError::UnexpectedShape { .. })
    ));
    assert!(matches!(
        response.text("Title"),
        Err(ecs_api::EcsError::FieldNotFound { .. })
    ));
    assert!(matches!(response.get("ASIN"), Some(Value::Text(_))));
}
