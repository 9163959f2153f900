//! # Draft-07 Validity
//!
//! Hands `value_of()` output to the `jsonschema` crate configured for
//! draft-07. Compilation checks the document against the draft-07
//! meta-schema; the instance checks confirm the keywords mean what the
//! builder call said.

use fjs_core::{BuilderOptions, DRAFT_07_URI};
use fjs_schema::prelude::*;
use fjs_schema::{
    array, base, boolean, import, integer, mixed, null, number, object, string, FluentSchema,
    SchemaArg, SchemaNode,
};
use jsonschema::{Draft, Validator};
use serde_json::{json, Value};

fn compile(doc: &Value) -> Validator {
    jsonschema::options()
        .with_draft(Draft::Draft7)
        .build(doc)
        .unwrap_or_else(|e| panic!("document is not valid draft-07: {e}\n{doc:#}"))
}

fn draft07_with_ids() -> FluentSchema {
    FluentSchema::new(BuilderOptions::draft07().with_generate_ids(true))
}

// ---------------------------------------------------------------------------
// Leaf builders
// ---------------------------------------------------------------------------

#[test]
fn string_keywords_validate() {
    let schema = string()
        .min_length(2)
        .unwrap()
        .max_length(5)
        .unwrap()
        .pattern("^[a-z]+$")
        .unwrap();
    let v = compile(&schema.value_of());
    assert!(v.is_valid(&json!("abc")));
    assert!(!v.is_valid(&json!("a")));
    assert!(!v.is_valid(&json!("abcdef")));
    assert!(!v.is_valid(&json!("AB")));
    assert!(!v.is_valid(&json!(12)));
}

#[test]
fn integer_bounds_validate() {
    let schema = integer()
        .minimum(0)
        .unwrap()
        .exclusive_maximum(10)
        .unwrap()
        .multiple_of(2)
        .unwrap();
    let v = compile(&schema.value_of());
    assert!(v.is_valid(&json!(0)));
    assert!(v.is_valid(&json!(8)));
    assert!(!v.is_valid(&json!(10)));
    assert!(!v.is_valid(&json!(3)));
    assert!(!v.is_valid(&json!(-2)));
}

#[test]
fn every_leaf_compiles() {
    let f = FluentSchema::new(BuilderOptions::draft07());
    let docs = [
        f.string().format("date-time").unwrap().value_of(),
        f.number().maximum(1.5).unwrap().value_of(),
        f.integer().value_of(),
        f.boolean().default_value(true).value_of(),
        f.null().value_of(),
        f.array().value_of(),
        f.object().value_of(),
        f.mixed(["string", "null"]).unwrap().value_of(),
        f.base().value_of(),
    ];
    for doc in &docs {
        assert_eq!(doc["$schema"], json!(DRAFT_07_URI));
        compile(doc);
    }
    assert!(compile(&null().value_of()).is_valid(&Value::Null));
    assert!(!compile(&boolean().value_of()).is_valid(&json!("true")));
}

// ---------------------------------------------------------------------------
// Objects
// ---------------------------------------------------------------------------

#[test]
fn object_with_required_and_closed_properties() {
    let schema = draft07_with_ids()
        .object()
        .additional_properties(false)
        .unwrap()
        .prop("email")
        .format("email")
        .unwrap()
        .required()
        .unwrap()
        .prop("age")
        .as_integer()
        .unwrap()
        .minimum(0)
        .unwrap();
    let v = compile(&schema.value_of());
    assert!(v.is_valid(&json!({"email": "a@b.co", "age": 3})));
    assert!(v.is_valid(&json!({"email": "a@b.co"})));
    assert!(!v.is_valid(&json!({"age": 3})));
    assert!(!v.is_valid(&json!({"email": "a@b.co", "age": -1})));
    assert!(!v.is_valid(&json!({"email": "a@b.co", "extra": 1})));
}

#[test]
fn definitions_and_json_pointer_refs() {
    let f = draft07_with_ids();
    let schema = f
        .object()
        .definition("address", f.object().prop("street").required().unwrap())
        .prop_schema("home", f.base().reference("#/definitions/address"))
        .prop_schema("work", f.base().reference("#/definitions/address"));
    let v = compile(&schema.value_of());
    assert!(v.is_valid(&json!({"home": {"street": "Main"}})));
    assert!(!v.is_valid(&json!({"work": {}})));
}

#[test]
fn pattern_properties_dependencies_and_property_names() {
    let schema = object()
        .pattern_properties([("^x-", string())])
        .unwrap()
        .dependencies([("card", SchemaArg::from(json!(["billing"])))])
        .unwrap()
        .property_names(string().max_length(8).unwrap())
        .unwrap()
        .min_properties(1)
        .unwrap();
    let v = compile(&schema.value_of());
    assert!(v.is_valid(&json!({"x-a": "ok"})));
    assert!(!v.is_valid(&json!({"x-a": 1})));
    assert!(!v.is_valid(&json!({"card": 1})));
    assert!(v.is_valid(&json!({"card": 1, "billing": 2})));
    assert!(!v.is_valid(&json!({"very-long-name": 1})));
    assert!(!v.is_valid(&json!({})));
}

// ---------------------------------------------------------------------------
// Arrays
// ---------------------------------------------------------------------------

#[test]
fn tuple_and_contains() {
    let schema = array()
        .items(vec![SchemaNode::from(string()), SchemaNode::from(number())])
        .unwrap()
        .additional_items(false)
        .unwrap();
    let v = compile(&schema.value_of());
    assert!(v.is_valid(&json!(["a", 1])));
    assert!(!v.is_valid(&json!([1, "a"])));
    assert!(!v.is_valid(&json!(["a", 1, 2])));

    let schema = array()
        .contains(integer().minimum(10).unwrap())
        .unwrap()
        .unique_items(true)
        .unwrap()
        .max_items(3)
        .unwrap();
    let v = compile(&schema.value_of());
    assert!(v.is_valid(&json!([1, 10])));
    assert!(!v.is_valid(&json!([1, 2])));
    assert!(!v.is_valid(&json!([10, 10])));
}

// ---------------------------------------------------------------------------
// Composition and conditionals
// ---------------------------------------------------------------------------

#[test]
fn conditional_payment_schema() {
    let f = draft07_with_ids();
    let schema = f
        .object()
        .prop("method")
        .enum_values(json!(["card", "bank"]))
        .unwrap()
        .required()
        .unwrap()
        .if_then_else(
            f.object().prop_schema("method", f.base().const_value("card")),
            f.object().required_names(["number"]),
            f.object().required_names(["iban"]),
        )
        .unwrap();
    let v = compile(&schema.value_of());
    assert!(v.is_valid(&json!({"method": "card", "number": "4111"})));
    assert!(!v.is_valid(&json!({"method": "card", "iban": "DE00"})));
    assert!(v.is_valid(&json!({"method": "bank", "iban": "DE00"})));
    assert!(!v.is_valid(&json!({"method": "bank"})));
}

#[test]
fn composition_keywords() {
    let schema = base()
        .any_of(vec![SchemaNode::from(string()), SchemaNode::from(integer())])
        .unwrap()
        .not(string().max_length(0).unwrap())
        .unwrap();
    let v = compile(&schema.value_of());
    assert!(v.is_valid(&json!("x")));
    assert!(v.is_valid(&json!(4)));
    assert!(!v.is_valid(&json!("")));
    assert!(!v.is_valid(&json!(true)));

    let schema = mixed(["number", "string"])
        .unwrap()
        .one_of(vec![
            SchemaNode::from(number().minimum(5).unwrap()),
            SchemaNode::from(number().maximum(10).unwrap()),
        ])
        .unwrap();
    let v = compile(&schema.value_of());
    assert!(v.is_valid(&json!(1)));
    assert!(!v.is_valid(&json!(7)));
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[test]
fn imported_document_still_compiles_after_extension() {
    let doc = json!({
        "$schema": DRAFT_07_URI,
        "type": "object",
        "properties": {"name": {"type": "string"}},
        "required": ["name"]
    });
    let SchemaNode::Object(imported) = import(&doc).unwrap() else {
        panic!("expected an object builder");
    };
    let extended = imported
        .prop("tags")
        .as_array()
        .unwrap()
        .items(string())
        .unwrap();
    let v = compile(&extended.value_of());
    assert!(v.is_valid(&json!({"name": "n", "tags": ["a"]})));
    assert!(!v.is_valid(&json!({"name": "n", "tags": [1]})));
}
