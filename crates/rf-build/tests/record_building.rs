//! End-to-end checks across the generated parameter tree, the validator,
//! and the builder.

use rf_build::{build_record, execute, Batch, BuildPolicy, OutputItem, ValueBuilder};
use rf_core::{Container, Depth, DiscriminatorKey, FieldDefinition, MAX_DEPTH};
use rf_schema::descriptor::find;
use rf_schema::{generate, DefinitionValidator};
use serde_json::{json, Value};

fn record(fields: Value) -> Value {
    let fields: Container = serde_json::from_value(fields).unwrap();
    Value::Object(build_record(&fields, &ValueBuilder::default()).unwrap())
}

#[test]
fn flat_record() {
    let fields = json!({"field": [
        {"name": "a", "type": "string", "value": "x"},
        {"name": "b", "type": "number", "value": "2"}
    ]});
    assert!(DefinitionValidator::new().unwrap().is_valid(&fields));
    assert_eq!(record(fields), json!({"a": "x", "b": 2}));
}

#[test]
fn array_of_strings() {
    let fields = json!({"field": [{
        "name": "tags",
        "type": "array",
        "arrayItems": {"item": [
            {"itemType": "string", "value": "p"},
            {"itemType": "string", "value": "q"},
            {"itemType": "string", "value": "r"}
        ]}
    }]});
    assert_eq!(record(fields), json!({"tags": ["p", "q", "r"]}));
}

#[test]
fn nested_object_with_array() {
    let fields = json!([{"field": [{
        "name": "user",
        "type": "object",
        "objectFields": [{"field": [
            {"name": "id", "type": "number", "value": " 42 "},
            {"name": "active", "type": "boolean", "valueBool": false},
            {"name": "roles", "type": "array", "arrayItems": [{"item": [
                {"itemType": "string", "value": "admin"},
                {"itemType": "object", "objectFields": {"field": [
                    {"name": "scope", "value": "all"}
                ]}}
            ]}]}
        ]}]
    }]}]);
    assert!(DefinitionValidator::new().unwrap().is_valid(&fields));
    assert_eq!(
        record(fields),
        json!({"user": {
            "id": 42,
            "active": false,
            "roles": ["admin", {"scope": "all"}]
        }})
    );
}

#[test]
fn both_encodings_build_identically() {
    let defs = json!([
        {"name": "a", "value": "1"},
        {"name": "o", "type": "object", "objectFields": {"field": [{"name": "k", "value": "v"}]}}
    ]);
    let direct = record(json!({"field": defs.clone()}));
    let grouped = record(json!([{"field": defs}]));
    assert_eq!(direct, grouped);
}

#[test]
fn duplicate_member_names_keep_last_value_in_first_position() {
    let fields = json!({"field": [{
        "name": "o",
        "type": "object",
        "objectFields": {"field": [
            {"name": "k", "value": "first"},
            {"name": "other", "value": "x"},
            {"name": "k", "value": "second"}
        ]}
    }]});
    let built = record(fields);
    assert_eq!(built, json!({"o": {"k": "second", "other": "x"}}));
    let keys: Vec<&String> = built["o"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["k", "other"]);
}

#[test]
fn generated_bool_default_matches_the_builder() {
    let descriptors = generate(Depth::ROOT, DiscriminatorKey::Type);
    let default = find(&descriptors, "valueBool").unwrap().default_value();

    let def: FieldDefinition = serde_json::from_value(json!({"name": "flag", "type": "boolean"})).unwrap();
    let built = ValueBuilder::default().build(&def, DiscriminatorKey::Type).unwrap();
    assert_eq!(built, default);
}

#[test]
fn strict_policy_agrees_with_the_validator_on_depth() {
    fn chain(levels: u32) -> Value {
        let mut inner = json!({"name": "leaf", "value": "x"});
        for _ in 1..levels {
            inner = json!({"name": "n", "type": "object", "objectFields": {"field": [inner]}});
        }
        json!({"field": [inner]})
    }

    let validator = DefinitionValidator::new().unwrap();
    let strict = ValueBuilder::new(BuildPolicy::strict());

    for levels in [MAX_DEPTH, MAX_DEPTH + 1] {
        let raw = chain(levels);
        let fields: Container = serde_json::from_value(raw.clone()).unwrap();
        let built = build_record(&fields, &strict);
        assert_eq!(validator.is_valid(&raw), built.is_ok(), "levels = {levels}");
    }
}

#[test]
fn batch_with_mixed_outcomes() {
    let batch: Batch = serde_json::from_value(json!({
        "continueOnFail": true,
        "fieldsCollection": {"field": [{"name": "n", "type": "number", "value": "1.5"}]},
        "items": [{"json": {}}, {"json": {}}, {"json": {}}],
        "parameters": [
            {},
            {"fieldsCollection": {"field": [{"name": "n", "type": "number", "value": "1e999"}]}},
            {"fieldsCollection": {"field": [{"name": "n", "type": "number", "value": "0x1F"}]}}
        ]
    }))
    .unwrap();

    let out = execute(&batch, &ValueBuilder::default()).unwrap();
    assert_eq!(
        serde_json::to_value(&out).unwrap(),
        json!([
            {"json": {"n": 1.5}},
            {"error": "field \"n\" value is not a number", "item": 1},
            {"json": {"n": 31}}
        ])
    );
    assert_eq!(out.iter().filter(|o| o.is_failure()).count(), 1);
    assert!(matches!(out[2], OutputItem::Success(_)));
}

#[test]
fn empty_discriminator_is_valid_and_builds_strictly() {
    let raw = json!({"field": [{"name": "s", "type": "", "value": "x"}]});
    assert!(DefinitionValidator::new().unwrap().is_valid(&raw));

    let fields: Container = serde_json::from_value(raw).unwrap();
    let built = build_record(&fields, &ValueBuilder::new(BuildPolicy::strict())).unwrap();
    assert_eq!(Value::Object(built), json!({"s": "x"}));
}
