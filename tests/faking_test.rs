mod common;

use common::{data, faked};
use serde_json::{json, Value};
use std::collections::HashMap;

#[test]
fn test_fixed_sample_length() {
    let faked = faked("type Query { tags: [String] @sample(min: 2, max: 2) }");
    for _ in 0..50 {
        let result = data(&faked, "{ tags }");
        let tags = result["tags"].as_array().unwrap();
        assert_eq!(tags.len(), 2);
        assert!(tags.iter().all(Value::is_string));
    }
}

#[test]
fn test_inverted_sample_range_is_corrected() {
    let faked = faked("type Query { ids: [Int!]! @sample(min: 5, max: 2) }");
    let mut seen = HashMap::new();
    for _ in 0..200 {
        let result = data(&faked, "{ ids }");
        let len = result["ids"].as_array().unwrap().len();
        assert!((5..=6).contains(&len), "unexpected length {len}");
        *seen.entry(len).or_insert(0) += 1;
    }
    assert_eq!(seen.len(), 2);
}

#[test]
fn test_examples_on_composite_type() {
    let faked = faked(
        r#"
        type Query { item: Item items: [Item] @sample(size: 4) }
        type Item @examples(values: [{ a: 1 }, { a: 2 }]) { a: Int b: String }
        "#,
    );
    for _ in 0..30 {
        let result = data(&faked, "{ item { a b } items { a } }");
        let a = result["item"]["a"].as_i64().unwrap();
        assert!(a == 1 || a == 2);
        assert!(result["item"]["b"].is_string());

        let items = result["items"].as_array().unwrap();
        assert_eq!(items.len(), 4);
        for item in items {
            assert!(item == &json!({ "a": 1 }) || item == &json!({ "a": 2 }));
        }
    }
}

#[test]
fn test_enum_values_are_uniform() {
    let faked = faked("type Query { letter: Letter } enum Letter { A B C }");
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..3000 {
        let result = data(&faked, "{ letter }");
        *counts
            .entry(result["letter"].as_str().unwrap().to_string())
            .or_default() += 1;
    }
    assert_eq!(counts.len(), 3);
    for letter in ["A", "B", "C"] {
        assert!(counts[letter] > 800, "{letter} seen {} times", counts[letter]);
    }
}

#[test]
fn test_fake_generators_through_execution() {
    let faked = faked(
        r#"
        type Query {
          email: String @fake(type: "email", options: { emailProvider: "example.com" })
          price: Float @fake(type: "money", options: { minMoney: 10, maxMoney: 20 })
          joined: DateTime @fake(type: "pastDate", options: { dateFormat: "%Y-%m-%d" })
          count: Int
          born: DateTime
        }
        scalar DateTime
        "#,
    );
    let result = data(&faked, "{ email price joined count born }");

    assert!(result["email"].as_str().unwrap().ends_with("@example.com"));
    let price = result["price"].as_f64().unwrap();
    assert!((10.0..=20.0).contains(&price));
    assert_eq!(result["joined"].as_str().unwrap().len(), 10);
    assert!((0..=99999).contains(&result["count"].as_i64().unwrap()));
    assert_eq!(result["born"], json!("<DateTime>"));
}

#[test]
fn test_example_literals_on_leaves() {
    let faked = faked(
        r#"
        type Query {
          status: Status @examples(values: ["ON"])
          name: String @examples(values: ["Ada", "Grace"])
        }
        enum Status { ON OFF }
        "#,
    );
    for _ in 0..20 {
        let result = data(&faked, "{ status name }");
        assert_eq!(result["status"], json!("ON"));
        let name = result["name"].as_str().unwrap();
        assert!(name == "Ada" || name == "Grace");
    }
}

#[test]
fn test_abstract_fields_resolve_to_possible_types() {
    let faked = faked(
        r#"
        type Query { pet: Pet thing: Thing cat: Pet @examples(type: "Cat", values: [{}]) }
        interface Pet { name: String }
        type Dog implements Pet { name: String barks: Boolean }
        type Cat implements Pet { name: String lives: Int }
        type Rock { weight: Float }
        union Thing = Dog | Rock
        "#,
    );
    let query = r#"
        {
          pet { __typename name ... on Dog { barks } ... on Cat { lives } }
          thing { __typename ... on Rock { weight } }
          cat { __typename }
        }
    "#;
    for _ in 0..30 {
        let result = data(&faked, query);
        match result["pet"]["__typename"].as_str().unwrap() {
            "Dog" => assert!(result["pet"]["barks"].is_boolean()),
            "Cat" => assert!(result["pet"]["lives"].is_i64()),
            other => panic!("unexpected type {other}"),
        }
        assert!(result["pet"]["name"].is_string());

        match result["thing"]["__typename"].as_str().unwrap() {
            "Rock" => assert!(result["thing"]["weight"].is_number()),
            "Dog" => assert!(result["thing"].get("weight").is_none()),
            other => panic!("unexpected type {other}"),
        }
        assert_eq!(result["cat"], json!({ "__typename": "Cat" }));
    }
}

#[test]
fn test_invalid_directive_arguments_are_rejected() {
    common::init_tracing();
    let result = gql_faker::FakedSchema::from_sdl(
        r#"type Query { name: String @fake(type: "firstName", options: { bogus: 1 }) }"#,
        std::sync::Arc::new(gql_faker::StdFaker::default()),
    );
    let error = result.unwrap_err();
    assert!(error.to_string().contains("Query.name"), "{error}");
}

#[test]
fn test_array_examples_on_custom_scalars() {
    let faked = faked(
        r#"
        type Query { meta: JSON @examples(values: [[1, 2]]) item: Item }
        type Item @examples(values: [{ tags: ["a", { b: 1 }] }]) { tags: JSON }
        scalar JSON
        "#,
    );
    let result = data(&faked, "{ meta item { tags } }");
    assert_eq!(result["meta"], json!([1, 2]));
    assert_eq!(result["item"]["tags"], json!(["a", { "b": 1 }]));
}
