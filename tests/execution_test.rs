mod common;

use common::{data, faked, run};
use gql_faker::domain::PathSegment;
use gql_faker::{Executor, Request};
use serde_json::{json, Value};

const SDL: &str = r#"
    type Query {
      user(id: ID!): User
      users(first: Int = 3): [User!]! @sample(size: 3)
      search(term: String!): [SearchResult]
      version: String @examples(values: ["1.0"])
    }
    type Subscription { ticks: Int }
    type User {
      id: ID!
      name: String @examples(values: ["Ada"])
      friends: [User] @sample(size: 2)
    }
    type Post { title: String @examples(values: ["Hello"]) }
    union SearchResult = User | Post
"#;

#[test]
fn test_fragments_and_aliases() {
    let faked = faked(SDL);
    let result = data(
        &faked,
        r#"
        query Fetch {
          me: user(id: "1") { ...UserFields friends { name } }
          first: version
          second: version
        }
        fragment UserFields on User { id name }
        "#,
    );
    assert_eq!(result["me"]["name"], json!("Ada"));
    assert!(result["me"]["id"].is_string());
    assert_eq!(result["me"]["friends"].as_array().unwrap().len(), 2);
    assert_eq!(result["first"], json!("1.0"));
    assert_eq!(result["second"], json!("1.0"));

    let keys: Vec<&String> = result.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["me", "first", "second"]);
}

#[test]
fn test_inline_fragments_on_abstract_results() {
    let faked = faked(SDL);
    for _ in 0..20 {
        let result = data(
            &faked,
            r#"{ search(term: "a") { __typename ... on User { name } ... on Post { title } } }"#,
        );
        for item in result["search"].as_array().unwrap() {
            match item["__typename"].as_str().unwrap() {
                "User" => assert_eq!(item, &json!({ "__typename": "User", "name": "Ada" })),
                "Post" => assert_eq!(item, &json!({ "__typename": "Post", "title": "Hello" })),
                other => panic!("unexpected type {other}"),
            }
        }
    }
}

#[test]
fn test_skip_and_include_with_variables() {
    let faked = faked(SDL);
    let request = Request::new(
        r#"
        query($withName: Boolean!) {
          user(id: 1) { id name @include(if: $withName) }
          version @skip(if: true)
        }
        "#,
    )
    .variables(json!({ "withName": false }));
    let response = Executor::new(&faked).execute(&request);
    assert!(response.errors.is_empty());
    let result = response.data.unwrap();
    assert!(result.get("version").is_none());
    assert!(result["user"].get("name").is_none());
    assert!(result["user"]["id"].is_string());
}

#[test]
fn test_typename_on_roots_and_objects() {
    let faked = faked(SDL);
    let result = data(&faked, "{ __typename users { __typename } }");
    assert_eq!(result["__typename"], json!("Query"));
    assert_eq!(result["users"][0]["__typename"], json!("User"));
}

#[test]
fn test_null_propagates_to_nearest_nullable_field() {
    let faked = faked(
        r#"
        type Query { user: User strict: User! ids: [ID!] @examples(values: [[1, null]]) }
        type User { id: ID! @examples(values: [null]) name: String }
        "#,
    );

    let response = run(&faked, "{ user { id name } ids }");
    let result = response.data.as_ref().unwrap();
    assert_eq!(result["user"], Value::Null);
    assert_eq!(result["ids"], Value::Null);
    assert_eq!(response.errors.len(), 2);
    assert_eq!(
        response.errors[0].path,
        vec![PathSegment::from("user"), PathSegment::from("id")]
    );
    assert_eq!(
        response.errors[1].path,
        vec![PathSegment::from("ids"), PathSegment::from(1)]
    );

    let response = run(&faked, "{ strict { id } }");
    assert_eq!(response.data, Some(Value::Null));
    assert_eq!(response.errors.len(), 1);
}

#[test]
fn test_request_errors_have_no_data() {
    let faked = faked(SDL);

    let invalid = run(&faked, "{ nope }");
    assert!(invalid.data.is_none());
    assert!(!invalid.errors.is_empty());

    let missing_variable = run(&faked, "query($id: ID!) { user(id: $id) { id } }");
    assert!(missing_variable.data.is_none());
    assert!(missing_variable.errors[0].message.contains("$id"));

    let subscription = run(&faked, "subscription { ticks }");
    assert!(subscription.data.is_none());
    assert_eq!(subscription.errors[0].message, "Subscriptions are not supported");

    let request = Request::new("query A { version } query B { version }").operation_name("C");
    let unknown = Executor::new(&faked).execute(&request);
    assert!(unknown.data.is_none());
    assert!(unknown.errors[0].message.contains("\"C\""));
}

#[test]
fn test_operation_selection_by_name() {
    let faked = faked(SDL);
    let request = Request::new("query A { version } query B { users { id } }").operation_name("B");
    let response = Executor::new(&faked).execute(&request);
    let result = response.data.unwrap();
    assert!(result.get("version").is_none());
    assert_eq!(result["users"].as_array().unwrap().len(), 3);
}

#[test]
fn test_introspection_is_a_field_error() {
    let faked = faked(SDL);
    let response = run(&faked, "{ version __type(name: \"User\") { name } }");
    assert_eq!(response.data.as_ref().unwrap()["version"], json!("1.0"));
    assert_eq!(response.data.as_ref().unwrap()["__type"], Value::Null);
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].path, vec![PathSegment::from("__type")]);
}

#[test]
fn test_response_serialization() {
    let faked = faked(SDL);
    let response = run(&faked, "{ version }");
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({ "data": { "version": "1.0" } })
    );

    let request: Request = serde_json::from_value(json!({
        "query": "query Named { version }",
        "operationName": "Named",
        "variables": {}
    }))
    .unwrap();
    assert_eq!(request.operation_name.as_deref(), Some("Named"));
}
