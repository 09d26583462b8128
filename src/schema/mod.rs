//! Building the type graph from SDL text.

use apollo_compiler::ast;
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use serde_json::{Number, Value};

use crate::domain::JsonMap;
use crate::error::{FakerError, FakerResult};

/// Definitions of the faker directives and the scalar they take as arguments
pub const FAKE_DEFINITION: &str = include_str!("fake_definition.graphql");

/// Parses and validates user SDL together with the faker directive definitions.
pub fn load_schema(sdl: &str) -> FakerResult<Valid<Schema>> {
    let source = format!("{sdl}\n\n{FAKE_DEFINITION}");
    parse_schema(&source)
}

/// Parses and validates SDL as-is. The text must define the faker directives itself.
pub fn parse_schema(sdl: &str) -> FakerResult<Valid<Schema>> {
    Schema::parse_and_validate(sdl, "schema.graphql")
        .map_err(|e| FakerError::InvalidSchema(e.to_string()))
}

/// Converts a GraphQL literal to JSON. Variables are looked up in `variables`
/// and become null when absent.
pub fn literal_to_json(value: &ast::Value, variables: Option<&JsonMap>) -> Value {
    match value {
        ast::Value::Null => Value::Null,
        ast::Value::Enum(name) => Value::String(name.to_string()),
        ast::Value::Variable(name) => variables
            .and_then(|vars| vars.get(name.as_str()))
            .cloned()
            .unwrap_or(Value::Null),
        ast::Value::String(s) => Value::String(s.clone()),
        ast::Value::Boolean(b) => Value::Bool(*b),
        ast::Value::Int(i) => {
            let text = i.to_string();
            match text.parse::<i64>() {
                Ok(int) => Value::Number(int.into()),
                Err(_) => float_to_json(&text),
            }
        }
        ast::Value::Float(f) => float_to_json(&f.to_string()),
        ast::Value::List(items) => Value::Array(
            items
                .iter()
                .map(|item| literal_to_json(item, variables))
                .collect(),
        ),
        ast::Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, value)| (name.to_string(), literal_to_json(value, variables)))
                .collect(),
        ),
    }
}

fn float_to_json(text: &str) -> Value {
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
