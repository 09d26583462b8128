//! Coercion of variable and argument values against their declared input types.

use apollo_compiler::ast::{Argument, Value as Literal};
use apollo_compiler::executable::Operation;
use apollo_compiler::schema::{ExtendedType, FieldDefinition, InputValueDefinition, Type};
use apollo_compiler::validation::Valid;
use apollo_compiler::{Node, Schema};
use serde_json::Value;

use crate::domain::JsonMap;
use crate::schema::literal_to_json;

/// Coerces the request's raw variables for `operation`. A variable resolves to
/// the provided value, then its default; required variables must be provided.
pub fn coerce_variable_values(
    schema: &Valid<Schema>,
    operation: &Operation,
    provided: &JsonMap,
) -> Result<JsonMap, String> {
    let mut coerced = JsonMap::new();
    for definition in &operation.variables {
        let name = definition.name.as_str();
        let value = match provided.get(name) {
            Some(value) => coerce_input_value(schema, &definition.ty, value)
                .map_err(|message| format!("Variable ${name}: {message}"))?,
            None => match &definition.default_value {
                Some(default) => literal_to_json(default, None),
                None if definition.ty.is_non_null() => {
                    return Err(format!(
                        "Variable ${name} of required type {} was not provided",
                        definition.ty
                    ))
                }
                None => continue,
            },
        };
        coerced.insert(name.to_string(), value);
    }
    Ok(coerced)
}

/// Coerces the arguments given to a field, filling in declared defaults
pub fn coerce_argument_values(
    schema: &Valid<Schema>,
    definition: &FieldDefinition,
    arguments: &[Node<Argument>],
    variables: &JsonMap,
) -> Result<JsonMap, String> {
    let mut coerced = JsonMap::new();
    for argument_definition in &definition.arguments {
        let name = argument_definition.name.as_str();
        let given = arguments
            .iter()
            .find(|argument| argument.name == argument_definition.name)
            .filter(|argument| match &*argument.value {
                Literal::Variable(variable) => variables.contains_key(variable.as_str()),
                _ => true,
            });
        match given {
            Some(argument) => {
                let value = literal_to_json(&argument.value, Some(variables));
                let value = coerce_input_value(schema, &argument_definition.ty, &value)
                    .map_err(|message| format!("Argument '{name}': {message}"))?;
                coerced.insert(name.to_string(), value);
            }
            None => {
                if let Some(value) = default_of(argument_definition) {
                    coerced.insert(name.to_string(), value);
                } else if argument_definition.ty.is_non_null() {
                    return Err(format!("Missing required argument '{name}'"));
                }
            }
        }
    }
    Ok(coerced)
}

fn default_of(definition: &InputValueDefinition) -> Option<Value> {
    definition
        .default_value
        .as_ref()
        .map(|default| literal_to_json(default, None))
}

/// Coerces a JSON input value to `ty`
pub fn coerce_input_value(schema: &Valid<Schema>, ty: &Type, value: &Value) -> Result<Value, String> {
    if value.is_null() {
        if ty.is_non_null() {
            return Err(format!("null given for non-null type {ty}"));
        }
        return Ok(Value::Null);
    }
    match ty {
        Type::List(item) | Type::NonNullList(item) => match value {
            Value::Array(items) => items
                .iter()
                .map(|item_value| coerce_input_value(schema, item, item_value))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            // a single value stands for a list of one
            single => Ok(Value::Array(vec![coerce_input_value(schema, item, single)?])),
        },
        Type::Named(name) | Type::NonNullNamed(name) => match schema.types.get(name) {
            Some(ExtendedType::Scalar(_)) => coerce_scalar(name.as_str(), value),
            Some(ExtendedType::Enum(enum_type)) => match value.as_str() {
                Some(text) if enum_type.values.contains_key(text) => Ok(value.clone()),
                _ => Err(format!("{value} is not a value of enum {name}")),
            },
            Some(ExtendedType::InputObject(input_object)) => {
                let Value::Object(fields) = value else {
                    return Err(format!("expected an object for input type {name}, got {value}"));
                };
                if let Some(unknown) = fields
                    .keys()
                    .find(|key| !input_object.fields.contains_key(key.as_str()))
                {
                    return Err(format!("unknown field '{unknown}' for input type {name}"));
                }
                let mut coerced = JsonMap::new();
                for (field_name, field) in &input_object.fields {
                    match fields.get(field_name.as_str()) {
                        Some(field_value) => {
                            let field_value = coerce_input_value(schema, &field.ty, field_value)
                                .map_err(|message| format!("{name}.{field_name}: {message}"))?;
                            coerced.insert(field_name.to_string(), field_value);
                        }
                        None => {
                            if let Some(default) = default_of(field) {
                                coerced.insert(field_name.to_string(), default);
                            } else if field.ty.is_non_null() {
                                return Err(format!("missing required field {name}.{field_name}"));
                            }
                        }
                    }
                }
                Ok(Value::Object(coerced))
            }
            Some(_) => Err(format!("{name} is not an input type")),
            None => Err(format!("unknown type {name}")),
        },
    }
}

fn coerce_scalar(type_name: &str, value: &Value) -> Result<Value, String> {
    let valid = match type_name {
        "Int" => value
            .as_i64()
            .is_some_and(|int| i32::try_from(int).is_ok()),
        "Float" => value.is_number(),
        "String" => value.is_string(),
        "Boolean" => value.is_boolean(),
        "ID" => {
            if let Some(int) = value.as_i64() {
                return Ok(Value::String(int.to_string()));
            }
            value.is_string()
        }
        // custom scalars take any value
        _ => true,
    };
    if valid {
        Ok(value.clone())
    } else {
        Err(format!("{value} is not a valid {type_name}"))
    }
}
