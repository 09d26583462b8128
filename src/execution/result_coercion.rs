//! Serialization of resolved leaf values to their declared scalar or enum type.
//!
//! Built-in scalars accept the same loose inputs a JavaScript GraphQL server
//! would serialize (numeric strings for numbers, numbers for strings), since
//! faked and proxied values are not always typed exactly.

use apollo_compiler::schema::ExtendedType;
use serde_json::{Number, Value};

pub fn coerce_leaf(type_def: &ExtendedType, value: Value) -> Result<Value, String> {
    match type_def {
        ExtendedType::Enum(enum_def) => match value.as_str() {
            Some(text) if enum_def.values.contains_key(text) => Ok(value),
            _ => Err(format!("Resolver returned {value}, expected enum {}", enum_def.name)),
        },
        ExtendedType::Scalar(scalar) => {
            let coerced = match scalar.name.as_str() {
                "Int" => coerce_int(&value),
                "Float" => coerce_float(&value),
                "String" => coerce_string(&value),
                "Boolean" => coerce_boolean(&value),
                "ID" => coerce_id(&value),
                // custom scalars pass through, objects and arrays included
                _ => return Ok(value),
            };
            coerced.ok_or_else(|| format!("Resolver returned {value}, expected {}", scalar.name))
        }
        _ => Err(format!("{} is not a leaf type", type_def.name())),
    }
}

fn coerce_int(value: &Value) -> Option<Value> {
    let int = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.abs() <= i32::MAX as f64)
                .map(|float| float as i64)
        })?,
        Value::String(text) => text.trim().parse::<i64>().ok()?,
        Value::Bool(flag) => i64::from(*flag),
        _ => return None,
    };
    i32::try_from(int).ok().map(Value::from)
}

fn coerce_float(value: &Value) -> Option<Value> {
    let float = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        _ => return None,
    };
    Number::from_f64(float).map(Value::Number)
}

fn coerce_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Number(number) => Some(Value::String(number.to_string())),
        Value::Bool(flag) => Some(Value::String(flag.to_string())),
        _ => None,
    }
}

fn coerce_boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::Number(number) => number.as_f64().map(|float| Value::Bool(float != 0.0)),
        _ => None,
    }
}

fn coerce_id(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Number(number) if number.is_i64() || number.is_u64() => {
            Some(Value::String(number.to_string()))
        }
        _ => None,
    }
}
