//! Values for scalar and enum types that carry no faker directive.

use apollo_compiler::Name;
use rand::seq::SliceRandom;
use serde_json::Value;

use super::shape::LeafType;
use crate::domain::ValueFaker;

/// Fakes a leaf value: a random enumerant, the registered scalar faker for the
/// type's name, or a `<TypeName>` placeholder when none is registered.
pub fn fake_leaf(leaf: LeafType<'_>, faker: &dyn ValueFaker) -> Value {
    LeafFaker::new(leaf).fake(faker)
}

/// A leaf type detached from the schema, so producers can own it
#[derive(Debug, Clone)]
pub enum LeafFaker {
    Enum(Vec<Name>),
    Scalar(Name),
}

impl LeafFaker {
    pub fn new(leaf: LeafType<'_>) -> Self {
        match leaf {
            LeafType::Enum(enum_type) => LeafFaker::Enum(enum_type.values.keys().cloned().collect()),
            LeafType::Scalar(scalar) => LeafFaker::Scalar(scalar.name.clone()),
        }
    }

    pub fn fake(&self, faker: &dyn ValueFaker) -> Value {
        match self {
            LeafFaker::Enum(values) => values
                .choose(&mut rand::thread_rng())
                .map(|value| Value::String(value.to_string()))
                .unwrap_or(Value::Null),
            LeafFaker::Scalar(name) => faker
                .scalar(name.as_str())
                .unwrap_or_else(|| placeholder(name.as_str())),
        }
    }
}

pub fn placeholder(type_name: &str) -> Value {
    Value::String(format!("<{type_name}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::std_faker::StdFaker;
    use crate::faker::shape::TypeShape;
    use crate::schema::load_schema;
    use std::collections::HashMap;

    const SDL: &str = r#"
        type Query { letter: Letter when: DateTime count: Int }
        enum Letter { A B C }
        scalar DateTime
    "#;

    fn leaf_of<'a>(
        schema: &'a apollo_compiler::validation::Valid<apollo_compiler::Schema>,
        field: &str,
    ) -> LeafType<'a> {
        let query = schema.get_object("Query").unwrap();
        match TypeShape::of(schema, &query.fields[field].ty).unwrap() {
            TypeShape::Leaf(leaf) => leaf,
            other => panic!("expected a leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_enum_values_are_uniform() {
        let schema = load_schema(SDL).unwrap();
        let faker = StdFaker::default();
        let leaf = leaf_of(&schema, "letter");

        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..3000 {
            let value = fake_leaf(leaf, &faker);
            *counts.entry(value.as_str().unwrap().to_string()).or_default() += 1;
        }

        assert_eq!(counts.len(), 3);
        for letter in ["A", "B", "C"] {
            let count = counts[letter];
            assert!(count > 800 && count < 1200, "{letter} seen {count} times");
        }
    }

    #[test]
    fn test_unknown_scalar_gets_placeholder() {
        let schema = load_schema(SDL).unwrap();
        let faker = StdFaker::default();
        assert_eq!(fake_leaf(leaf_of(&schema, "when"), &faker), "<DateTime>");
    }

    #[test]
    fn test_standard_scalar_uses_table() {
        let schema = load_schema(SDL).unwrap();
        let faker = StdFaker::default();
        let value = fake_leaf(leaf_of(&schema, "count"), &faker);
        assert!(value.is_i64());
    }
}
