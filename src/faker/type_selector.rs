//! Choosing the concrete object type behind interface and union fields.

use apollo_compiler::schema::ExtendedType;
use apollo_compiler::validation::Valid;
use apollo_compiler::{Name, Schema};
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{ExamplesConfig, FakeObject};

/// Concrete object types of every interface and union, in schema order
pub type PossibleTypes = HashMap<Name, Arc<[Name]>>;

pub fn possible_types(schema: &Valid<Schema>) -> PossibleTypes {
    let mut possible = PossibleTypes::new();
    for (name, ty) in &schema.types {
        let members: Vec<Name> = match ty {
            ExtendedType::Union(union_type) => union_type
                .members
                .iter()
                .map(|member| member.name.clone())
                .collect(),
            ExtendedType::Interface(_) => schema
                .types
                .values()
                .filter_map(|candidate| match candidate {
                    ExtendedType::Object(object)
                        if object
                            .implements_interfaces
                            .iter()
                            .any(|interface| interface.name == *name) =>
                    {
                        Some(object.name.clone())
                    }
                    _ => None,
                })
                .collect(),
            _ => continue,
        };
        possible.insert(name.clone(), members.into());
    }
    possible
}

/// Per-field discriminator for an abstract output type
#[derive(Debug, Clone)]
pub enum TypeSelector {
    /// `@examples(type:)` named one of the possible types
    Fixed(Name),
    /// A fresh uniform pick on every invocation
    Random(Arc<[Name]>),
}

impl TypeSelector {
    /// Builds the selector for a field whose output type is `abstract_name`.
    ///
    /// A declared example type that is not a possible type falls back to a
    /// random pick.
    pub fn new(
        abstract_name: &str,
        candidates: Arc<[Name]>,
        examples: Option<&ExamplesConfig>,
    ) -> Self {
        let declared = examples.and_then(|examples| examples.type_name.as_deref());
        if let Some(declared) = declared {
            if let Some(target) = candidates.iter().find(|candidate| candidate.as_str() == declared) {
                return TypeSelector::Fixed(target.clone());
            }
            tracing::warn!(
                "@examples type '{}' is not a possible type of {}, picking at random",
                declared,
                abstract_name
            );
        }
        TypeSelector::Random(candidates)
    }

    pub fn select(&self) -> Option<Name> {
        match self {
            TypeSelector::Fixed(name) => Some(name.clone()),
            TypeSelector::Random(candidates) => candidates.choose(&mut rand::thread_rng()).cloned(),
        }
    }
}

/// Schema-wide discriminator installed on an interface or union: reads the
/// object's type-name marker, falling back to a random possible type when the
/// marker is missing or names a type outside the abstract type.
#[derive(Debug, Clone)]
pub struct AbstractTypeResolver {
    candidates: Arc<[Name]>,
}

impl AbstractTypeResolver {
    pub fn new(candidates: Arc<[Name]>) -> Self {
        Self { candidates }
    }

    pub fn resolve(&self, object: &FakeObject) -> Option<Name> {
        if let Some(declared) = object.declared_type_name() {
            if let Some(name) = self.candidates.iter().find(|name| name.as_str() == declared) {
                return Some(name.clone());
            }
        }
        self.candidates.choose(&mut rand::thread_rng()).cloned()
    }

    pub fn candidates(&self) -> &[Name] {
        &self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::load_schema;
    use std::collections::HashSet;

    const SDL: &str = r#"
        type Query { pet: Pet thing: Thing }
        interface Pet { name: String }
        type Dog implements Pet { name: String }
        type Cat implements Pet { name: String }
        type Rock { weight: Int }
        union Thing = Rock | Dog
    "#;

    fn names(list: &[Name]) -> Vec<&str> {
        list.iter().map(Name::as_str).collect()
    }

    #[test]
    fn test_possible_types() {
        let schema = load_schema(SDL).unwrap();
        let possible = possible_types(&schema);
        assert_eq!(names(&possible["Pet"]), vec!["Dog", "Cat"]);
        assert_eq!(names(&possible["Thing"]), vec!["Rock", "Dog"]);
        assert!(!possible.contains_key("Dog"));
    }

    #[test]
    fn test_declared_type_is_fixed() {
        let schema = load_schema(SDL).unwrap();
        let possible = possible_types(&schema);
        let examples = ExamplesConfig {
            values: vec![serde_json::json!({})],
            type_name: Some("Cat".to_string()),
        };
        let selector = TypeSelector::new("Pet", possible["Pet"].clone(), Some(&examples));
        for _ in 0..50 {
            assert_eq!(selector.select().unwrap().as_str(), "Cat");
        }
    }

    #[test]
    fn test_unknown_declared_type_falls_back_to_random() {
        let schema = load_schema(SDL).unwrap();
        let possible = possible_types(&schema);
        let examples = ExamplesConfig {
            values: vec![serde_json::json!({})],
            type_name: Some("Rock".to_string()),
        };
        let selector = TypeSelector::new("Pet", possible["Pet"].clone(), Some(&examples));
        assert!(matches!(selector, TypeSelector::Random(_)));

        let seen: HashSet<String> = (0..200)
            .filter_map(|_| selector.select())
            .map(|name| name.to_string())
            .collect();
        assert_eq!(seen, HashSet::from(["Dog".to_string(), "Cat".to_string()]));
    }

    #[test]
    fn test_schema_wide_resolver_reads_marker() {
        let schema = load_schema(SDL).unwrap();
        let possible = possible_types(&schema);
        let resolver = AbstractTypeResolver::new(possible["Thing"].clone());

        let marked = FakeObject::typed(Name::new("Rock").unwrap());
        assert_eq!(resolver.resolve(&marked).unwrap().as_str(), "Rock");

        let mut example = serde_json::Map::new();
        example.insert("__typename".to_string(), "Dog".into());
        assert_eq!(resolver.resolve(&FakeObject::example(example)).unwrap().as_str(), "Dog");

        for _ in 0..50 {
            let picked = resolver.resolve(&FakeObject::typed(Name::new("Cat").unwrap())).unwrap();
            assert!(resolver.candidates().contains(&picked));
        }
    }
}
