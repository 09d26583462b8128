//! Values that flow through field resolvers at request time.

use apollo_compiler::Name;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use super::OverrideLookup;

pub type JsonMap = Map<String, Value>;

/// A field-level error, surfaced in the response `errors` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// One segment of a response path: a response key or a list index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// A value injected at a resolution path by an override source
#[derive(Debug, Clone, PartialEq)]
pub enum Injected {
    Value(Value),
    Error(FieldError),
}

impl Injected {
    pub fn into_resolved(self) -> Result<Resolved, FieldError> {
        match self {
            Injected::Value(value) => Ok(Resolved::literal(value)),
            Injected::Error(error) => Err(error),
        }
    }
}

/// The object a field resolver runs against.
///
/// Faked composites carry no data of their own: their fields are faked when they
/// are resolved. Two kinds of data can ride along instead:
///
/// * `example`: an object picked from `@examples`, whose entries are literal
///   values for the fields of the same name.
/// * `data`: real or echoed values (proxied data, a Relay mutation's input, the
///   nested objects of an example) keyed by response key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeObject {
    pub type_name: Option<Name>,
    pub example: Option<JsonMap>,
    pub data: Option<JsonMap>,
}

impl FakeObject {
    /// An empty placeholder whose fields will all be faked
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// A placeholder impersonating a concrete type of an abstract field
    pub fn typed(type_name: Name) -> Self {
        Self {
            type_name: Some(type_name),
            ..Self::default()
        }
    }

    /// An example object: its own entries override faking for its fields
    pub fn example(example: JsonMap) -> Self {
        Self {
            example: Some(example),
            ..Self::default()
        }
    }

    /// An object carrying real values keyed by response key
    pub fn with_data(data: JsonMap) -> Self {
        let type_name = data
            .get("__typename")
            .and_then(Value::as_str)
            .and_then(|name| Name::new(name).ok());
        Self {
            type_name,
            example: None,
            data: Some(data),
        }
    }

    /// The literal example value for `field_name`, if this object was picked from
    /// `@examples` and the example declares a non-null value for that field.
    pub fn example_value(&self, field_name: &str) -> Option<&Value> {
        self.example
            .as_ref()?
            .get(field_name)
            .filter(|value| !value.is_null())
    }

    /// The carried value under `response_key`; an explicit null counts as present.
    pub fn data_value(&self, response_key: &str) -> Option<&Value> {
        self.data.as_ref()?.get(response_key)
    }

    /// The type-name marker declared by this object, if any
    pub fn declared_type_name(&self) -> Option<&str> {
        if let Some(name) = &self.type_name {
            return Some(name.as_str());
        }
        self.example
            .as_ref()
            .and_then(|example| example.get("__typename"))
            .and_then(Value::as_str)
    }

    /// JSON rendering used when an object lands where a custom scalar is expected
    pub fn to_json(&self) -> Value {
        let mut map = self.example.clone().unwrap_or_default();
        if let Some(data) = &self.data {
            map.extend(data.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Value::Object(map)
    }
}

/// What a field resolver produces
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Leaf(Value),
    Object(FakeObject),
    List(Vec<Resolved>),
}

impl Resolved {
    pub fn null() -> Self {
        Resolved::Leaf(Value::Null)
    }

    /// Lifts a literal JSON value: objects become data-carrying objects so their
    /// own fields resolve from the literal, arrays become lists.
    pub fn literal(value: Value) -> Self {
        match value {
            Value::Object(map) => Resolved::Object(FakeObject::with_data(map)),
            Value::Array(items) => Resolved::List(items.into_iter().map(Resolved::literal).collect()),
            leaf => Resolved::Leaf(leaf),
        }
    }

    /// Plain JSON rendering, for values that land on a custom scalar
    pub fn to_json(&self) -> Value {
        match self {
            Resolved::Leaf(value) => value.clone(),
            Resolved::Object(object) => object.to_json(),
            Resolved::List(items) => Value::Array(items.iter().map(Resolved::to_json).collect()),
        }
    }

    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Resolved::Leaf(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&FakeObject> {
        match self {
            Resolved::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Resolved]> {
        match self {
            Resolved::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Per-request state shared by every resolver call of one operation
#[derive(Clone, Default)]
pub struct RequestContext {
    overrides: Option<Arc<dyn OverrideLookup>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: Arc<dyn OverrideLookup>) -> Self {
        Self {
            overrides: Some(overrides),
        }
    }

    pub fn injected(&self, path: &[PathSegment]) -> Option<Injected> {
        self.overrides.as_ref()?.lookup(path)
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("overrides", &self.overrides.is_some())
            .finish()
    }
}

/// Everything a field resolver is invoked with
#[derive(Debug, Clone, Copy)]
pub struct ResolveInfo<'a> {
    pub parent_type: &'a str,
    pub field_name: &'a str,
    pub response_key: &'a str,
    pub source: &'a FakeObject,
    pub arguments: &'a JsonMap,
    pub path: &'a [PathSegment],
    pub context: &'a RequestContext,
}

impl ResolveInfo<'_> {
    /// A real value injected for this field: first from the request's override
    /// source at the current path, then from data carried by the source object.
    pub fn injected(&self) -> Option<Injected> {
        if let Some(injected) = self.context.injected(self.path) {
            return Some(injected);
        }
        self.source
            .data_value(self.response_key)
            .cloned()
            .map(Injected::Value)
    }
}
