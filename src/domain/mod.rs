use serde_json::Value;

pub mod directives;
pub mod resolution;

pub use directives::{
    DirectiveSet, ExamplesConfig, FakeConfig, FakeKind, FakeOptions, Locale, SampleConfig,
};
pub use resolution::{
    FakeObject, FieldError, Injected, JsonMap, PathSegment, RequestContext, ResolveInfo, Resolved,
};

/// Source of random leaf values.
///
/// The engine only decides *which* generator applies to a field; producing the
/// actual string or number is delegated here so the randomness library stays
/// swappable. Implementations are called concurrently from many requests.
pub trait ValueFaker: Send + Sync {
    /// Value for a scalar looked up by its exact type name, `None` if no faker
    /// is registered for that name.
    fn scalar(&self, type_name: &str) -> Option<Value>;

    /// Value for a `@fake` declaration
    fn generate(&self, config: &FakeConfig) -> Value;
}

/// Real data keyed by resolution path, injected by a proxy or merge collaborator.
pub trait OverrideLookup: Send + Sync {
    fn lookup(&self, path: &[PathSegment]) -> Option<Injected>;
}
