//! The faking engine.
//!
//! [`fake_schema`] walks every object type of a validated schema once and
//! compiles a resolver for each of its fields from the field's output type and
//! its `@fake`, `@examples` and `@sample` declarations. Interfaces and unions get
//! a discriminator that maps a resolved object to one of their possible types.
//!
//! The result is immutable and shared across requests; all per-request state
//! travels in [`RequestContext`](crate::domain::RequestContext).

use apollo_compiler::validation::Valid;
use apollo_compiler::{Name, Schema};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub mod compiler;
pub mod directives;
pub mod installer;
pub mod leaf;
pub mod sampler;
pub mod shape;
pub mod type_selector;


use crate::domain::{FakeObject, FieldError, ResolveInfo, Resolved, ValueFaker};
use crate::error::FakerResult;
use crate::schema::load_schema;
use compiler::CompileContext;
use installer::{install_resolvers, TypeResolvers};
use type_selector::{possible_types, AbstractTypeResolver};

/// Produces a fake value for one field invocation
pub type Producer = Arc<dyn Fn(&ResolveInfo<'_>) -> Resolved + Send + Sync>;

/// An installed field resolver; errors are field-level
pub type FieldResolver = Arc<dyn Fn(&ResolveInfo<'_>) -> Result<Resolved, FieldError> + Send + Sync>;

/// A schema with a fake resolver on every object field
#[derive(Clone)]
pub struct FakedSchema {
    schema: Arc<Valid<Schema>>,
    resolvers: HashMap<Name, TypeResolvers>,
    type_resolvers: HashMap<Name, AbstractTypeResolver>,
}

/// Installs fake resolvers across `schema`.
///
/// Fails when the schema does not define the faker directives, or when a
/// directive declaration carries arguments that do not fit its configuration.
pub fn fake_schema(schema: Valid<Schema>, faker: Arc<dyn ValueFaker>) -> FakerResult<FakedSchema> {
    let possible = possible_types(&schema);
    let resolvers = {
        let ctx = CompileContext::new(&schema, faker, &possible)?;
        install_resolvers(&ctx)?
    };
    let type_resolvers: HashMap<Name, AbstractTypeResolver> = possible
        .into_iter()
        .map(|(name, candidates)| (name, AbstractTypeResolver::new(candidates)))
        .collect();

    let faked = FakedSchema {
        schema: Arc::new(schema),
        resolvers,
        type_resolvers,
    };
    tracing::info!(
        "Faked schema: {} object types, {} fields, {} abstract types",
        faked.resolvers.len(),
        faked.field_count(),
        faked.type_resolvers.len()
    );
    Ok(faked)
}

impl FakedSchema {
    /// Loads `sdl` with the faker directive definitions and fakes it.
    pub fn from_sdl(sdl: &str, faker: Arc<dyn ValueFaker>) -> FakerResult<Self> {
        fake_schema(load_schema(sdl)?, faker)
    }

    pub fn schema(&self) -> &Valid<Schema> {
        &self.schema
    }

    pub fn resolver(&self, type_name: &str, field_name: &str) -> Option<&FieldResolver> {
        self.resolvers.get(type_name)?.get(field_name)
    }

    pub fn has_resolvers(&self, type_name: &str) -> bool {
        self.resolvers.contains_key(type_name)
    }

    /// The concrete type for `object` where an interface or union is expected
    pub fn resolve_abstract_type(&self, abstract_type: &str, object: &FakeObject) -> Option<Name> {
        self.type_resolvers.get(abstract_type)?.resolve(object)
    }

    pub fn possible_types(&self, abstract_type: &str) -> &[Name] {
        self.type_resolvers
            .get(abstract_type)
            .map(AbstractTypeResolver::candidates)
            .unwrap_or(&[])
    }

    pub fn field_count(&self) -> usize {
        self.resolvers.values().map(HashMap::len).sum()
    }
}

impl fmt::Debug for FakedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakedSchema")
            .field("object_types", &self.resolvers.len())
            .field("fields", &self.field_count())
            .field("abstract_types", &self.type_resolvers.len())
            .finish()
    }
}
