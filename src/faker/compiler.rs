//! Compiles a field's output type into a fake value producer.

use apollo_compiler::schema::FieldDefinition;
use apollo_compiler::validation::Valid;
use apollo_compiler::Schema;
use rand::seq::SliceRandom;
use serde_json::Value;
use std::sync::Arc;

use super::directives::{field_sites, type_sites, DirectiveHandles};
use super::leaf::LeafFaker;
use super::sampler::{list_producer, SampleRange};
use super::shape::{AbstractType, LeafType, TypeShape};
use super::type_selector::{PossibleTypes, TypeSelector};
use super::Producer;
use crate::domain::{DirectiveSet, FakeObject, ResolveInfo, Resolved, ValueFaker};
use crate::error::FakerResult;

/// Everything the compiler needs while walking the schema
pub struct CompileContext<'a> {
    pub schema: &'a Valid<Schema>,
    pub handles: DirectiveHandles<'a>,
    pub faker: Arc<dyn ValueFaker>,
    pub possible_types: &'a PossibleTypes,
}

impl<'a> CompileContext<'a> {
    /// Fails when the schema lacks any of the faker directive definitions.
    pub fn new(
        schema: &'a Valid<Schema>,
        faker: Arc<dyn ValueFaker>,
        possible_types: &'a PossibleTypes,
    ) -> FakerResult<Self> {
        Ok(Self {
            schema,
            handles: DirectiveHandles::from_schema(schema)?,
            faker,
            possible_types,
        })
    }

    /// The directives that apply to a field: its own declarations, falling back
    /// per directive kind to those on its named output type.
    pub fn effective_directives(
        &self,
        shape: &TypeShape<'a>,
        field: &FieldDefinition,
        coordinate: &str,
    ) -> FakerResult<DirectiveSet> {
        let field_level = self
            .handles
            .resolve(field_sites(&field.directives), coordinate)?;
        let type_level = self.handles.resolve(
            type_sites(shape.named_directives()),
            field.ty.inner_named_type().as_str(),
        )?;
        Ok(field_level.over(type_level))
    }

    /// Compiles the producer for `field`. `coordinate` (`Type.field`) names the
    /// field in errors.
    pub fn compile_field(&self, field: &'a FieldDefinition, coordinate: &str) -> FakerResult<Producer> {
        let shape = TypeShape::of(self.schema, &field.ty)?;
        let directives = self.effective_directives(&shape, field, coordinate)?;
        Ok(self.compile(&shape, &directives))
    }

    pub fn compile(&self, shape: &TypeShape<'a>, directives: &DirectiveSet) -> Producer {
        match shape {
            TypeShape::NonNull(inner) => self.compile(inner, directives),
            TypeShape::List(inner) => {
                let item = self.compile(inner, directives);
                list_producer(item, SampleRange::from_config(directives.sample.as_ref()))
            }
            TypeShape::Abstract(abstract_type) => self.abstract_producer(*abstract_type, directives),
            TypeShape::Leaf(leaf) => self.leaf_producer(*leaf, directives),
            TypeShape::Object(_) => object_producer(directives),
        }
    }

    /// Only the concrete type is decided here; the object's fields are faked
    /// when they are selected.
    fn abstract_producer(&self, abstract_type: AbstractType<'a>, directives: &DirectiveSet) -> Producer {
        let candidates = self
            .possible_types
            .get(abstract_type.name())
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::<apollo_compiler::Name>::new()));
        let selector = TypeSelector::new(
            abstract_type.name().as_str(),
            candidates,
            directives.examples.as_ref(),
        );
        Arc::new(move |_: &ResolveInfo<'_>| match selector.select() {
            Some(name) => Resolved::Object(FakeObject::typed(name)),
            None => Resolved::null(),
        })
    }

    fn leaf_producer(&self, leaf: LeafType<'a>, directives: &DirectiveSet) -> Producer {
        if let Some(examples) = &directives.examples {
            return pick_value(examples.values.clone(), Resolved::literal);
        }
        let faker = self.faker.clone();
        if let Some(config) = directives.fake.clone() {
            return Arc::new(move |_: &ResolveInfo<'_>| Resolved::Leaf(faker.generate(&config)));
        }
        let leaf = LeafFaker::new(leaf);
        Arc::new(move |_: &ResolveInfo<'_>| Resolved::Leaf(leaf.fake(faker.as_ref())))
    }
}

fn object_producer(directives: &DirectiveSet) -> Producer {
    match &directives.examples {
        Some(examples) => pick_value(examples.values.clone(), |value| match value {
            Value::Object(map) => Resolved::Object(FakeObject::example(map)),
            other => Resolved::literal(other),
        }),
        None => Arc::new(|_: &ResolveInfo<'_>| Resolved::Object(FakeObject::placeholder())),
    }
}

/// Uniform pick among `values`, lifted with `lift`
fn pick_value(values: Vec<Value>, lift: fn(Value) -> Resolved) -> Producer {
    Arc::new(move |_: &ResolveInfo<'_>| {
        values
            .choose(&mut rand::thread_rng())
            .cloned()
            .map(lift)
            .unwrap_or_else(Resolved::null)
    })
}
