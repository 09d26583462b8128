//! Wraps compiled producers into field resolvers and attaches them to every
//! object type of the schema.

use apollo_compiler::ast::OperationType;
use apollo_compiler::schema::{ExtendedType, FieldDefinition, ObjectType, Type};
use apollo_compiler::validation::Valid;
use apollo_compiler::{Name, Schema};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use super::compiler::CompileContext;
use super::{FieldResolver, Producer};
use crate::domain::{FakeObject, Injected, ResolveInfo, Resolved};
use crate::error::FakerResult;

/// Field resolvers of one object type, by field name
pub type TypeResolvers = HashMap<Name, FieldResolver>;

/// Compiles and installs a resolver for every field of every object type.
/// Introspection types are left alone.
pub fn install_resolvers<'a>(ctx: &CompileContext<'a>) -> FakerResult<HashMap<Name, TypeResolvers>> {
    let mutation_root = ctx.schema.root_operation(OperationType::Mutation);
    let mut installed = HashMap::new();
    for (type_name, ty) in &ctx.schema.types {
        let ExtendedType::Object(object) = ty else {
            continue;
        };
        if type_name.as_str().starts_with("__") {
            continue;
        }
        let is_mutation_root = mutation_root == Some(type_name);
        installed.insert(type_name.clone(), install_object(ctx, object, is_mutation_root)?);
    }
    Ok(installed)
}

fn install_object<'a>(
    ctx: &CompileContext<'a>,
    object: &'a ObjectType,
    is_mutation_root: bool,
) -> FakerResult<TypeResolvers> {
    let mut resolvers = TypeResolvers::new();
    for (field_name, field) in &object.fields {
        let coordinate = format!("{}.{}", object.name, field_name);
        let resolver = if is_mutation_root && is_relay_mutation(ctx.schema, field) {
            tracing::debug!("{} resolves as a Relay mutation", coordinate);
            relay_mutation_resolver()
        } else {
            tracing::debug!("Compiled fake producer for {}", coordinate);
            field_resolver(ctx.compile_field(field, &coordinate)?)
        };
        resolvers.insert(field_name.clone(), resolver);
    }
    Ok(resolvers)
}

/// A mutation with exactly one argument `input` of non-null input object type
/// whose output is a bare object type.
pub fn is_relay_mutation(schema: &Valid<Schema>, field: &FieldDefinition) -> bool {
    let [argument] = field.arguments.as_slice() else {
        return false;
    };
    if argument.name.as_str() != "input" {
        return false;
    }
    let input_is_object = match &*argument.ty {
        Type::NonNullNamed(name) => matches!(schema.types.get(name), Some(ExtendedType::InputObject(_))),
        _ => false,
    };
    let output_is_object = match &field.ty {
        Type::Named(name) => schema.get_object(name).is_some(),
        _ => false,
    };
    input_is_object && output_is_object
}

/// Layers the override checks over a fake producer: a literal from the source
/// example, then an injected value at the current path, then a fresh fake.
pub fn field_resolver(producer: Producer) -> FieldResolver {
    Arc::new(move |info: &ResolveInfo<'_>| {
        if let Some(value) = info.source.example_value(info.field_name) {
            return Ok(Resolved::literal(value.clone()));
        }
        if let Some(injected) = info.injected() {
            tracing::trace!("Using injected value at {:?}", info.path);
            return injected.into_resolved();
        }
        Ok(producer(info))
    })
}

/// Echoes the mutation's `input` shallow-merged with the injected value, whose
/// keys win. An injected error is the field's result.
pub fn relay_mutation_resolver() -> FieldResolver {
    Arc::new(|info: &ResolveInfo<'_>| {
        let mut merged = info
            .arguments
            .get("input")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        match info.injected() {
            Some(Injected::Error(error)) => return Err(error),
            Some(Injected::Value(Value::Object(overrides))) => merged.extend(overrides),
            Some(Injected::Value(_)) | None => {}
        }
        Ok(Resolved::Object(FakeObject::with_data(merged)))
    })
}
