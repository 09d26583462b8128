use apollo_compiler::collections::IndexMap;
use apollo_compiler::executable::{DirectiveList, Field, Selection};
use apollo_compiler::schema::{ExtendedType, ObjectType, Type};
use apollo_compiler::validation::Valid;
use apollo_compiler::ExecutableDocument;
use serde_json::Value;
use std::collections::HashSet;

use super::input_coercion::coerce_argument_values;
use super::result_coercion::coerce_leaf;
use super::GraphQLError;
use crate::domain::{FakeObject, JsonMap, PathSegment, RequestContext, ResolveInfo, Resolved};
use crate::faker::FakedSchema;
use crate::schema::literal_to_json;

/// A field error was recorded and the value must be nulled at the nearest
/// nullable position above it
#[derive(Debug, Clone, Copy)]
pub(crate) struct PropagateNull;

/// Absorbs a propagated null when `ty` is nullable
pub(crate) fn try_nullify(ty: &Type, result: Result<Value, PropagateNull>) -> Result<Value, PropagateNull> {
    match result {
        Ok(value) => Ok(value),
        Err(PropagateNull) if ty.is_non_null() => Err(PropagateNull),
        Err(PropagateNull) => Ok(Value::Null),
    }
}

/// State of one operation's execution
pub(crate) struct Execution<'a> {
    faked: &'a FakedSchema,
    document: &'a Valid<ExecutableDocument>,
    variables: &'a JsonMap,
    context: &'a RequestContext,
    path: Vec<PathSegment>,
    pub(crate) errors: Vec<GraphQLError>,
}

macro_rules! field_error {
    ($execution: expr, $($arg: tt)+) => {
        {
            $execution.push_error(format!($($arg)+));
            return Err(PropagateNull);
        }
    };
}

impl<'a> Execution<'a> {
    pub(crate) fn new(
        faked: &'a FakedSchema,
        document: &'a Valid<ExecutableDocument>,
        variables: &'a JsonMap,
        context: &'a RequestContext,
    ) -> Self {
        Self {
            faked,
            document,
            variables,
            context,
            path: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn push_error(&mut self, message: String) {
        self.errors.push(GraphQLError {
            message,
            path: self.path.clone(),
        });
    }

    pub(crate) fn execute_selection_set(
        &mut self,
        object_type: &'a ObjectType,
        source: &FakeObject,
        selections: impl IntoIterator<Item = &'a Selection>,
    ) -> Result<JsonMap, PropagateNull> {
        let mut grouped: IndexMap<&'a str, Vec<&'a Field>> = IndexMap::default();
        let mut visited_fragments = HashSet::new();
        self.collect_fields(object_type, selections, &mut grouped, &mut visited_fragments);

        let mut map = JsonMap::new();
        for (response_key, fields) in grouped {
            let ty = fields[0].ty();
            self.path.push(PathSegment::from(response_key));
            let result = self.execute_field(object_type, source, response_key, &fields);
            let result = try_nullify(ty, result);
            self.path.pop();
            map.insert(response_key.to_string(), result?);
        }
        Ok(map)
    }

    /// Groups the selected fields by response key, flattening fragments that
    /// apply to `object_type` and honoring `@skip` and `@include`
    fn collect_fields(
        &self,
        object_type: &'a ObjectType,
        selections: impl IntoIterator<Item = &'a Selection>,
        grouped: &mut IndexMap<&'a str, Vec<&'a Field>>,
        visited_fragments: &mut HashSet<&'a str>,
    ) {
        for selection in selections {
            if !self.is_included(selection.directives()) {
                continue;
            }
            match selection {
                Selection::Field(field) => grouped
                    .entry(field.response_key().as_str())
                    .or_default()
                    .push(field),
                Selection::FragmentSpread(spread) => {
                    let name = spread.fragment_name.as_str();
                    if !visited_fragments.insert(name) {
                        continue;
                    }
                    let document = self.document;
                    let Some(fragment) = document.fragments.get(name) else {
                        continue;
                    };
                    if self.applies(fragment.type_condition().as_str(), object_type) {
                        self.collect_fields(
                            object_type,
                            &fragment.selection_set.selections,
                            grouped,
                            visited_fragments,
                        );
                    }
                }
                Selection::InlineFragment(inline) => {
                    let applies = inline
                        .type_condition
                        .as_ref()
                        .map_or(true, |condition| self.applies(condition.as_str(), object_type));
                    if applies {
                        self.collect_fields(
                            object_type,
                            &inline.selection_set.selections,
                            grouped,
                            visited_fragments,
                        );
                    }
                }
            }
        }
    }

    fn applies(&self, type_condition: &str, object_type: &ObjectType) -> bool {
        type_condition == object_type.name.as_str()
            || self
                .faked
                .possible_types(type_condition)
                .iter()
                .any(|name| *name == object_type.name)
    }

    fn is_included(&self, directives: &DirectiveList) -> bool {
        let condition = |name: &str| {
            directives
                .get(name)
                .and_then(|directive| directive.specified_argument_by_name("if"))
                .map(|value| literal_to_json(value, Some(self.variables)) == Value::Bool(true))
        };
        condition("skip") != Some(true) && condition("include") != Some(false)
    }

    fn execute_field(
        &mut self,
        object_type: &'a ObjectType,
        source: &FakeObject,
        response_key: &str,
        fields: &[&'a Field],
    ) -> Result<Value, PropagateNull> {
        let field = fields[0];
        let field_name = field.name.as_str();
        if field_name == "__typename" {
            return Ok(Value::String(object_type.name.to_string()));
        }
        if field_name.starts_with("__") {
            field_error!(self, "Introspection field {field_name} is not supported")
        }

        let arguments = match coerce_argument_values(
            self.faked.schema(),
            &field.definition,
            &field.arguments,
            self.variables,
        ) {
            Ok(arguments) => arguments,
            Err(message) => field_error!(self, "{message}"),
        };
        let faked = self.faked;
        let Some(resolver) = faked.resolver(&object_type.name, field_name) else {
            field_error!(self, "No resolver for {}.{field_name}", object_type.name)
        };

        let info = ResolveInfo {
            parent_type: object_type.name.as_str(),
            field_name,
            response_key,
            source,
            arguments: &arguments,
            path: &self.path,
            context: self.context,
        };
        match resolver(&info) {
            Ok(resolved) => self.complete_value(field.ty(), resolved, fields),
            Err(error) => field_error!(self, "{}", error.message),
        }
    }

    /// Shapes a resolved value to `ty`, recursing into lists and selection sets.
    ///
    /// Returns `Err` once a field error has been recorded, to be turned into null
    /// at the nearest nullable position.
    fn complete_value(
        &mut self,
        ty: &'a Type,
        resolved: Resolved,
        fields: &[&'a Field],
    ) -> Result<Value, PropagateNull> {
        if let Resolved::Leaf(Value::Null) = resolved {
            if ty.is_non_null() {
                field_error!(self, "Non-null type {ty} resolved to null")
            }
            return Ok(Value::Null);
        }

        let faked = self.faked;
        let (type_name, resolved) = match (ty, resolved) {
            (Type::List(item_ty) | Type::NonNullList(item_ty), Resolved::List(items)) => {
                let mut completed = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    self.path.push(PathSegment::Index(index));
                    let result = self.complete_value(item_ty, item, fields);
                    let result = try_nullify(item_ty, result);
                    self.path.pop();
                    completed.push(result?);
                }
                return Ok(Value::Array(completed));
            }
            (Type::List(_) | Type::NonNullList(_), _) => {
                field_error!(self, "List type {ty} resolved to a non-list value")
            }
            (Type::Named(name) | Type::NonNullNamed(name), Resolved::List(items)) => {
                // custom scalars take arrays verbatim
                let list = Resolved::List(items);
                match faked.schema().types.get(name) {
                    Some(ExtendedType::Scalar(_)) => (name, Resolved::Leaf(list.to_json())),
                    _ => field_error!(self, "Non-list type {ty} resolved to a list"),
                }
            }
            (Type::Named(name) | Type::NonNullNamed(name), resolved) => (name, resolved),
        };

        let Some(type_def) = faked.schema().types.get(type_name) else {
            field_error!(self, "Undefined type {type_name}")
        };
        let object = match (type_def, resolved) {
            (ExtendedType::Scalar(_) | ExtendedType::Enum(_), Resolved::Leaf(value)) => {
                return match coerce_leaf(type_def, value) {
                    Ok(value) => Ok(value),
                    Err(message) => field_error!(self, "{message}"),
                };
            }
            (ExtendedType::Scalar(_), Resolved::Object(object)) => {
                return match coerce_leaf(type_def, object.to_json()) {
                    Ok(value) => Ok(value),
                    Err(message) => field_error!(self, "{message}"),
                };
            }
            (ExtendedType::Enum(_), _) => {
                field_error!(self, "Resolver returned an object, expected enum {type_name}")
            }
            (ExtendedType::InputObject(_), _) => {
                field_error!(self, "Field with input object type {type_name}")
            }
            (_, Resolved::Object(object)) => object,
            (_, _) => {
                field_error!(
                    self,
                    "Resolver returned a leaf value but expected an object for type {type_name}"
                )
            }
        };

        let object_type = match type_def {
            ExtendedType::Object(object_type) => object_type,
            _ => {
                let Some(concrete) = faked.resolve_abstract_type(type_name, &object) else {
                    field_error!(self, "Could not resolve a concrete type for {type_name}")
                };
                match faked.schema().get_object(&concrete) {
                    Some(object_type) => object_type,
                    None => field_error!(self, "Resolved type {concrete} is not an object type"),
                }
            }
        };
        self.execute_selection_set(
            object_type,
            &object,
            fields
                .iter()
                .copied()
                .flat_map(|field| &field.selection_set.selections),
        )
        .map(Value::Object)
    }
}
