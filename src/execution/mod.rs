//! A minimal synchronous GraphQL executor over a [`FakedSchema`].
//!
//! Queries and mutations run their selection sets against the installed fake
//! resolvers, with result coercion and null propagation done here.
//! Subscriptions and introspection are not executed.

use apollo_compiler::ast::OperationType;
use apollo_compiler::ExecutableDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

mod engine;
pub mod input_coercion;
pub mod result_coercion;

use crate::domain::{FakeObject, JsonMap, OverrideLookup, PathSegment, RequestContext};
use crate::faker::FakedSchema;
use engine::Execution;
use input_coercion::coerce_variable_values;

/// A GraphQL request as received over HTTP
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: JsonMap,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    /// Sets the variables from a JSON object; any other value clears them
    pub fn variables(mut self, variables: Value) -> Self {
        self.variables = match variables {
            Value::Object(map) => map,
            _ => JsonMap::new(),
        };
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }
}

/// A GraphQL response. `data` is absent when the request failed before execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
}

impl Response {
    fn request_errors(errors: Vec<GraphQLError>) -> Self {
        Self { data: None, errors }
    }

    /// The value at `path` in `data`, for assertions
    pub fn data_at(&self, path: &[PathSegment]) -> Option<&Value> {
        path.iter()
            .try_fold(self.data.as_ref()?, |current, segment| match segment {
                PathSegment::Key(key) => current.as_object()?.get(key),
                PathSegment::Index(index) => current.as_array()?.get(*index),
            })
    }
}

/// Runs requests against a faked schema
#[derive(Clone)]
pub struct Executor<'s> {
    schema: &'s FakedSchema,
    overrides: Option<Arc<dyn OverrideLookup>>,
}

impl<'s> Executor<'s> {
    pub fn new(schema: &'s FakedSchema) -> Self {
        Self {
            schema,
            overrides: None,
        }
    }

    /// Injects real values by response path into every request
    pub fn with_overrides(mut self, overrides: Arc<dyn OverrideLookup>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn execute(&self, request: &Request) -> Response {
        let schema = self.schema.schema();
        let document =
            match ExecutableDocument::parse_and_validate(schema, &request.query, "query.graphql") {
                Ok(document) => document,
                Err(e) => {
                    tracing::debug!("Rejected invalid operation");
                    return Response::request_errors(
                        e.errors
                            .iter()
                            .map(|diagnostic| GraphQLError::new(diagnostic.to_json().message))
                            .collect(),
                    );
                }
            };

        let Ok(operation) = document.operations.get(request.operation_name.as_deref()) else {
            let message = match &request.operation_name {
                Some(name) => format!("Unknown operation named \"{name}\""),
                None => "Must provide operation name if query contains multiple operations".to_string(),
            };
            return Response::request_errors(vec![GraphQLError::new(message)]);
        };
        if operation.operation_type == OperationType::Subscription {
            return Response::request_errors(vec![GraphQLError::new(
                "Subscriptions are not supported",
            )]);
        }
        let variables = match coerce_variable_values(schema, operation, &request.variables) {
            Ok(variables) => variables,
            Err(message) => return Response::request_errors(vec![GraphQLError::new(message)]),
        };
        let Some(root_type) = schema.get_object(&operation.selection_set.ty) else {
            return Response::request_errors(vec![GraphQLError::new(format!(
                "Root type {} is not defined",
                operation.selection_set.ty
            ))]);
        };

        let context = match &self.overrides {
            Some(overrides) => RequestContext::with_overrides(overrides.clone()),
            None => RequestContext::new(),
        };
        tracing::debug!(
            "Executing {:?} {}",
            operation.operation_type,
            operation.name.as_ref().map_or("<anonymous>", |name| name.as_str())
        );

        let mut execution = Execution::new(self.schema, &document, &variables, &context);
        let data = execution
            .execute_selection_set(
                root_type,
                &FakeObject::placeholder(),
                &operation.selection_set.selections,
            )
            .map(Value::Object)
            .unwrap_or(Value::Null);
        Response {
            data: Some(data),
            errors: execution.errors,
        }
    }
}
