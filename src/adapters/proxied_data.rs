//! Real values from an upstream GraphQL response, injected by resolution path.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{FieldError, Injected, OverrideLookup, PathSegment};

#[derive(Debug, Deserialize)]
struct UpstreamResponse {
    #[serde(default)]
    data: Value,
    #[serde(default)]
    errors: Vec<UpstreamError>,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    message: String,
    #[serde(default)]
    path: Vec<PathSegment>,
}

/// [`OverrideLookup`] over the `data` and `errors` of a GraphQL response.
///
/// Paths are response paths: response keys and list indices from the
/// operation root. An error whose path matches is injected as a field error;
/// otherwise the value at the path, when present, is injected as-is.
#[derive(Debug, Clone, Default)]
pub struct ProxiedData {
    data: Value,
    errors: Vec<(Vec<PathSegment>, FieldError)>,
}

impl ProxiedData {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    pub fn with_error(mut self, path: Vec<PathSegment>, error: FieldError) -> Self {
        self.errors.push((path, error));
        self
    }

    /// Builds the lookup from a response body `{ "data": ..., "errors": [...] }`.
    /// Errors without a path are dropped.
    pub fn from_response(response: Value) -> Result<Self, serde_json::Error> {
        let response: UpstreamResponse = serde_json::from_value(response)?;
        let errors = response
            .errors
            .into_iter()
            .filter(|error| !error.path.is_empty())
            .map(|error| (error.path, FieldError::new(error.message)))
            .collect();
        Ok(Self {
            data: response.data,
            errors,
        })
    }

    fn value_at(&self, path: &[PathSegment]) -> Option<&Value> {
        path.iter().try_fold(&self.data, |current, segment| match segment {
            PathSegment::Key(key) => current.as_object()?.get(key),
            PathSegment::Index(index) => current.as_array()?.get(*index),
        })
    }
}

impl OverrideLookup for ProxiedData {
    fn lookup(&self, path: &[PathSegment]) -> Option<Injected> {
        if let Some((_, error)) = self.errors.iter().find(|(error_path, _)| error_path == path) {
            return Some(Injected::Error(error.clone()));
        }
        if path.is_empty() {
            return None;
        }
        self.value_at(path).cloned().map(Injected::Value)
    }
}
