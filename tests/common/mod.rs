#![allow(dead_code)]

use gql_faker::{Executor, FakedSchema, Request, Response, StdFaker};
use serde_json::Value;
use std::sync::Arc;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn faked(sdl: &str) -> FakedSchema {
    init_tracing();
    FakedSchema::from_sdl(sdl, Arc::new(StdFaker::default())).expect("schema should fake")
}

pub fn run(faked: &FakedSchema, query: &str) -> Response {
    Executor::new(faked).execute(&Request::new(query))
}

/// Runs `query` and returns its data, failing on any error
pub fn data(faked: &FakedSchema, query: &str) -> Value {
    let response = run(faked, query);
    assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
    response.data.expect("response should carry data")
}
