//! # gql-faker
//!
//! Serves plausible fake data for any GraphQL schema.
//!
//! Every field of every object type gets a resolver compiled from its output
//! type and three schema directives:
//!
//! - `@fake(type: ..., options: ..., locale: ...)` picks a generator for a leaf
//! - `@examples(values: [...])` picks one of the given literal values
//! - `@sample(min:, max:, size:)` sets the length of generated lists
//!
//! Real values can be injected by response path, and Relay-style mutations
//! echo their input back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gql_faker::{Executor, FakedSchema, Request, StdFaker};
//! use std::sync::Arc;
//!
//! fn main() -> anyhow::Result<()> {
//!     let sdl = r#"type Query { name: String @fake(type: "firstName") }"#;
//!     let faked = FakedSchema::from_sdl(sdl, Arc::new(StdFaker::default()))?;
//!
//!     let response = Executor::new(&faked).execute(&Request::new("{ name }"));
//!     println!("{}", serde_json::to_string(&response)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: directive configuration and the values resolvers exchange
//! - **Faker**: compiles and installs the fake resolvers
//! - **Adapters**: value generation and proxied data sources
//! - **Execution**: runs operations against a faked schema
//! - **Config**: settings management

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod execution;
pub mod faker;
pub mod schema;

pub use adapters::proxied_data::ProxiedData;
pub use adapters::std_faker::StdFaker;
pub use config::Settings;
pub use error::{FakerError, FakerResult};
pub use execution::{Executor, GraphQLError, Request, Response};
pub use faker::{fake_schema, FakedSchema};
pub use schema::load_schema;
