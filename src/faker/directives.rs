//! Reading `@fake`, `@examples` and `@sample` declarations off schema nodes.

use apollo_compiler::ast::{self, Directive, DirectiveDefinition};
use apollo_compiler::schema;
use apollo_compiler::validation::Valid;
use apollo_compiler::{Node, Schema};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::{DirectiveSet, ExamplesConfig, FakeConfig, SampleConfig};
use crate::error::{FakerError, FakerResult};
use crate::schema::literal_to_json;

pub const FAKE: &str = "fake";
pub const EXAMPLES: &str = "examples";
pub const SAMPLE: &str = "sample";

/// Declaration sites of a named type: its definition, then its extensions
pub fn type_sites(directives: &schema::DirectiveList) -> impl Iterator<Item = &Directive> {
    directives.iter().map(|component| &*component.node)
}

/// Declaration sites of a field definition
pub fn field_sites(directives: &ast::DirectiveList) -> impl Iterator<Item = &Directive> {
    directives.iter().map(|directive| &**directive)
}

/// The schema's definitions of the three faker directives
#[derive(Debug, Clone, Copy)]
pub struct DirectiveHandles<'a> {
    pub fake: &'a Node<DirectiveDefinition>,
    pub examples: &'a Node<DirectiveDefinition>,
    pub sample: &'a Node<DirectiveDefinition>,
}

impl<'a> DirectiveHandles<'a> {
    /// Fails when the schema does not define all three directives.
    pub fn from_schema(schema: &'a Valid<Schema>) -> FakerResult<Self> {
        let lookup = |name: &'static str| {
            schema
                .directive_definitions
                .get(name)
                .ok_or(FakerError::MissingDirective(name))
        };
        Ok(Self {
            fake: lookup(FAKE)?,
            examples: lookup(EXAMPLES)?,
            sample: lookup(SAMPLE)?,
        })
    }

    /// Resolves the directive configuration declared across `sites`.
    ///
    /// Sites are scanned in declaration order (definition first, then extensions)
    /// and for each directive kind the last declaration wins outright.
    /// `coordinate` names the node in error messages.
    pub fn resolve<'d>(
        &self,
        sites: impl IntoIterator<Item = &'d Directive>,
        coordinate: &str,
    ) -> FakerResult<DirectiveSet> {
        let mut fake = None;
        let mut examples = None;
        let mut sample = None;
        for directive in sites {
            if directive.name == self.fake.name {
                fake = Some(directive);
            } else if directive.name == self.examples.name {
                examples = Some(directive);
            } else if directive.name == self.sample.name {
                sample = Some(directive);
            }
        }

        let fake = fake
            .map(|d| parse_arguments::<FakeConfig>(FAKE, d, coordinate))
            .transpose()?;
        if let Some(config) = &fake {
            config
                .validate()
                .map_err(|e| FakerError::invalid_directive(FAKE, coordinate, e))?;
        }

        let examples = examples
            .map(|d| parse_arguments::<ExamplesConfig>(EXAMPLES, d, coordinate))
            .transpose()?;
        if let Some(config) = &examples {
            config
                .validate()
                .map_err(|e| FakerError::invalid_directive(EXAMPLES, coordinate, e))?;
        }

        let sample = sample
            .map(|d| parse_arguments::<SampleConfig>(SAMPLE, d, coordinate))
            .transpose()?;
        if let Some(config) = &sample {
            config
                .validate()
                .map_err(|e| FakerError::invalid_directive(SAMPLE, coordinate, e))?;
        }

        Ok(DirectiveSet {
            fake,
            examples,
            sample,
        })
    }
}

fn parse_arguments<T: DeserializeOwned>(
    kind: &'static str,
    directive: &Directive,
    coordinate: &str,
) -> FakerResult<T> {
    // Explicit nulls read the same as omitted arguments
    let arguments: Map<String, Value> = directive
        .arguments
        .iter()
        .map(|arg| (arg.name.to_string(), literal_to_json(&arg.value, None)))
        .filter(|(_, value)| !value.is_null())
        .collect();
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| FakerError::invalid_directive(kind, coordinate, e))
}
