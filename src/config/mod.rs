use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::domain::Locale;

/// Settings for the faking engine.
///
/// Loaded from an optional `gql-faker.{toml,yaml,json}` file, then from
/// environment variables such as `GQL_FAKER__FAKER__DEFAULT_LOCALE=fr`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub faker: FakerSettings,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct FakerSettings {
    /// Locale for `@fake` declarations that do not name one
    #[serde(default)]
    pub default_locale: Locale,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = std::path::Path::new(root).join("gql-faker");
        let s = Config::builder()
            .set_default("faker.default_locale", "en")?
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("GQL_FAKER").separator("__"))
            .build()
            .context("Failed to load gql-faker settings")?;

        let settings: Settings = s
            .try_deserialize()
            .context("Configuration validation failed")?;

        tracing::debug!(
            "Loaded settings from {}: default locale {:?}",
            root,
            settings.faker.default_locale
        );
        Ok(settings)
    }
}
