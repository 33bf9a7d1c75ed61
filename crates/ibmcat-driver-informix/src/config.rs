//! Declarative introspection configuration.
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! capability = "legacy"          # or "modern" (default)
//! identifier_quote = '"'
//! uppercase_identifiers = false
//! catalog_schema = "APP"         # defaults to the connection's current schema
//! ```

use std::path::Path;

use ibmcat_core::{DelimitedQuoting, IbmcatError, Result};
use serde::{Deserialize, Serialize};

use crate::type_mapping::SchemaCapability;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionConfig {
    /// Type table capability level
    #[serde(default)]
    pub capability: SchemaCapability,
    /// Quote character used when a table name is spliced into a probe query
    #[serde(default = "default_identifier_quote")]
    pub identifier_quote: char,
    /// Fold probe identifiers to upper case before quoting
    #[serde(default)]
    pub uppercase_identifiers: bool,
    /// Schema for constraint lookups; the connection's current schema when unset
    #[serde(default)]
    pub catalog_schema: Option<String>,
}

fn default_identifier_quote() -> char {
    '"'
}

impl Default for IntrospectionConfig {
    fn default() -> Self {
        Self {
            capability: SchemaCapability::default(),
            identifier_quote: default_identifier_quote(),
            uppercase_identifiers: false,
            catalog_schema: None,
        }
    }
}

impl IntrospectionConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading introspection config");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn with_capability(mut self, capability: SchemaCapability) -> Self {
        self.capability = capability;
        self
    }

    pub fn with_catalog_schema(mut self, schema: impl Into<String>) -> Self {
        self.catalog_schema = Some(schema.into());
        self
    }

    pub fn quoting(&self) -> DelimitedQuoting {
        DelimitedQuoting::new(self.identifier_quote).uppercase(self.uppercase_identifiers)
    }

    fn validate(&self) -> Result<()> {
        if self.identifier_quote.is_alphanumeric() || self.identifier_quote.is_whitespace() {
            return Err(IbmcatError::Configuration(format!(
                "identifier_quote must be a punctuation character, got {:?}",
                self.identifier_quote
            )));
        }
        if let Some(schema) = &self.catalog_schema {
            if schema.trim().is_empty() {
                return Err(IbmcatError::Configuration(
                    "catalog_schema must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
