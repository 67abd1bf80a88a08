//! Layered configuration backed by `figment`.
//!
//! Sources are merged in this order (later sources override earlier):
//! 1. TOML configuration file (if it exists)
//! 2. Environment variables with a prefix, e.g. `EVENTS_MQ_INCLUDE_EVENTS`
//!    for the `include-events` option

use std::path::Path;

use figment::providers::{Env, Format, Toml};
use figment::value::Value;
use figment::Figment;
use tracing::debug;

use super::{split_list, ConfigScope};
use crate::error::ConfigurationError;

/// Default environment prefix for publisher options.
pub const DEFAULT_ENV_PREFIX: &str = "EVENTS_MQ_";

/// A [`ConfigScope`] reading from a [`Figment`].
///
/// List options may be given either as native arrays (`include-events =
/// ["LOGIN", "LOGOUT"]`) or as comma separated strings. Numbers and booleans
/// are read as their text. A table where a value is expected, or a source
/// that fails to load, is a [`ConfigurationError::Source`].
#[derive(Clone, Debug)]
pub struct FigmentScope {
    figment: Figment,
    section: Option<String>,
}

impl FigmentScope {
    pub fn new(figment: Figment) -> Self {
        Self {
            figment,
            section: None,
        }
    }

    /// Load the TOML file at `path` (skipped when missing) and then environment
    /// variables starting with `env_prefix`.
    pub fn load(path: Option<&Path>, env_prefix: &str) -> Self {
        let mut figment = Figment::new();

        if let Some(path) = path {
            if path.exists() {
                debug!(path = %path.display(), "loading configuration file");
                figment = figment.merge(Toml::file(path));
            } else {
                debug!(path = %path.display(), "configuration file not found, skipping");
            }
        }

        figment = figment.merge(Env::prefixed(env_prefix).map(|key| {
            key.as_str().to_ascii_lowercase().replace('_', "-").into()
        }));

        Self::new(figment)
    }

    /// Load with [`DEFAULT_ENV_PREFIX`].
    pub fn from_env() -> Self {
        Self::load(None, DEFAULT_ENV_PREFIX)
    }

    /// Read options from a nested table, e.g. `events.mq`.
    pub fn scoped(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn figment(&self) -> &Figment {
        &self.figment
    }

    fn path(&self, key: &str) -> String {
        match &self.section {
            Some(section) => format!("{}.{}", section, key),
            None => key.to_string(),
        }
    }

    fn find(&self, key: &str) -> Result<Option<Value>, ConfigurationError> {
        match self.figment.find_value(&self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.missing() => Ok(None),
            Err(err) => Err(source_error(key, err.to_string())),
        }
    }
}

impl ConfigScope for FigmentScope {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigurationError> {
        match self.find(key)? {
            Some(value) => scalar_text(key, value),
            None => Ok(None),
        }
    }

    fn get_array(&self, key: &str) -> Result<Option<Vec<String>>, ConfigurationError> {
        match self.find(key)? {
            Some(Value::Array(_, values)) => {
                let mut entries = Vec::with_capacity(values.len());
                for value in values {
                    if let Some(text) = scalar_text(key, value)? {
                        let text = text.trim();
                        if !text.is_empty() {
                            entries.push(text.to_string());
                        }
                    }
                }
                Ok(Some(entries))
            }
            Some(value) => Ok(scalar_text(key, value)?.map(|text| split_list(&text))),
            None => Ok(None),
        }
    }
}

fn scalar_text(key: &str, value: Value) -> Result<Option<String>, ConfigurationError> {
    match value {
        Value::String(_, text) => Ok(Some(text)),
        Value::Char(_, c) => Ok(Some(c.to_string())),
        Value::Bool(_, b) => Ok(Some(b.to_string())),
        Value::Empty(..) => Ok(None),
        num @ Value::Num(..) => serde_json::to_string(&num)
            .map(Some)
            .map_err(|err| source_error(key, err.to_string())),
        Value::Dict(..) | Value::Array(..) => {
            Err(source_error(key, "expected a single value".to_string()))
        }
    }
}

fn source_error(key: &str, message: String) -> ConfigurationError {
    ConfigurationError::Source {
        option: key.to_string(),
        message,
    }
}
