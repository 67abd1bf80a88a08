//! Configuration sources and the publisher settings read from them.

mod figment_scope;
mod settings;

use std::collections::HashMap;

use crate::error::ConfigurationError;

pub use figment_scope::{FigmentScope, DEFAULT_ENV_PREFIX};
pub use settings::{
    PublisherSettings, ADMIN_EVENT_DESTINATION_NAME, CONNECTION_FACTORY_NAME,
    DEFAULT_CONNECTION_FACTORY, DEFAULT_EVENT_DESTINATION, EVENT_DESTINATION_NAME,
    EXCLUDE_EVENTS, INCLUDE_EVENTS,
};

/// A flat set of configuration options handed over at startup.
///
/// `Ok(None)` means the option is absent. A present option the source cannot
/// read is an error, never `None`.
pub trait ConfigScope {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigurationError>;

    /// A list option. By default a comma separated `get`, with entries trimmed
    /// and blank entries dropped.
    fn get_array(&self, key: &str) -> Result<Option<Vec<String>>, ConfigurationError> {
        Ok(self.get(key)?.map(|value| split_list(&value)))
    }
}

pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Configuration held in a map, for programmatic setup and tests.
///
/// ```
/// use event_forwarder::config::{ConfigScope, MapScope};
///
/// let scope = MapScope::new()
///     .with("event-destination-name", "queue/Q1")
///     .with("include-events", "LOGIN, logout");
///
/// assert_eq!(
///     scope.get("event-destination-name").unwrap().as_deref(),
///     Some("queue/Q1")
/// );
/// assert_eq!(
///     scope.get_array("include-events").unwrap(),
///     Some(vec!["LOGIN".to_string(), "logout".to_string()])
/// );
/// assert_eq!(scope.get("admin-event-destination-name").unwrap(), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapScope {
    values: HashMap<String, String>,
}

impl MapScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Store a list option as its comma separated form.
    pub fn with_list<I, S>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.with(key, joined)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapScope {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigScope for MapScope {
    fn get(&self, key: &str) -> Result<Option<String>, ConfigurationError> {
        Ok(self.values.get(key).cloned())
    }
}
