use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::{Binding, Registry};
use crate::error::ResolutionError;
use crate::transport::{ConnectionFactory, Destination};

/// Thread-safe name registry. Clones share the same bindings.
///
/// ## Example
///
/// ```
/// use event_forwarder::registry::{InMemoryRegistry, Registry};
/// use event_forwarder::transport::InMemoryBroker;
///
/// let registry = InMemoryRegistry::new();
/// registry.bind_connection_factory("ConnectionFactory", InMemoryBroker::new()).unwrap();
/// registry.bind_queue("queue/IdentityEvents", "identity-events").unwrap();
///
/// assert!(registry.lookup_connection_factory("ConnectionFactory").is_ok());
/// assert_eq!(
///     registry.lookup_destination("queue/IdentityEvents").unwrap().name(),
///     "identity-events"
/// );
/// assert!(registry.lookup("queue/Missing").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryRegistry {
    bindings: Arc<RwLock<HashMap<String, Binding>>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name. Fails if the name is already bound.
    pub fn bind(&self, name: impl Into<String>, binding: Binding) -> Result<(), ResolutionError> {
        let name = name.into();
        let mut bindings = self.bindings.write().unwrap_or_else(PoisonError::into_inner);
        if bindings.contains_key(&name) {
            return Err(ResolutionError::AlreadyBound(name));
        }
        debug!(name = %name, kind = binding.kind(), "binding name");
        bindings.insert(name, binding);
        Ok(())
    }

    /// Bind a name, replacing any existing binding.
    pub fn rebind(&self, name: impl Into<String>, binding: Binding) {
        let name = name.into();
        debug!(name = %name, kind = binding.kind(), "rebinding name");
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, binding);
    }

    /// Remove a binding. Returns what was bound, if anything.
    pub fn unbind(&self, name: &str) -> Option<Binding> {
        self.bindings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    pub fn bind_connection_factory(
        &self,
        name: impl Into<String>,
        factory: impl ConnectionFactory + 'static,
    ) -> Result<(), ResolutionError> {
        self.bind(name, Binding::ConnectionFactory(Arc::new(factory)))
    }

    pub fn bind_queue(
        &self,
        name: impl Into<String>,
        physical_name: impl Into<String>,
    ) -> Result<(), ResolutionError> {
        self.bind(name, Binding::Destination(Destination::queue(physical_name)))
    }

    pub fn bind_topic(
        &self,
        name: impl Into<String>,
        physical_name: impl Into<String>,
    ) -> Result<(), ResolutionError> {
        self.bind(name, Binding::Destination(Destination::topic(physical_name)))
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}

impl Registry for InMemoryRegistry {
    fn lookup(&self, name: &str) -> Result<Binding, ResolutionError> {
        debug!(name, "performing a lookup");
        self.bindings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| ResolutionError::NotBound(name.to_string()))
    }
}
