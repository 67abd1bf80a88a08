use tracing::debug;

use super::EventPublisher;
use crate::config::{ConfigScope, PublisherSettings};
use crate::error::ConfigurationError;
use crate::listener::EventListenerFactory;
use crate::registry::Registry;

/// Builds [`EventPublisher`]s from configuration.
///
/// Configuration is read once; every `build` afterwards yields an equivalent
/// publisher sharing the same registry handle.
///
/// ## Example
///
/// ```
/// use event_forwarder::config::MapScope;
/// use event_forwarder::events::{DomainEvent, EventType};
/// use event_forwarder::publisher::PublisherFactory;
/// use event_forwarder::registry::InMemoryRegistry;
/// use event_forwarder::transport::InMemoryBroker;
///
/// let broker = InMemoryBroker::new();
/// let registry = InMemoryRegistry::new();
/// registry.bind_connection_factory("ConnectionFactory", broker.clone()).unwrap();
/// registry.bind_queue("queue/Q1", "q1").unwrap();
///
/// let mut factory = PublisherFactory::new(registry);
/// factory
///     .configure(&MapScope::new()
///         .with("event-destination-name", "queue/Q1")
///         .with("include-events", "LOGIN"))
///     .unwrap();
///
/// let publisher = factory.build();
/// publisher.publish_domain_event(&DomainEvent::new(EventType::Login, "r1").with_user("u1"));
/// assert_eq!(broker.messages("q1").len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct PublisherFactory<R> {
    registry: R,
    settings: PublisherSettings,
}

impl<R: Registry + Clone> PublisherFactory<R> {
    /// Identifier under which the factory is registered with the identity system.
    pub const ID: &'static str = "mq";

    /// A factory with default settings, resolving names through `registry`.
    pub fn new(registry: R) -> Self {
        Self::with_settings(registry, PublisherSettings::default())
    }

    pub fn with_settings(registry: R, settings: PublisherSettings) -> Self {
        Self { registry, settings }
    }

    /// Replace the current settings with those read from `scope`.
    ///
    /// On error the previous settings are kept.
    pub fn configure(&mut self, scope: &dyn ConfigScope) -> Result<(), ConfigurationError> {
        self.settings = PublisherSettings::from_scope(scope)?;
        debug!(id = Self::ID, "event publisher factory configured");
        Ok(())
    }

    pub fn build(&self) -> EventPublisher<R> {
        EventPublisher::new(self.registry.clone(), self.settings.clone())
    }

    /// Holds nothing.
    pub fn close(&mut self) {}

    pub fn settings(&self) -> &PublisherSettings {
        &self.settings
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }
}

impl<R: Registry + Clone> EventListenerFactory for PublisherFactory<R> {
    type Listener = EventPublisher<R>;

    fn id(&self) -> &'static str {
        Self::ID
    }

    fn configure(&mut self, scope: &dyn ConfigScope) -> Result<(), ConfigurationError> {
        PublisherFactory::configure(self, scope)
    }

    fn build(&self) -> Self::Listener {
        PublisherFactory::build(self)
    }

    fn close(&mut self) {
        PublisherFactory::close(self);
    }
}
