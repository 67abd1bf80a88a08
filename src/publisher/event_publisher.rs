use serde::Serialize;
use tracing::{debug, error, trace};

use super::metadata::RoutingMetadata;
use crate::config::PublisherSettings;
use crate::error::{ResolutionError, SendError, SerializationError};
use crate::events::{AdminEvent, DomainEvent};
use crate::listener::EventListener;
use crate::registry::Registry;

/// Forwards in-scope events to broker destinations.
///
/// Every publish resolves its names through the registry and opens its own
/// connection, session and producer, releasing them before it returns. No
/// broker resource is shared between calls, so one publisher can serve many
/// threads at once.
///
/// Publishing never fails from the caller's point of view: resolution,
/// serialization and transport errors are logged and dropped.
#[derive(Clone, Debug)]
pub struct EventPublisher<R> {
    registry: R,
    settings: PublisherSettings,
}

impl<R: Registry> EventPublisher<R> {
    pub fn new(registry: R, settings: PublisherSettings) -> Self {
        Self { registry, settings }
    }

    /// Forward a domain event if a destination is configured and its type is included.
    pub fn publish_domain_event(&self, event: &DomainEvent) {
        let Some(destination_name) = self.settings.event_destination_name.as_deref() else {
            debug!("no destination for domain events");
            return;
        };

        if !self.settings.included_events.contains(event.event_type) {
            trace!(event_type = %event.event_type, "event type not included");
            return;
        }

        debug!(event_type = %event.event_type, "sending message for domain event");
        let metadata = RoutingMetadata::for_domain_event(event);
        self.send(destination_name, event, &metadata);
    }

    /// Forward an admin event if a destination is configured.
    ///
    /// Admin events are not filtered by type. `include_representation` does
    /// not change what is sent: the body is always the full serialized event.
    pub fn publish_admin_event(&self, event: &AdminEvent, include_representation: bool) {
        let Some(destination_name) = self.settings.admin_event_destination_name.as_deref() else {
            debug!("no destination for admin events");
            return;
        };

        debug!(
            operation_type = %event.operation_type,
            include_representation,
            "sending message for admin event"
        );
        let metadata = RoutingMetadata::for_admin_event(event);
        self.send(destination_name, event, &metadata);
    }

    /// Holds nothing between calls.
    pub fn close(&self) {}

    /// Resolve every configured name once.
    ///
    /// Unlike publishing, this reports a failed lookup to the caller, so it can
    /// be used to fail fast at startup.
    pub fn validate(&self) -> Result<(), ResolutionError> {
        self.registry
            .lookup_connection_factory(&self.settings.connection_factory_name)?;

        let destinations = [
            self.settings.event_destination_name.as_deref(),
            self.settings.admin_event_destination_name.as_deref(),
        ];
        for name in destinations.into_iter().flatten() {
            self.registry.lookup_destination(name)?;
        }
        Ok(())
    }

    pub fn settings(&self) -> &PublisherSettings {
        &self.settings
    }

    fn send<T: Serialize + ?Sized>(
        &self,
        destination_name: &str,
        event: &T,
        metadata: &RoutingMetadata,
    ) {
        match self.send_message(destination_name, event, metadata) {
            Ok(body) => debug!(destination = destination_name, %body, "sent event message"),
            Err(err) => error!(
                destination = destination_name,
                error = %err,
                "failed to send event message"
            ),
        }
    }

    /// One attempt: resolve, connect, serialize, send. Returns the sent body.
    fn send_message<T: Serialize + ?Sized>(
        &self,
        destination_name: &str,
        event: &T,
        metadata: &RoutingMetadata,
    ) -> Result<String, SendError> {
        let factory = self
            .registry
            .lookup_connection_factory(&self.settings.connection_factory_name)?;
        let destination = self.registry.lookup_destination(destination_name)?;

        let connection = factory.create_connection()?;
        let session = connection.create_session()?;
        let mut producer = session.create_producer(&destination)?;

        let body = serialize_event(event)?;
        let mut message = session.create_text_message(body.clone())?;
        for (key, value) in metadata.iter() {
            message.set_string_property(key, value);
        }

        producer.send(message)?;
        Ok(body)
    }
}

impl<R: Registry> EventListener for EventPublisher<R> {
    fn on_event(&self, event: &DomainEvent) {
        self.publish_domain_event(event);
    }

    fn on_admin_event(&self, event: &AdminEvent, include_representation: bool) {
        self.publish_admin_event(event, include_representation);
    }

    fn close(&self) {
        EventPublisher::close(self);
    }
}

/// Encode an event as pretty-printed JSON.
pub fn serialize_event<T: Serialize + ?Sized>(event: &T) -> Result<String, SerializationError> {
    Ok(serde_json::to_string_pretty(event)?)
}
