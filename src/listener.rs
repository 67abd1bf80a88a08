//! The contract offered to the identity system.
//!
//! The identity system builds one factory at startup, configures it, and
//! asks it for listeners. It then hands every event to `on_event` or
//! `on_admin_event`. Neither call reports failure: a listener must never
//! disturb the operation that raised the event.

use crate::config::ConfigScope;
use crate::error::ConfigurationError;
use crate::events::{AdminEvent, DomainEvent};

/// Receives identity-system events.
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &DomainEvent);

    /// `include_representation` tells the listener whether the producer asked
    /// for the full resource representation to be carried along.
    fn on_admin_event(&self, event: &AdminEvent, include_representation: bool);

    fn close(&self);
}

/// Builds configured [`EventListener`]s.
pub trait EventListenerFactory {
    type Listener: EventListener;

    /// Identifier under which the identity system registers this factory.
    fn id(&self) -> &'static str;

    /// Read configuration. Called once at startup, before any `build`.
    fn configure(&mut self, scope: &dyn ConfigScope) -> Result<(), ConfigurationError>;

    fn build(&self) -> Self::Listener;

    fn close(&mut self);
}
