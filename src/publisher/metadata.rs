use std::collections::HashMap;

use crate::events::{AdminEvent, DomainEvent};

/// Value of the `type` property on domain event messages.
pub const DOMAIN_EVENT_TYPE: &str = "DomainEvent";
/// Value of the `type` property on admin event messages.
pub const ADMIN_EVENT_TYPE: &str = "AdminEvent";

/// String properties attached to an outgoing message so consumers can filter
/// without parsing the body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoutingMetadata {
    properties: HashMap<String, String>,
}

impl RoutingMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// `type`, `realmId`, `userId` (when known) and `eventType`.
    pub fn for_domain_event(event: &DomainEvent) -> Self {
        let mut metadata = Self::new()
            .with("type", DOMAIN_EVENT_TYPE)
            .with("realmId", event.realm_id.as_str());
        if let Some(user_id) = &event.user_id {
            metadata.insert("userId", user_id.as_str());
        }
        metadata.with("eventType", event.event_type.name())
    }

    /// `type`, `realmId` and `operationType`.
    pub fn for_admin_event(event: &AdminEvent) -> Self {
        Self::new()
            .with("type", ADMIN_EVENT_TYPE)
            .with("realmId", event.realm_id.as_str())
            .with("operationType", event.operation_type.name())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
