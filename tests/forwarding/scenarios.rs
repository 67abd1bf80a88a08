//! End-to-end forwarding scenarios.

use std::collections::HashMap;

use event_forwarder::events::{AdminEvent, AuthDetails, DomainEvent, EventType, OperationType};
use event_forwarder::listener::{EventListener, EventListenerFactory};
use event_forwarder::registry::Binding;
use event_forwarder::transport::Destination;

use crate::support::{Fixture, ADMIN_TOPIC, EVENTS_QUEUE, Q1};

fn props(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Domain events
// ============================================================================

#[test]
fn login_event_reaches_configured_queue() {
    let fixture = Fixture::new();
    let publisher = fixture
        .publisher(&[
            ("event-destination-name", "queue/Q1"),
            ("include-events", "LOGIN"),
        ])
        .unwrap();

    let event = DomainEvent::new(EventType::Login, "r1").with_user("u1");
    publisher.publish_domain_event(&event);

    let messages = fixture.broker.messages(Q1);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0].properties(),
        &props(&[
            ("type", "DomainEvent"),
            ("realmId", "r1"),
            ("userId", "u1"),
            ("eventType", "LOGIN"),
        ])
    );
    assert_eq!(fixture.broker.delivered_count(), 1);
}

#[test]
fn default_configuration_forwards_profile_updates_only() {
    let fixture = Fixture::new();
    let publisher = fixture.publisher(&[]).unwrap();

    publisher.publish_domain_event(&DomainEvent::new(EventType::Login, "r1").with_user("u1"));
    publisher
        .publish_domain_event(&DomainEvent::new(EventType::UpdateProfile, "r1").with_user("u1"));

    let messages = fixture.broker.messages(EVENTS_QUEUE);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].string_property("eventType"), Some("UPDATE_PROFILE"));
}

#[test]
fn body_decodes_back_to_the_event() {
    let fixture = Fixture::new();
    let publisher = fixture.publisher(&[("include-events", "REGISTER")]).unwrap();

    let event = DomainEvent::new(EventType::Register, "r1")
        .with_user("u1")
        .with_client("account")
        .with_ip_address("10.0.0.1")
        .with_detail("username", "alice");
    publisher.publish_domain_event(&event);

    let messages = fixture.broker.messages(EVENTS_QUEUE);
    let decoded: DomainEvent = serde_json::from_str(messages[0].body()).unwrap();
    assert_eq!(decoded, event);
    assert_eq!(decoded.realm_id, "r1");
    assert_eq!(decoded.user_id.as_deref(), Some("u1"));
    assert_eq!(decoded.event_type, EventType::Register);
}

#[test]
fn blank_event_destination_disables_domain_events() {
    let fixture = Fixture::new();
    let publisher = fixture
        .publisher(&[("event-destination-name", ""), ("include-events", "LOGIN")])
        .unwrap();

    publisher.publish_domain_event(&DomainEvent::new(EventType::Login, "r1"));

    assert_eq!(fixture.broker.stats().connections_opened, 0);
    assert_eq!(fixture.broker.delivered_count(), 0);
}

// ============================================================================
// Admin events
// ============================================================================

#[test]
fn admin_event_without_destination_sends_nothing() {
    let fixture = Fixture::new();
    let publisher = fixture.publisher(&[]).unwrap();

    publisher.publish_admin_event(&AdminEvent::new("master", OperationType::Create), true);

    assert_eq!(fixture.broker.stats().connections_opened, 0);
    assert_eq!(fixture.broker.delivered_count(), 0);
}

#[test]
fn admin_events_are_not_type_filtered() {
    let fixture = Fixture::new();
    let publisher = fixture
        .publisher(&[
            ("admin-event-destination-name", "topic/Admin"),
            ("exclude-events", "UPDATE_PROFILE"),
        ])
        .unwrap();

    for operation in [
        OperationType::Create,
        OperationType::Update,
        OperationType::Delete,
        OperationType::Action,
    ] {
        let event = AdminEvent::new("master", operation)
            .with_resource_path("users/1")
            .with_auth_details(AuthDetails {
                realm_id: "master".into(),
                user_id: Some("admin".into()),
                ..AuthDetails::default()
            });
        publisher.publish_admin_event(&event, false);
    }

    let messages = fixture.broker.messages(ADMIN_TOPIC);
    let operations: Vec<_> = messages
        .iter()
        .map(|m| m.string_property("operationType").unwrap_or_default())
        .collect();
    assert_eq!(operations, vec!["CREATE", "UPDATE", "DELETE", "ACTION"]);
    assert_eq!(
        messages[0].properties(),
        &props(&[
            ("type", "AdminEvent"),
            ("realmId", "master"),
            ("operationType", "CREATE"),
        ])
    );

    let decoded: AdminEvent = serde_json::from_str(messages[3].body()).unwrap();
    assert_eq!(decoded.operation_type, OperationType::Action);
    assert_eq!(decoded.resource_path.as_deref(), Some("users/1"));
}

// ============================================================================
// Name resolution
// ============================================================================

#[test]
fn rebinding_takes_effect_on_next_event() {
    let fixture = Fixture::new();
    let publisher = fixture.publisher(&[]).unwrap();
    let event = DomainEvent::new(EventType::UpdateProfile, "r1");

    publisher.publish_domain_event(&event);
    fixture.registry.rebind(
        "queue/IdentityEvents",
        Binding::Destination(Destination::queue("relocated")),
    );
    publisher.publish_domain_event(&event);

    assert_eq!(fixture.broker.messages(EVENTS_QUEUE).len(), 1);
    assert_eq!(fixture.broker.messages("relocated").len(), 1);
}

#[test]
fn every_publish_opens_its_own_connection() {
    let fixture = Fixture::new();
    let publisher = fixture.publisher(&[]).unwrap();

    for _ in 0..3 {
        publisher.publish_domain_event(&DomainEvent::new(EventType::UpdateProfile, "r1"));
    }

    let stats = fixture.broker.stats();
    assert_eq!(stats.connections_opened, 3);
    assert_eq!(stats.delivered, 3);
    assert!(fixture.broker.is_idle());
}

#[test]
fn validate_catches_unbound_names_at_startup() {
    let fixture = Fixture::new();

    let publisher = fixture
        .publisher(&[("admin-event-destination-name", "topic/Admin")])
        .unwrap();
    assert!(publisher.validate().is_ok());

    let publisher = fixture
        .publisher(&[("connection-factory-name", "broker/Missing")])
        .unwrap();
    assert!(publisher.validate().is_err());
}

// ============================================================================
// Listener contract
// ============================================================================

#[test]
fn factory_and_listener_contract() {
    let fixture = Fixture::new();
    let mut factory = fixture.factory();
    let scope = event_forwarder::MapScope::new()
        .with("admin-event-destination-name", "topic/Admin")
        .with("include-events", "login");

    EventListenerFactory::configure(&mut factory, &scope).unwrap();
    assert_eq!(factory.id(), "mq");

    let listener: Box<dyn EventListener> = Box::new(EventListenerFactory::build(&factory));
    listener.on_event(&DomainEvent::new(EventType::Login, "r1"));
    listener.on_admin_event(&AdminEvent::new("r1", OperationType::Delete), false);
    listener.close();
    EventListenerFactory::close(&mut factory);

    assert_eq!(fixture.broker.messages(EVENTS_QUEUE).len(), 1);
    assert_eq!(fixture.broker.messages(ADMIN_TOPIC).len(), 1);
}
