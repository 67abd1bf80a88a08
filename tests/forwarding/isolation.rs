//! Publishing failures stay inside the publisher.

use event_forwarder::events::{AdminEvent, DomainEvent, EventType, OperationType};
use event_forwarder::transport::FailurePoint;

use crate::support::{Fixture, ADMIN_TOPIC, EVENTS_QUEUE};

const ALL_POINTS: [FailurePoint; 5] = [
    FailurePoint::Connect,
    FailurePoint::Session,
    FailurePoint::Producer,
    FailurePoint::Message,
    FailurePoint::Send,
];

#[test]
fn send_failure_returns_normally() {
    let fixture = Fixture::new();
    let publisher = fixture.publisher(&[]).unwrap();
    fixture.broker.fail_at(FailurePoint::Send);

    let event = DomainEvent::new(EventType::UpdateProfile, "r1").with_user("u1");
    publisher.publish_domain_event(&event);

    assert_eq!(fixture.broker.stats().send_attempts, 1);
    assert_eq!(fixture.broker.delivered_count(), 0);
    assert!(fixture.broker.is_idle());
}

#[test]
fn every_transport_failure_releases_resources() {
    let fixture = Fixture::new();
    let publisher = fixture
        .publisher(&[("admin-event-destination-name", "topic/Admin")])
        .unwrap();

    for point in ALL_POINTS {
        fixture.broker.fail_at(point);
        publisher.publish_domain_event(&DomainEvent::new(EventType::UpdateProfile, "r1"));
        publisher.publish_admin_event(&AdminEvent::new("r1", OperationType::Update), true);

        let stats = fixture.broker.stats();
        assert_eq!(stats.delivered, 0, "{:?}", point);
        assert!(fixture.broker.is_idle(), "{:?} leaked: {:?}", point, stats);
    }

    fixture.broker.clear_failure();
    publisher.publish_domain_event(&DomainEvent::new(EventType::UpdateProfile, "r1"));
    publisher.publish_admin_event(&AdminEvent::new("r1", OperationType::Update), true);
    assert_eq!(fixture.broker.messages(EVENTS_QUEUE).len(), 1);
    assert_eq!(fixture.broker.messages(ADMIN_TOPIC).len(), 1);
}

#[test]
fn unbound_names_are_swallowed() {
    let fixture = Fixture::new();
    let publisher = fixture
        .publisher(&[
            ("event-destination-name", "queue/Unbound"),
            ("admin-event-destination-name", "topic/Unbound"),
        ])
        .unwrap();

    publisher.publish_domain_event(&DomainEvent::new(EventType::UpdateProfile, "r1"));
    publisher.publish_admin_event(&AdminEvent::new("r1", OperationType::Delete), false);

    assert_eq!(fixture.broker.stats().connections_opened, 0);
}

#[test]
fn missing_connection_factory_is_swallowed() {
    let fixture = Fixture::new();
    fixture.registry.unbind("ConnectionFactory");
    let publisher = fixture.publisher(&[]).unwrap();

    publisher.publish_domain_event(&DomainEvent::new(EventType::UpdateProfile, "r1"));

    assert_eq!(fixture.broker.delivered_count(), 0);
}

#[test]
fn destination_bound_to_wrong_kind_is_swallowed() {
    let fixture = Fixture::new();
    let publisher = fixture
        .publisher(&[("event-destination-name", "ConnectionFactory")])
        .unwrap();

    publisher.publish_domain_event(&DomainEvent::new(EventType::UpdateProfile, "r1"));

    assert_eq!(fixture.broker.stats().connections_opened, 0);
}

#[test]
fn input_event_is_unchanged() {
    let fixture = Fixture::new();
    let publisher = fixture.publisher(&[]).unwrap();
    let event = DomainEvent::new(EventType::UpdateProfile, "r1")
        .with_user("u1")
        .with_detail("previous_email", "a@example.com");
    let snapshot = event.clone();

    publisher.publish_domain_event(&event);
    fixture.broker.fail_at(FailurePoint::Send);
    publisher.publish_domain_event(&event);

    assert_eq!(event, snapshot);
}
