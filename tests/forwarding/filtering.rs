//! Inclusion filter behaviour across every event type.

use event_forwarder::events::{DomainEvent, EventType, InclusionFilter};
use event_forwarder::ConfigurationError;
use strum::IntoEnumIterator;

use crate::support::{Fixture, EVENTS_QUEUE};

#[test]
fn one_send_per_included_type_and_none_otherwise() {
    let fixture = Fixture::new();
    let publisher = fixture
        .publisher(&[("include-events", "LOGIN,LOGOUT,UPDATE_PASSWORD,LOGIN_ERROR")])
        .unwrap();

    for event_type in EventType::iter() {
        let before = fixture.broker.stats().send_attempts;
        publisher.publish_domain_event(&DomainEvent::new(event_type, "r1").with_user("u1"));
        let after = fixture.broker.stats().send_attempts;

        let expected = usize::from(publisher.settings().included_events.contains(event_type));
        assert_eq!(after - before, expected, "{}", event_type);
    }

    let sent: Vec<_> = fixture
        .broker
        .messages(EVENTS_QUEUE)
        .iter()
        .map(|m| m.string_property("eventType").unwrap_or_default().to_string())
        .collect();
    assert_eq!(sent.len(), 4);
    for event_type in publisher.settings().included_events.iter() {
        assert!(sent.iter().any(|name| name == event_type.name()));
    }
}

#[test]
fn include_then_exclude_is_order_independent() {
    let fixture = Fixture::new();

    let a = fixture
        .publisher(&[("include-events", "LOGIN,REGISTER"), ("exclude-events", "REGISTER")])
        .unwrap();
    let b = fixture
        .publisher(&[("include-events", "register,login"), ("exclude-events", "Register")])
        .unwrap();

    assert_eq!(a.settings().included_events, b.settings().included_events);
    assert_eq!(a.settings().included_events, InclusionFilter::only([EventType::Login]));
}

#[test]
fn no_lists_means_default_set() {
    let fixture = Fixture::new();
    let publisher = fixture.publisher(&[]).unwrap();
    assert_eq!(
        publisher.settings().included_events.iter().collect::<Vec<_>>(),
        vec![EventType::UpdateProfile]
    );
}

#[test]
fn excluding_everything_forwards_nothing() {
    let fixture = Fixture::new();
    let publisher = fixture
        .publisher(&[("exclude-events", "UPDATE_PROFILE")])
        .unwrap();

    for event_type in EventType::iter() {
        publisher.publish_domain_event(&DomainEvent::new(event_type, "r1"));
    }
    assert_eq!(fixture.broker.stats().connections_opened, 0);
}

#[test]
fn unknown_type_fails_before_any_publisher_exists() {
    let fixture = Fixture::new();
    let result = fixture.publisher(&[("include-events", "LOGIN,BOGUS")]);

    match result {
        Err(ConfigurationError::UnknownEventType { option, name }) => {
            assert_eq!(option, "include-events");
            assert_eq!(name, "BOGUS");
        }
        Ok(_) => panic!("configuration with BOGUS should fail"),
        Err(other) => panic!("expected UnknownEventType, got {other:?}"),
    }
    assert_eq!(fixture.broker.stats().connections_opened, 0);
}
