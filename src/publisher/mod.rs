//! The event publisher and the factory that configures it.

mod event_publisher;
mod factory;
mod metadata;

pub use event_publisher::{serialize_event, EventPublisher};
pub use factory::PublisherFactory;
pub use metadata::{RoutingMetadata, ADMIN_EVENT_TYPE, DOMAIN_EVENT_TYPE};
