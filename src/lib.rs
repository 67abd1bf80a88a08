//! Forwards identity-system events onto message broker destinations.
//!
//! ```text
//! configuration ──▶ PublisherFactory ──build──▶ EventPublisher
//!                                                  │ per event:
//!                                                  │ filter → serialize → resolve names
//!                                                  ▼
//!                            Registry ──▶ ConnectionFactory → Connection → Session → Producer
//! ```
//!
//! Publication is best effort. Per-event failures are logged through
//! `tracing` and never reach the caller; only configuration errors do.

pub mod config;
pub mod error;
pub mod events;
pub mod listener;
pub mod publisher;
pub mod registry;
pub mod transport;

pub use config::{ConfigScope, FigmentScope, MapScope, PublisherSettings};
pub use error::{ConfigurationError, ResolutionError, SendError, SerializationError, TransportError};
pub use events::{AdminEvent, AuthDetails, DomainEvent, EventType, InclusionFilter, OperationType};
pub use listener::{EventListener, EventListenerFactory};
pub use publisher::{EventPublisher, PublisherFactory, RoutingMetadata};
pub use registry::{Binding, InMemoryRegistry, Registry};
pub use transport::{
    Connection, ConnectionFactory, Destination, DestinationKind, InMemoryBroker, Producer,
    Session, TextMessage,
};
