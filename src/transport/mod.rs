//! Messaging transport abstractions.
//!
//! A publish walks a short chain of scoped resources:
//!
//! ```text
//! ConnectionFactory ──create_connection──▶ Connection
//!                                            │ create_session
//!                                            ▼
//!                                          Session ──create_text_message──▶ TextMessage
//!                                            │ create_producer(destination)
//!                                            ▼
//!                                          Producer ──send(message)──▶ broker
//! ```
//!
//! Each resource is released when it is dropped. A session borrows its
//! connection and a producer borrows its session, so the borrow checker
//! guarantees they are released innermost-first.
//!
//! Implementations might include:
//! - `InMemoryBroker` - for testing and single-process scenarios
//! - an AMQP, STOMP or Kafka client wrapper

mod in_memory;

use std::collections::HashMap;
use std::fmt;

use crate::error::TransportError;

pub use in_memory::{BrokerStats, FailurePoint, InMemoryBroker};

/// Whether a destination is point-to-point or fan-out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DestinationKind {
    Queue,
    Topic,
}

/// A named target on the broker.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Destination {
    name: String,
    kind: DestinationKind,
}

impl Destination {
    pub fn queue(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DestinationKind::Queue,
        }
    }

    pub fn topic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DestinationKind::Topic,
        }
    }

    /// Physical name on the broker.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DestinationKind {
        self.kind
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DestinationKind::Queue => write!(f, "queue://{}", self.name),
            DestinationKind::Topic => write!(f, "topic://{}", self.name),
        }
    }
}

/// A message with a text body and string properties.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextMessage {
    body: String,
    properties: HashMap<String, String>,
}

impl TextMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            properties: HashMap::new(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Set a string property, replacing any previous value.
    pub fn set_string_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn string_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }
}

/// Capability for opening connections to a broker.
pub trait ConnectionFactory: Send + Sync {
    fn create_connection(&self) -> Result<Box<dyn Connection>, TransportError>;
}

/// An open connection. Closed on drop.
pub trait Connection: Send {
    fn create_session(&self) -> Result<Box<dyn Session + '_>, TransportError>;
}

/// A session within a connection. Closed on drop.
pub trait Session {
    /// Create a producer bound to `destination`.
    fn create_producer(
        &self,
        destination: &Destination,
    ) -> Result<Box<dyn Producer + '_>, TransportError>;

    fn create_text_message(&self, body: String) -> Result<TextMessage, TransportError>;
}

/// Sends messages to the destination it was created for. Closed on drop.
pub trait Producer {
    fn send(&mut self, message: TextMessage) -> Result<(), TransportError>;
}
