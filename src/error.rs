//! Error types for configuration, name resolution, serialization and transport.
//!
//! Only [`ConfigurationError`] and the startup [`ResolutionError`] from
//! `EventPublisher::validate` ever reach a caller. Everything that happens
//! while publishing a single event is folded into [`SendError`], logged and
//! dropped.

use thiserror::Error;

/// Invalid publisher configuration. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// An include/exclude list named an event type that does not exist.
    #[error("unknown event type '{name}' in {option}")]
    UnknownEventType { option: String, name: String },
    /// The configuration source could not produce a value for an option.
    #[error("cannot read {option}: {message}")]
    Source { option: String, message: String },
}

/// Failure to resolve a name through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Nothing is bound under the name.
    #[error("name '{0}' is not bound")]
    NotBound(String),
    /// Something is bound, but not the kind of object the caller needs.
    #[error("name '{name}' is bound to a {actual}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
    /// `bind` was called for a name that already has a binding.
    #[error("name '{0}' is already bound")]
    AlreadyBound(String),
}

/// The event payload could not be encoded.
#[derive(Debug, Error)]
#[error("failed to serialize event: {0}")]
pub struct SerializationError(#[from] pub serde_json::Error);

/// Failure reported by the messaging transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Opening a connection to the broker failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// Opening a session on a connection failed.
    #[error("session failed: {0}")]
    SessionFailed(String),
    /// Creating a producer for a destination failed.
    #[error("producer for '{destination}' failed: {message}")]
    ProducerFailed {
        destination: String,
        message: String,
    },
    /// Creating the outbound message failed.
    #[error("message creation failed: {0}")]
    MessageFailed(String),
    /// The broker rejected or could not accept the message.
    #[error("send to '{destination}' failed: {message}")]
    SendFailed {
        destination: String,
        message: String,
    },
}

/// Any failure of a single publish attempt.
#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<serde_json::Error> for SendError {
    fn from(err: serde_json::Error) -> Self {
        SendError::Serialization(SerializationError(err))
    }
}
