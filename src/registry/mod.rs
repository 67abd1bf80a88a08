//! Name resolution for connection factories and destinations.
//!
//! The publisher never holds on to a resolved handle: it looks names up on
//! every publish, so rebinding a name takes effect on the next event.

mod in_memory;

use std::fmt;
use std::sync::Arc;

use crate::error::ResolutionError;
use crate::transport::{ConnectionFactory, Destination};

pub use in_memory::InMemoryRegistry;

/// Something bound under a name.
#[derive(Clone)]
pub enum Binding {
    ConnectionFactory(Arc<dyn ConnectionFactory>),
    Destination(Destination),
}

impl Binding {
    pub fn kind(&self) -> &'static str {
        match self {
            Binding::ConnectionFactory(_) => "connection factory",
            Binding::Destination(_) => "destination",
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::ConnectionFactory(_) => f.write_str("ConnectionFactory(..)"),
            Binding::Destination(destination) => {
                f.debug_tuple("Destination").field(destination).finish()
            }
        }
    }
}

/// Resolves names to bindings.
pub trait Registry: Send + Sync {
    /// Look up a name. Fails with [`ResolutionError::NotBound`] when nothing is bound.
    fn lookup(&self, name: &str) -> Result<Binding, ResolutionError>;

    fn lookup_connection_factory(
        &self,
        name: &str,
    ) -> Result<Arc<dyn ConnectionFactory>, ResolutionError> {
        match self.lookup(name)? {
            Binding::ConnectionFactory(factory) => Ok(factory),
            other => Err(ResolutionError::WrongKind {
                name: name.to_string(),
                expected: "connection factory",
                actual: other.kind(),
            }),
        }
    }

    fn lookup_destination(&self, name: &str) -> Result<Destination, ResolutionError> {
        match self.lookup(name)? {
            Binding::Destination(destination) => Ok(destination),
            other => Err(ResolutionError::WrongKind {
                name: name.to_string(),
                expected: "destination",
                actual: other.kind(),
            }),
        }
    }
}

impl<R: Registry + ?Sized> Registry for Arc<R> {
    fn lookup(&self, name: &str) -> Result<Binding, ResolutionError> {
        (**self).lookup(name)
    }
}
