//! In-memory broker for testing and single-process scenarios.
//!
//! Records every delivered message per destination and keeps live counts of
//! open connections, sessions and producers, so tests can check that every
//! publish released what it acquired. A single [`FailurePoint`] can be armed
//! to make the next operations at that stage fail.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use super::{Connection, ConnectionFactory, Destination, Producer, Session, TextMessage};
use crate::error::TransportError;

/// Stage of the publish chain at which an injected failure fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePoint {
    Connect,
    Session,
    Producer,
    Message,
    Send,
}

/// Snapshot of broker activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BrokerStats {
    pub open_connections: usize,
    pub open_sessions: usize,
    pub open_producers: usize,
    /// Connections opened over the broker's lifetime.
    pub connections_opened: usize,
    /// Calls to `Producer::send`, successful or not.
    pub send_attempts: usize,
    pub delivered: usize,
}

#[derive(Default)]
struct Inner {
    deliveries: RwLock<HashMap<String, Vec<TextMessage>>>,
    failure: Mutex<Option<FailurePoint>>,
    open_connections: AtomicUsize,
    open_sessions: AtomicUsize,
    open_producers: AtomicUsize,
    connections_opened: AtomicUsize,
    send_attempts: AtomicUsize,
}

impl Inner {
    fn fails_at(&self, point: FailurePoint) -> bool {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) == Some(point)
    }
}

/// Thread-safe in-process broker. Clones share the same state.
///
/// ## Example
///
/// ```
/// use event_forwarder::transport::{
///     Connection, ConnectionFactory, Destination, InMemoryBroker, Producer, Session,
/// };
///
/// let broker = InMemoryBroker::new();
/// let queue = Destination::queue("events");
/// {
///     let connection = broker.create_connection().unwrap();
///     let session = connection.create_session().unwrap();
///     let mut producer = session.create_producer(&queue).unwrap();
///     let message = session.create_text_message("{}".to_string()).unwrap();
///     producer.send(message).unwrap();
/// }
/// assert_eq!(broker.messages("events").len(), 1);
/// assert!(broker.is_idle());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryBroker {
    inner: Arc<Inner>,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation at `point` fail until [`clear_failure`](Self::clear_failure).
    pub fn fail_at(&self, point: FailurePoint) {
        *self.inner.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(point);
    }

    pub fn clear_failure(&self) {
        *self.inner.failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Messages delivered to the destination with the given physical name, in order.
    pub fn messages(&self, destination: &str) -> Vec<TextMessage> {
        self.inner
            .deliveries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(destination)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of delivered messages across all destinations.
    pub fn delivered_count(&self) -> usize {
        self.inner
            .deliveries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }

    pub fn stats(&self) -> BrokerStats {
        BrokerStats {
            open_connections: self.inner.open_connections.load(Ordering::SeqCst),
            open_sessions: self.inner.open_sessions.load(Ordering::SeqCst),
            open_producers: self.inner.open_producers.load(Ordering::SeqCst),
            connections_opened: self.inner.connections_opened.load(Ordering::SeqCst),
            send_attempts: self.inner.send_attempts.load(Ordering::SeqCst),
            delivered: self.delivered_count(),
        }
    }

    /// True when no connection, session or producer is open.
    pub fn is_idle(&self) -> bool {
        let stats = self.stats();
        stats.open_connections == 0 && stats.open_sessions == 0 && stats.open_producers == 0
    }

    /// Drop all delivered messages and reset the lifetime counters.
    pub fn clear(&self) {
        self.inner
            .deliveries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.inner.connections_opened.store(0, Ordering::SeqCst);
        self.inner.send_attempts.store(0, Ordering::SeqCst);
    }
}

impl ConnectionFactory for InMemoryBroker {
    fn create_connection(&self) -> Result<Box<dyn Connection>, TransportError> {
        if self.inner.fails_at(FailurePoint::Connect) {
            return Err(TransportError::ConnectionFailed(
                "broker refused connection".to_string(),
            ));
        }
        self.inner.open_connections.fetch_add(1, Ordering::SeqCst);
        self.inner.connections_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryConnection {
            inner: Arc::clone(&self.inner),
        }))
    }
}

struct InMemoryConnection {
    inner: Arc<Inner>,
}

impl Connection for InMemoryConnection {
    fn create_session(&self) -> Result<Box<dyn Session + '_>, TransportError> {
        if self.inner.fails_at(FailurePoint::Session) {
            return Err(TransportError::SessionFailed(
                "session limit reached".to_string(),
            ));
        }
        self.inner.open_sessions.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemorySession { inner: &*self.inner }))
    }
}

impl Drop for InMemoryConnection {
    fn drop(&mut self) {
        self.inner.open_connections.fetch_sub(1, Ordering::SeqCst);
    }
}

struct InMemorySession<'c> {
    inner: &'c Inner,
}

impl Session for InMemorySession<'_> {
    fn create_producer(
        &self,
        destination: &Destination,
    ) -> Result<Box<dyn Producer + '_>, TransportError> {
        if self.inner.fails_at(FailurePoint::Producer) {
            return Err(TransportError::ProducerFailed {
                destination: destination.name().to_string(),
                message: "destination unavailable".to_string(),
            });
        }
        self.inner.open_producers.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(InMemoryProducer {
            inner: self.inner,
            destination: destination.clone(),
        }))
    }

    fn create_text_message(&self, body: String) -> Result<TextMessage, TransportError> {
        if self.inner.fails_at(FailurePoint::Message) {
            return Err(TransportError::MessageFailed(
                "message allocation failed".to_string(),
            ));
        }
        Ok(TextMessage::new(body))
    }
}

impl Drop for InMemorySession<'_> {
    fn drop(&mut self) {
        self.inner.open_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}

struct InMemoryProducer<'s> {
    inner: &'s Inner,
    destination: Destination,
}

impl Producer for InMemoryProducer<'_> {
    fn send(&mut self, message: TextMessage) -> Result<(), TransportError> {
        self.inner.send_attempts.fetch_add(1, Ordering::SeqCst);
        if self.inner.fails_at(FailurePoint::Send) {
            return Err(TransportError::SendFailed {
                destination: self.destination.name().to_string(),
                message: "broker rejected message".to_string(),
            });
        }
        self.inner
            .deliveries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(self.destination.name().to_string())
            .or_default()
            .push(message);
        Ok(())
    }
}

impl Drop for InMemoryProducer<'_> {
    fn drop(&mut self) {
        self.inner.open_producers.fetch_sub(1, Ordering::SeqCst);
    }
}
