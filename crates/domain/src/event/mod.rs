//! Domain events and the synchronous dispatcher.
//!
//! Events are facts raised by entities and published by whoever performed
//! the change. Handlers subscribe by event-type name.

mod dispatcher;

use std::any::Any;

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use dispatcher::EventDispatcher;

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Any + Send + Sync + std::fmt::Debug {
    /// Returns the event type name handlers are registered under.
    fn event_type(&self) -> &'static str;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Returns the event data as JSON.
    fn payload(&self) -> serde_json::Value;

    /// Returns the event as `Any` so handlers can recover the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// A subscriber invoked by [`EventDispatcher::notify`].
pub trait EventHandler: Send + Sync {
    /// Returns the name of this handler.
    fn name(&self) -> &'static str;

    /// Handles a single event.
    fn handle(&self, event: &dyn DomainEvent) -> Result<(), EventError>;
}

/// Errors raised while delivering an event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// A handler failed.
    #[error("Handler {handler} failed: {message}")]
    Handler {
        handler: &'static str,
        message: String,
    },

    /// A handler received an event of a type it does not understand.
    #[error("Handler {handler} cannot handle {event_type}")]
    UnexpectedEvent {
        handler: &'static str,
        event_type: &'static str,
    },
}

/// Recovers the concrete event type inside a handler.
pub fn downcast<'a, E: DomainEvent>(
    handler: &'static str,
    event: &'a dyn DomainEvent,
) -> Result<&'a E, EventError> {
    event
        .as_any()
        .downcast_ref::<E>()
        .ok_or(EventError::UnexpectedEvent {
            handler,
            event_type: event.event_type(),
        })
}
