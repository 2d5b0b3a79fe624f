use std::collections::HashMap;
use std::sync::Arc;

use super::{DomainEvent, EventError, EventHandler};

/// Registry mapping event-type names to ordered lists of handlers.
///
/// Delivery is synchronous and in-process. Handlers for one event type run in
/// registration order; the first failing handler aborts delivery and its error
/// is returned to the caller of [`notify`](Self::notify).
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl EventDispatcher {
    /// Creates an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to the list for `event_name`.
    ///
    /// Registering the same handler twice adds a second entry.
    pub fn register(&mut self, event_name: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let event_name = event_name.into();
        tracing::debug!(event = %event_name, handler = handler.name(), "registering handler");
        self.handlers.entry(event_name).or_default().push(handler);
    }

    /// Removes the first registration of this handler instance for `event_name`.
    ///
    /// Does nothing if the handler is not registered.
    pub fn unregister(&mut self, event_name: &str, handler: &Arc<dyn EventHandler>) {
        if let Some(handlers) = self.handlers.get_mut(event_name)
            && let Some(position) = handlers.iter().position(|h| Arc::ptr_eq(h, handler))
        {
            handlers.remove(position);
        }
    }

    /// Removes every registration.
    pub fn unregister_all(&mut self) {
        self.handlers.clear();
    }

    /// Returns the handlers registered for `event_name`, in registration order.
    pub fn handlers(&self, event_name: &str) -> &[Arc<dyn EventHandler>] {
        self.handlers
            .get(event_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Delivers an event to every handler registered for its type.
    #[tracing::instrument(skip(self, event), fields(event_type = event.event_type()))]
    pub fn notify(&self, event: &dyn DomainEvent) -> Result<(), EventError> {
        let handlers = self.handlers(event.event_type());
        if handlers.is_empty() {
            tracing::trace!("no handlers registered");
            return Ok(());
        }

        for handler in handlers {
            handler.handle(event)?;
        }

        metrics::counter!("domain_events_dispatched").increment(1);
        Ok(())
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (event_name, handlers) in &self.handlers {
            let names: Vec<_> = handlers.iter().map(|h| h.name()).collect();
            map.entry(event_name, &names);
        }
        map.finish()
    }
}
