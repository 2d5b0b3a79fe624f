use crate::event::{DomainEvent, EventError, EventHandler, downcast};

use super::ProductCreated;

/// Notifies by e-mail that a product was created.
#[derive(Debug, Default)]
pub struct SendEmailWhenProductIsCreatedHandler;

impl EventHandler for SendEmailWhenProductIsCreatedHandler {
    fn name(&self) -> &'static str {
        "SendEmailWhenProductIsCreatedHandler"
    }

    fn handle(&self, event: &dyn DomainEvent) -> Result<(), EventError> {
        let event = downcast::<ProductCreated>(self.name(), event)?;
        tracing::info!(
            product_id = %event.product_id,
            price = %event.price,
            "Sending email to product catalog subscribers: {} created",
            event.name
        );
        Ok(())
    }
}
