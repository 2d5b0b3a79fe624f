//! Handlers subscribed to customer events.

use crate::event::{DomainEvent, EventError, EventHandler, downcast};

use super::{CustomerAddressChanged, CustomerCreated};

/// First log line for a newly registered customer.
#[derive(Debug, Default)]
pub struct LogCustomerCreatedHandler;

impl EventHandler for LogCustomerCreatedHandler {
    fn name(&self) -> &'static str {
        "LogCustomerCreatedHandler"
    }

    fn handle(&self, event: &dyn DomainEvent) -> Result<(), EventError> {
        let event = downcast::<CustomerCreated>(self.name(), event)?;
        tracing::info!(
            customer_id = %event.customer_id,
            "This is the first log of event: CustomerCreatedEvent"
        );
        Ok(())
    }
}

/// Second log line for a newly registered customer.
#[derive(Debug, Default)]
pub struct AuditCustomerCreatedHandler;

impl EventHandler for AuditCustomerCreatedHandler {
    fn name(&self) -> &'static str {
        "AuditCustomerCreatedHandler"
    }

    fn handle(&self, event: &dyn DomainEvent) -> Result<(), EventError> {
        let event = downcast::<CustomerCreated>(self.name(), event)?;
        tracing::info!(
            customer_id = %event.customer_id,
            occurred_at = %event.occurred_at,
            "This is the second log of event: CustomerCreatedEvent"
        );
        Ok(())
    }
}

/// Logs the new address of a customer.
#[derive(Debug, Default)]
pub struct LogAddressChangedHandler;

impl EventHandler for LogAddressChangedHandler {
    fn name(&self) -> &'static str {
        "LogAddressChangedHandler"
    }

    fn handle(&self, event: &dyn DomainEvent) -> Result<(), EventError> {
        let event = downcast::<CustomerAddressChanged>(self.name(), event)?;
        tracing::info!(
            "Customer address: {}, {} changed to: {}",
            event.customer_id,
            event.name,
            event.address
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::{Address, Customer};

    #[test]
    fn created_handlers_accept_created_event() {
        let customer = Customer::new("1", "Customer Name").unwrap();
        let event = CustomerCreated::new(&customer);
        assert!(LogCustomerCreatedHandler.handle(&event).is_ok());
        assert!(AuditCustomerCreatedHandler.handle(&event).is_ok());
    }

    #[test]
    fn address_handler_rejects_other_events() {
        let customer = Customer::new("1", "Customer Name").unwrap();
        let result = LogAddressChangedHandler.handle(&CustomerCreated::new(&customer));
        assert_eq!(
            result.unwrap_err(),
            EventError::UnexpectedEvent {
                handler: "LogAddressChangedHandler",
                event_type: "CustomerCreatedEvent",
            }
        );
    }

    #[test]
    fn address_handler_accepts_address_event() {
        let mut customer = Customer::new("1", "Daniel Sobanski").unwrap();
        let event = customer.change_address(Address::new("Rua 1", 1, "000", "Cidade 1").unwrap());
        assert!(LogAddressChangedHandler.handle(&event).is_ok());
    }
}
