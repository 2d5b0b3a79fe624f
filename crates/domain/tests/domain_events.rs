//! Integration tests for event registration and delivery.

use std::sync::{Arc, Mutex};

use domain::{
    Address, AuditCustomerCreatedHandler, Customer, CustomerAddressChanged, CustomerCreated,
    DomainEvent, EventDispatcher, EventError, EventHandler, LogAddressChangedHandler,
    LogCustomerCreatedHandler, Money, Product, ProductCreated,
    SendEmailWhenProductIsCreatedHandler,
};

/// Appends its label to a shared log on every call.
struct Tagged {
    label: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl EventHandler for Tagged {
    fn name(&self) -> &'static str {
        self.label
    }

    fn handle(&self, event: &dyn DomainEvent) -> Result<(), EventError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.label, event.event_type()));
        Ok(())
    }
}

fn tagged(label: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn EventHandler> {
    Arc::new(Tagged {
        label,
        log: Arc::clone(log),
    })
}

#[test]
fn customer_created_reaches_both_handlers_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(CustomerCreated::EVENT_TYPE, tagged("first", &log));
    dispatcher.register(CustomerCreated::EVENT_TYPE, tagged("second", &log));

    let customer = Customer::new("123", "Customer 1").unwrap();
    dispatcher.notify(&CustomerCreated::new(&customer)).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "first:CustomerCreatedEvent".to_string(),
            "second:CustomerCreatedEvent".to_string()
        ]
    );
}

#[test]
fn address_change_event_is_delivered_separately() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(CustomerCreated::EVENT_TYPE, tagged("created", &log));
    dispatcher.register(CustomerAddressChanged::EVENT_TYPE, tagged("moved", &log));

    let mut customer = Customer::new("123", "Customer 1").unwrap();
    let event = customer.change_address(Address::new("Street 1", 1, "13330-250", "São Paulo").unwrap());
    dispatcher.notify(&event).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["moved:CustomerChangeAddressEvent".to_string()]
    );
}

#[test]
fn unregistered_handler_no_longer_receives_events() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let handler = tagged("only", &log);
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(ProductCreated::EVENT_TYPE, Arc::clone(&handler));
    dispatcher.unregister(ProductCreated::EVENT_TYPE, &handler);

    let product = Product::new("1", "Product 1", Money::from_cents(1000)).unwrap();
    dispatcher.notify(&ProductCreated::new(&product)).unwrap();

    assert!(dispatcher.handlers(ProductCreated::EVENT_TYPE).is_empty());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn shipped_handlers_accept_their_events() {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(
        CustomerCreated::EVENT_TYPE,
        Arc::new(LogCustomerCreatedHandler),
    );
    dispatcher.register(
        CustomerCreated::EVENT_TYPE,
        Arc::new(AuditCustomerCreatedHandler),
    );
    dispatcher.register(
        CustomerAddressChanged::EVENT_TYPE,
        Arc::new(LogAddressChangedHandler),
    );
    dispatcher.register(
        ProductCreated::EVENT_TYPE,
        Arc::new(SendEmailWhenProductIsCreatedHandler),
    );

    let mut customer = Customer::new("123", "Customer 1").unwrap();
    dispatcher.notify(&CustomerCreated::new(&customer)).unwrap();
    let moved = customer.change_address(Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap());
    dispatcher.notify(&moved).unwrap();
    let product = Product::new("1", "Product 1", Money::from_cents(1000)).unwrap();
    dispatcher.notify(&ProductCreated::new(&product)).unwrap();

    assert_eq!(dispatcher.handlers(CustomerCreated::EVENT_TYPE).len(), 2);
}

#[test]
fn handler_registered_under_wrong_type_reports_unexpected_event() {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(
        CustomerCreated::EVENT_TYPE,
        Arc::new(SendEmailWhenProductIsCreatedHandler),
    );

    let customer = Customer::new("123", "Customer 1").unwrap();
    let err = dispatcher.notify(&CustomerCreated::new(&customer)).unwrap_err();

    assert_eq!(
        err,
        EventError::UnexpectedEvent {
            handler: "SendEmailWhenProductIsCreatedHandler",
            event_type: "CustomerCreatedEvent",
        }
    );
}
