//! Customer application service: persistence plus event publication.

use std::sync::Arc;

use row_store::CustomerStore;

use crate::error::DomainError;
use crate::event::EventDispatcher;
use crate::repository::RepositoryInterface;

use super::{Address, Customer, CustomerCreated, CustomerRepository};

/// Registers and relocates customers, publishing the matching events.
pub struct CustomerService<S> {
    repository: CustomerRepository<S>,
    dispatcher: Arc<EventDispatcher>,
}

impl<S: CustomerStore> CustomerService<S> {
    pub fn new(store: S, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            repository: CustomerRepository::new(store),
            dispatcher,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &CustomerRepository<S> {
        &self.repository
    }

    /// Creates and persists a customer, then publishes `CustomerCreated`.
    #[tracing::instrument(skip(self))]
    pub async fn register(&self, id: &str, name: &str) -> Result<Customer, DomainError> {
        let customer = Customer::new(id, name)?;
        self.repository.create(&customer).await?;
        self.dispatcher.notify(&CustomerCreated::new(&customer))?;
        Ok(customer)
    }

    /// Replaces a stored customer's address, then publishes the address change.
    #[tracing::instrument(skip(self, address))]
    pub async fn relocate(&self, id: &str, address: Address) -> Result<Customer, DomainError> {
        let mut customer = self.repository.find(id).await?;
        let event = customer.change_address(address);
        self.repository.update(&customer).await?;
        self.dispatcher.notify(&event)?;
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepositoryError;
    use crate::event::{DomainEvent, EventError, EventHandler};
    use row_store::InMemoryRowStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<&'static str>>,
    }

    impl EventHandler for Recorder {
        fn name(&self) -> &'static str {
            "Recorder"
        }

        fn handle(&self, event: &dyn DomainEvent) -> Result<(), EventError> {
            self.seen.lock().unwrap().push(event.event_type());
            Ok(())
        }
    }

    fn service_with_recorder() -> (CustomerService<InMemoryRowStore>, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(CustomerCreated::EVENT_TYPE, recorder.clone());
        dispatcher.register(crate::customer::CustomerAddressChanged::EVENT_TYPE, recorder.clone());
        let service = CustomerService::new(InMemoryRowStore::new(), Arc::new(dispatcher));
        (service, recorder)
    }

    #[tokio::test]
    async fn test_register_persists_and_publishes() {
        let (service, recorder) = service_with_recorder();

        let customer = service.register("c1", "Customer 1").await.unwrap();

        assert_eq!(service.repository().find("c1").await.unwrap(), customer);
        assert_eq!(*recorder.seen.lock().unwrap(), vec!["CustomerCreatedEvent"]);
    }

    #[tokio::test]
    async fn test_invalid_customer_publishes_nothing() {
        let (service, recorder) = service_with_recorder();

        let result = service.register("c1", "").await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(recorder.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_relocate_updates_and_publishes() {
        let (service, recorder) = service_with_recorder();
        service.register("c1", "Customer 1").await.unwrap();

        let address = Address::new("Street 2", 2, "Zipcode 2", "City 2").unwrap();
        service.relocate("c1", address.clone()).await.unwrap();

        let stored = service.repository().find("c1").await.unwrap();
        assert_eq!(stored.address(), Some(&address));
        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec!["CustomerCreatedEvent", "CustomerChangeAddressEvent"]
        );
    }

    #[tokio::test]
    async fn test_relocate_unknown_customer() {
        let (service, _) = service_with_recorder();
        let address = Address::new("Street 2", 2, "Zipcode 2", "City 2").unwrap();

        let result = service.relocate("missing", address).await;

        assert!(matches!(
            result,
            Err(DomainError::Repository(RepositoryError::NotFound { .. }))
        ));
    }
}
