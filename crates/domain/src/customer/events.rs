//! Customer domain events.

use std::any::Any;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::DomainEvent;

use super::{Address, Customer};

fn to_payload<T: Serialize>(data: &T) -> serde_json::Value {
    serde_json::to_value(data).unwrap_or(serde_json::Value::Null)
}

/// A customer was registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreated {
    pub customer_id: String,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

impl CustomerCreated {
    pub const EVENT_TYPE: &'static str = "CustomerCreatedEvent";

    pub fn new(customer: &Customer) -> Self {
        Self {
            customer_id: customer.id().to_string(),
            name: customer.name().to_string(),
            occurred_at: Utc::now(),
        }
    }
}

impl DomainEvent for CustomerCreated {
    fn event_type(&self) -> &'static str {
        Self::EVENT_TYPE
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn payload(&self) -> serde_json::Value {
        to_payload(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A customer's address was replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddressChanged {
    pub customer_id: String,
    pub name: String,
    pub address: Address,
    pub occurred_at: DateTime<Utc>,
}

impl CustomerAddressChanged {
    pub const EVENT_TYPE: &'static str = "CustomerChangeAddressEvent";

    pub fn new(customer: &Customer, address: Address) -> Self {
        Self {
            customer_id: customer.id().to_string(),
            name: customer.name().to_string(),
            address,
            occurred_at: Utc::now(),
        }
    }
}

impl DomainEvent for CustomerAddressChanged {
    fn event_type(&self) -> &'static str {
        Self::EVENT_TYPE
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn payload(&self) -> serde_json::Value {
        to_payload(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_names() {
        let customer = Customer::new("1", "Customer Name").unwrap();
        assert_eq!(
            CustomerCreated::new(&customer).event_type(),
            "CustomerCreatedEvent"
        );
    }

    #[test]
    fn payload_carries_customer_data() {
        let customer = Customer::new("1", "Customer Name").unwrap();
        let payload = CustomerCreated::new(&customer).payload();
        assert_eq!(payload["customer_id"], "1");
        assert_eq!(payload["name"], "Customer Name");
    }

    #[test]
    fn address_changed_payload_reads_back() {
        let customer = Customer::new("1", "Customer Name").unwrap();
        let address = Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap();
        let event = CustomerAddressChanged::new(&customer, address);

        let restored: CustomerAddressChanged = serde_json::from_value(event.payload()).unwrap();
        assert_eq!(restored, event);
    }

    #[test]
    fn address_changed_with_invalid_address_is_rejected() {
        let customer = Customer::new("1", "Customer Name").unwrap();
        let address = Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap();
        let mut payload = CustomerAddressChanged::new(&customer, address).payload();
        payload["address"]["city"] = serde_json::json!("");

        let err = serde_json::from_value::<CustomerAddressChanged>(payload).unwrap_err();
        assert!(err.to_string().contains("City is required"));
    }
}
