use serde::Serialize;

use crate::error::{ValidationError, require};

use super::{Address, CustomerAddressChanged};

/// Customer aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: String,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u32,
}

impl Customer {
    /// Creates an inactive customer with no address and zero reward points.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let name = name.into();
        require(&id, ValidationError::IdRequired)?;
        require(&name, ValidationError::NameRequired)?;

        Ok(Self {
            id,
            name,
            address: None,
            active: false,
            reward_points: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u32 {
        self.reward_points
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        require(&name, ValidationError::NameRequired)?;
        self.name = name;
        Ok(())
    }

    /// Replaces the address and returns the event for the caller to publish.
    pub fn change_address(&mut self, address: Address) -> CustomerAddressChanged {
        let event = CustomerAddressChanged::new(self, address.clone());
        self.address = Some(address);
        event
    }

    /// Activates the customer. An address must be set first.
    pub fn activate(&mut self) -> Result<(), ValidationError> {
        if self.address.is_none() {
            return Err(ValidationError::AddressRequiredToActivate);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Adds `points` to the running reward total.
    pub fn add_reward_points(&mut self, points: u32) {
        self.reward_points = self.reward_points.saturating_add(points);
    }
}
