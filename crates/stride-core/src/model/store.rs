//! Physical shops. A store has no associations of its own.

use serde::{Deserialize, Serialize};

use crate::{Result, id::StoreId, registry::Entity, validate};

pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_ADDRESS_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
  pub(crate) id: StoreId,
  name:          String,
  address:       String,
}

/// Input to [`crate::Shop::create_store`].
#[derive(Debug, Clone)]
pub struct NewStore {
  pub name:    String,
  pub address: String,
}

impl Store {
  pub(crate) fn build(input: &NewStore) -> Result<Self> {
    Ok(Self {
      id:      StoreId::new(),
      name:    validate::bounded("name", &input.name, MAX_NAME_CHARS)?,
      address: validate::bounded("address", &input.address, MAX_ADDRESS_CHARS)?,
    })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn address(&self) -> &str { &self.address }

  pub fn set_name(&mut self, name: &str) -> Result<()> {
    self.name = validate::bounded("name", name, MAX_NAME_CHARS)?;
    Ok(())
  }

  pub fn set_address(&mut self, address: &str) -> Result<()> {
    self.address = validate::bounded("address", address, MAX_ADDRESS_CHARS)?;
    Ok(())
  }
}

impl Entity for Store {
  type Id = StoreId;

  fn id(&self) -> StoreId { self.id }
}
