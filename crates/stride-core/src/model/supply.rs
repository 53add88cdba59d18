//! Stock, suppliers and the supply join entity.

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  id::{StockId, SupplierId, SupplyId},
  registry::Entity,
  validate,
};

/// Inventory of goods. Bound to at most one supplier, derived from its
/// supplies: set by the first supply, cleared when the last one goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
  pub(crate) id:       StockId,
  quantity:            u32,
  pub(crate) supplier: Option<SupplierId>,
  pub(crate) supplies: IndexSet<SupplyId>,
}

impl Stock {
  pub(crate) fn build(quantity: u32) -> Self {
    Self {
      id: StockId::new(),
      quantity,
      supplier: None,
      supplies: IndexSet::new(),
    }
  }

  pub fn quantity(&self) -> u32 { self.quantity }

  pub fn supplier(&self) -> Option<SupplierId> { self.supplier }

  pub fn supplies(&self) -> impl Iterator<Item = SupplyId> + '_ {
    self.supplies.iter().copied()
  }

  pub fn set_quantity(&mut self, quantity: u32) { self.quantity = quantity; }
}

impl Entity for Stock {
  type Id = StockId;

  fn id(&self) -> StockId { self.id }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
  pub(crate) id:       SupplierId,
  name:                String,
  location:            String,
  pub(crate) supplies: IndexSet<SupplyId>,
}

/// Input to [`crate::Shop::create_supplier`].
#[derive(Debug, Clone)]
pub struct NewSupplier {
  pub name:     String,
  pub location: String,
}

impl Supplier {
  pub(crate) fn build(input: &NewSupplier) -> Result<Self> {
    Ok(Self {
      id:       SupplierId::new(),
      name:     validate::non_blank("name", &input.name)?,
      location: validate::non_blank("location", &input.location)?,
      supplies: IndexSet::new(),
    })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn location(&self) -> &str { &self.location }

  pub fn supplies(&self) -> impl Iterator<Item = SupplyId> + '_ {
    self.supplies.iter().copied()
  }

  pub fn set_location(&mut self, location: &str) -> Result<()> {
    self.location = validate::non_blank("location", location)?;
    Ok(())
  }
}

impl Entity for Supplier {
  type Id = SupplierId;

  fn id(&self) -> SupplierId { self.id }
}

/// A delivery of one supplier into one stock on a given date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supply {
  pub(crate) id:       SupplyId,
  pub(crate) stock:    StockId,
  pub(crate) supplier: SupplierId,
  supply_date:         NaiveDate,
}

impl Supply {
  pub(crate) fn build(stock: StockId, supplier: SupplierId, supply_date: NaiveDate) -> Self {
    Self { id: SupplyId::new(), stock, supplier, supply_date }
  }

  pub fn stock(&self) -> StockId { self.stock }

  pub fn supplier(&self) -> SupplierId { self.supplier }

  pub fn supply_date(&self) -> NaiveDate { self.supply_date }
}

impl Entity for Supply {
  type Id = SupplyId;

  fn id(&self) -> SupplyId { self.id }
}
