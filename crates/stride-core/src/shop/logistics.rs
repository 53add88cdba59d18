//! Stock, suppliers, supplies, promo codes and stores.

use chrono::NaiveDate;

use crate::{
  Result, Violation,
  id::{PromocodeId, StockId, StoreId, SupplierId, SupplyId},
  link::{self, SupplyStock, SupplySupplier},
  model::{
    NewPromocode, NewStore, NewSupplier, Promocode, Stock, Store, Supplier, Supply,
  },
  pricing,
};

use super::Shop;

impl Shop {
  pub fn create_stock(&mut self, quantity: u32) -> StockId {
    let stock = Stock::build(quantity);
    let id = stock.id;
    self.stocks.add(stock);
    id
  }

  pub fn create_supplier(&mut self, input: &NewSupplier) -> Result<SupplierId> {
    let supplier = Supplier::build(input)?;
    let id = supplier.id;
    self.suppliers.add(supplier);
    Ok(id)
  }

  /// Record a delivery from `supplier` into `stock`. The first supply binds
  /// the stock to its supplier; later supplies must come from the same one.
  pub fn create_supply(
    &mut self,
    stock: StockId,
    supplier: SupplierId,
    supply_date: NaiveDate,
  ) -> Result<SupplyId> {
    let Some(s) = self.stocks.get(stock) else {
      return Err(link::missing_owner(stock));
    };
    if !self.suppliers.contains(supplier) {
      return Err(link::missing_owner(supplier));
    }
    if let Some(current) = s.supplier
      && current != supplier
    {
      return Err(Violation::SupplierConflict { stock, current }.into());
    }

    let supply = Supply::build(stock, supplier, supply_date);
    let id = supply.id;
    self.supplies.add(supply);
    link::attach::<SupplyStock>(&self.supplies, &mut self.stocks, id)?;
    link::attach::<SupplySupplier>(&self.supplies, &mut self.suppliers, id)?;
    self.stocks.require_mut(stock)?.supplier = Some(supplier);

    tracing::debug!(supply = %id, %stock, %supplier, "supply recorded");
    Ok(id)
  }

  pub fn create_store(&mut self, input: &NewStore) -> Result<StoreId> {
    let store = Store::build(input)?;
    let id = store.id;
    self.stores.add(store);
    tracing::debug!(store = %id, "store created");
    Ok(id)
  }

  /// Register a promo code. Codes are unique ignoring case.
  pub fn create_promocode(&mut self, input: &NewPromocode) -> Result<PromocodeId> {
    let promo = Promocode::build(input)?;
    if pricing::find_code(&self.promocodes, promo.code()).is_some() {
      return Err(Violation::DuplicateCode(promo.code).into());
    }
    let id = promo.id;
    self.promocodes.add(promo);
    Ok(id)
  }

  /// Find a promo code the way checkout does, ignoring case.
  pub fn find_promocode(&self, code: &str) -> Option<&Promocode> {
    pricing::find_code(&self.promocodes, code)
  }
}
