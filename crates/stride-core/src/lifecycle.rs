//! Deletion and extent clearing.
//!
//! Destroying an entity first severs every association it takes part in,
//! following the kind of each association:
//!
//! - composition parts are destroyed with their whole (reviews with their
//!   product, supplies with their stock or supplier);
//! - refunds are detached from their order and handed back to the caller,
//!   since a refund cannot exist without one;
//! - aggregation links are simply cut (a brand outlives its sneakers);
//! - a brand that still has sneakers, or a customer that still has orders,
//!   cannot be deleted at all.

use crate::{
  Error, Result, Violation,
  hierarchy,
  id::{
    BrandId, CustomerId, EmployeeId, OrderId, ProductId, PromocodeId, RefundId,
    ReviewId, StockId, StoreId, SupplierId, SupplyId,
  },
  link::{
    self, OrderCustomer, RefundOrder, ReviewProduct, SneakerBrand, SupplyStock,
    SupplySupplier,
  },
  model::{ExtentKind, Refund},
  shop::Shop,
};

impl Shop {
  // ── Orders and refunds ────────────────────────────────────────────────

  /// Delete an order together with its refunds. The refunds come back
  /// detached, with no order set.
  pub fn delete_order(&mut self, order: OrderId) -> Result<Vec<Refund>> {
    let (customer, refund_ids) = {
      let o = self.orders.require(order)?;
      (o.customer, o.refunds.iter().copied().collect::<Vec<_>>())
    };

    let mut detached = Vec::with_capacity(refund_ids.len());
    for refund in refund_ids {
      link::sever::<RefundOrder>(&mut self.refunds, &mut self.orders, refund)?;
      detached.extend(self.refunds.remove(refund));
    }

    let username = self.customers.get(customer).and_then(|c| c.username.clone());
    link::sever::<OrderCustomer>(&mut self.orders, &mut self.customers, order)?;
    if let Some(username) = username {
      self.orders_by_username.remove(&username, order)?;
    }
    self.orders.remove(order);

    tracing::info!(%order, refunds = detached.len(), "order deleted");
    Ok(detached)
  }

  /// Delete a single refund, returning it detached.
  pub fn delete_refund(&mut self, refund: RefundId) -> Result<Refund> {
    link::sever::<RefundOrder>(&mut self.refunds, &mut self.orders, refund)?;
    let detached = self.refunds.remove(refund).ok_or_else(|| Error::not_found(refund))?;
    tracing::debug!(%refund, "refund deleted");
    Ok(detached)
  }

  // ── Catalog ───────────────────────────────────────────────────────────

  /// Delete a product. Its reviews go with it; carts, wishlists, accessory
  /// compatibilities and its brand forget it. Orders keep their captured
  /// line items.
  pub fn delete_product(&mut self, product: ProductId) -> Result<()> {
    let reviews: Vec<ReviewId> = self.products.require(product)?.reviews().collect();

    link::sever::<SneakerBrand>(&mut self.products, &mut self.brands, product)?;
    for review in &reviews {
      self.reviews.remove(*review);
    }
    self.forget_product(product);
    self.products.remove(product);

    tracing::info!(%product, reviews = reviews.len(), "product deleted");
    Ok(())
  }

  /// Drop every non-owning reference to `product`.
  fn forget_product(&mut self, product: ProductId) {
    for id in self.customers.ids() {
      if let Some(c) = self.customers.get_mut(id) {
        c.cart.retain(|p| *p != product);
        c.wishlist.shift_remove(&product);
      }
    }
    for id in self.products.ids() {
      if let Some(a) = self.products.get_mut(id).and_then(|p| p.as_accessory_mut()) {
        a.compatibilities.shift_remove(&product);
      }
    }
  }

  /// Rejected while any sneaker still carries the brand.
  pub fn delete_brand(&mut self, brand: BrandId) -> Result<()> {
    if self.brands.require(brand)?.sneakers().next().is_some() {
      return Err(Violation::BrandNotEmpty(brand).into());
    }
    self.brands.remove(brand);
    tracing::debug!(%brand, "brand deleted");
    Ok(())
  }

  pub fn delete_review(&mut self, review: ReviewId) -> Result<()> {
    link::sever::<ReviewProduct>(&mut self.reviews, &mut self.products, review)?;
    self.reviews.remove(review);
    Ok(())
  }

  // ── Customers and staff ───────────────────────────────────────────────

  /// Rejected while the customer still has orders.
  pub fn delete_customer(&mut self, customer: CustomerId) -> Result<()> {
    if !self.customers.require(customer)?.order_history.is_empty() {
      return Err(Violation::CustomerHasOrders(customer).into());
    }
    self.customers.remove(customer);
    tracing::debug!(%customer, "customer deleted");
    Ok(())
  }

  /// Delete an employee. Their subordinates are left without a supervisor.
  pub fn delete_employee(&mut self, employee: EmployeeId) -> Result<()> {
    self.employees.require(employee)?;
    hierarchy::detach_all(&mut self.employees, employee)?;
    self.employees.remove(employee);
    tracing::info!(%employee, "employee deleted");
    Ok(())
  }

  // ── Supply chain ──────────────────────────────────────────────────────

  /// Delete a supply. A stock left without supplies is released from its
  /// supplier.
  pub fn delete_supply(&mut self, supply: SupplyId) -> Result<()> {
    let stock = self.supplies.require(supply)?.stock;

    link::sever::<SupplyStock>(&mut self.supplies, &mut self.stocks, supply)?;
    link::sever::<SupplySupplier>(&mut self.supplies, &mut self.suppliers, supply)?;
    if let Some(s) = self.stocks.get_mut(stock)
      && s.supplies.is_empty()
    {
      s.supplier = None;
    }
    for id in self.employees.ids() {
      if let Some(c) = self.employees.get_mut(id).and_then(|e| e.logistics.as_mut()) {
        c.assigned_supplies.shift_remove(&supply);
      }
    }
    self.supplies.remove(supply);

    tracing::debug!(%supply, %stock, "supply deleted");
    Ok(())
  }

  /// Delete a stock and every supply delivered into it.
  pub fn delete_stock(&mut self, stock: StockId) -> Result<()> {
    let supplies: Vec<SupplyId> = self.stocks.require(stock)?.supplies().collect();
    for supply in &supplies {
      self.delete_supply(*supply)?;
    }
    self.stocks.remove(stock);
    tracing::info!(%stock, supplies = supplies.len(), "stock deleted");
    Ok(())
  }

  /// Delete a supplier and every supply it delivered.
  pub fn delete_supplier(&mut self, supplier: SupplierId) -> Result<()> {
    let supplies: Vec<SupplyId> = self.suppliers.require(supplier)?.supplies().collect();
    for supply in &supplies {
      self.delete_supply(*supply)?;
    }
    self.suppliers.remove(supplier);
    tracing::info!(%supplier, supplies = supplies.len(), "supplier deleted");
    Ok(())
  }

  /// Orders keep a copy of any discount they received, so nothing else
  /// refers to a promo code.
  pub fn delete_promocode(&mut self, promocode: PromocodeId) -> Result<()> {
    self.promocodes.require(promocode)?;
    self.promocodes.remove(promocode);
    Ok(())
  }

  pub fn delete_store(&mut self, store: StoreId) -> Result<()> {
    self.stores.require(store)?;
    self.stores.remove(store);
    Ok(())
  }

  // ── Whole extents ─────────────────────────────────────────────────────

  /// Remove every member of one kind, severing their associations the same
  /// way single deletions do. Kinds whose members cannot exist without the
  /// cleared ones are cleared with them. Returns how many members of
  /// `kind` were removed.
  pub fn clear(&mut self, kind: ExtentKind) -> usize {
    let removed = match kind {
      ExtentKind::Customer => {
        self.clear(ExtentKind::Order);
        self.customers.clear().len()
      }
      ExtentKind::Order => {
        self.clear(ExtentKind::Refund);
        for id in self.customers.ids() {
          if let Some(c) = self.customers.get_mut(id) {
            c.order_history.clear();
          }
        }
        self.orders_by_username.clear();
        self.orders.clear().len()
      }
      ExtentKind::Refund => {
        for id in self.orders.ids() {
          if let Some(o) = self.orders.get_mut(id) {
            o.refunds.clear();
          }
        }
        self.refunds.clear().len()
      }
      ExtentKind::Product => {
        self.clear(ExtentKind::Review);
        for id in self.brands.ids() {
          if let Some(b) = self.brands.get_mut(id) {
            b.sneakers.clear();
          }
        }
        for id in self.customers.ids() {
          if let Some(c) = self.customers.get_mut(id) {
            c.cart.clear();
            c.wishlist.clear();
          }
        }
        self.products.clear().len()
      }
      ExtentKind::Brand => {
        for id in self.products.ids() {
          if let Some(s) = self.products.get_mut(id).and_then(|p| p.as_sneaker_mut()) {
            s.brand = None;
          }
        }
        self.brands.clear().len()
      }
      ExtentKind::Review => {
        for id in self.products.ids() {
          if let Some(p) = self.products.get_mut(id) {
            p.reviews.clear();
          }
        }
        self.reviews.clear().len()
      }
      ExtentKind::Employee => self.employees.clear().len(),
      ExtentKind::Stock => {
        self.clear(ExtentKind::Supply);
        self.stocks.clear().len()
      }
      ExtentKind::Supplier => {
        self.clear(ExtentKind::Supply);
        self.suppliers.clear().len()
      }
      ExtentKind::Supply => {
        for id in self.stocks.ids() {
          if let Some(s) = self.stocks.get_mut(id) {
            s.supplies.clear();
            s.supplier = None;
          }
        }
        for id in self.suppliers.ids() {
          if let Some(s) = self.suppliers.get_mut(id) {
            s.supplies.clear();
          }
        }
        for id in self.employees.ids() {
          if let Some(c) = self.employees.get_mut(id).and_then(|e| e.logistics.as_mut()) {
            c.assigned_supplies.clear();
          }
        }
        self.supplies.clear().len()
      }
      ExtentKind::Promocode => self.promocodes.clear().len(),
      ExtentKind::Store => self.stores.clear().len(),
    };
    tracing::info!(kind = kind.as_str(), removed, "extent cleared");
    removed
  }

  /// Empty every extent.
  pub fn reset(&mut self) {
    for kind in ExtentKind::ALL {
      self.clear(kind);
    }
  }
}
