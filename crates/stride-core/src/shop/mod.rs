//! The [`Shop`] context: every registry plus the username index, with the
//! operations that keep them consistent.
//!
//! All mutation goes through `&mut Shop`, so one caller at a time sees and
//! changes the graph. Each operation checks its preconditions before its
//! first write; a rejected call leaves the shop untouched.

mod catalog;
mod customers;
mod logistics;
mod staff;

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  clock::{Clock, SystemClock},
  id::{
    BrandId, CustomerId, EmployeeId, ProductId, PromocodeId, RefundId, StockId,
    StoreId, SupplierId,
  },
  model::{
    Brand, Customer, Employee, ExtentKind, Order, Product, Promocode, Refund,
    Review, Stock, Store, Supplier, Supply,
  },
  qualified::QualifiedIndex,
  registry::Registry,
};

/// Tunables that are not part of any entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopSettings {
  /// Salary every employee earns before their bonus.
  pub base_salary: Decimal,
}

impl Default for ShopSettings {
  fn default() -> Self { Self { base_salary: Decimal::from(2500) } }
}

#[derive(Debug)]
pub struct Shop {
  pub(crate) customers:          Registry<Customer>,
  pub(crate) orders:             Registry<Order>,
  pub(crate) refunds:            Registry<Refund>,
  pub(crate) products:           Registry<Product>,
  pub(crate) brands:             Registry<Brand>,
  pub(crate) reviews:            Registry<Review>,
  pub(crate) employees:          Registry<Employee>,
  pub(crate) stocks:             Registry<Stock>,
  pub(crate) suppliers:          Registry<Supplier>,
  pub(crate) supplies:           Registry<Supply>,
  pub(crate) promocodes:         Registry<Promocode>,
  pub(crate) stores:             Registry<Store>,
  /// Orders filed by their customer's username.
  pub(crate) orders_by_username: QualifiedIndex,
  pub(crate) settings:           ShopSettings,
  pub(crate) clock:              Arc<dyn Clock>,
}

impl Default for Shop {
  fn default() -> Self { Self::new(ShopSettings::default()) }
}

impl Shop {
  pub fn new(settings: ShopSettings) -> Self { Self::with_clock(settings, Arc::new(SystemClock)) }

  pub fn with_clock(settings: ShopSettings, clock: Arc<dyn Clock>) -> Self {
    Self {
      customers: Registry::new(),
      orders: Registry::new(),
      refunds: Registry::new(),
      products: Registry::new(),
      brands: Registry::new(),
      reviews: Registry::new(),
      employees: Registry::new(),
      stocks: Registry::new(),
      suppliers: Registry::new(),
      supplies: Registry::new(),
      promocodes: Registry::new(),
      stores: Registry::new(),
      orders_by_username: QualifiedIndex::new(),
      settings,
      clock,
    }
  }

  /// An empty shop sharing this one's settings and clock.
  pub(crate) fn empty_like(&self) -> Self {
    Self::with_clock(self.settings.clone(), Arc::clone(&self.clock))
  }

  pub fn settings(&self) -> &ShopSettings { &self.settings }

  pub fn clock(&self) -> &dyn Clock { self.clock.as_ref() }

  // ── Read access ───────────────────────────────────────────────────────

  pub fn customers(&self) -> &Registry<Customer> { &self.customers }

  pub fn orders(&self) -> &Registry<Order> { &self.orders }

  pub fn refunds(&self) -> &Registry<Refund> { &self.refunds }

  pub fn products(&self) -> &Registry<Product> { &self.products }

  pub fn brands(&self) -> &Registry<Brand> { &self.brands }

  pub fn reviews(&self) -> &Registry<Review> { &self.reviews }

  pub fn employees(&self) -> &Registry<Employee> { &self.employees }

  pub fn stocks(&self) -> &Registry<Stock> { &self.stocks }

  pub fn suppliers(&self) -> &Registry<Supplier> { &self.suppliers }

  pub fn supplies(&self) -> &Registry<Supply> { &self.supplies }

  pub fn promocodes(&self) -> &Registry<Promocode> { &self.promocodes }

  pub fn stores(&self) -> &Registry<Store> { &self.stores }

  pub fn orders_by_username(&self) -> &QualifiedIndex { &self.orders_by_username }

  /// Number of live members of one kind.
  pub fn extent_len(&self, kind: ExtentKind) -> usize {
    match kind {
      ExtentKind::Customer => self.customers.len(),
      ExtentKind::Order => self.orders.len(),
      ExtentKind::Refund => self.refunds.len(),
      ExtentKind::Product => self.products.len(),
      ExtentKind::Brand => self.brands.len(),
      ExtentKind::Review => self.reviews.len(),
      ExtentKind::Employee => self.employees.len(),
      ExtentKind::Stock => self.stocks.len(),
      ExtentKind::Supplier => self.suppliers.len(),
      ExtentKind::Supply => self.supplies.len(),
      ExtentKind::Promocode => self.promocodes.len(),
      ExtentKind::Store => self.stores.len(),
    }
  }

  // ── Scalar edits ──────────────────────────────────────────────────────
  //
  // Entities only expose validating setters for their own fields, so
  // handing out `&mut` cannot put an association out of step.

  pub fn customer_mut(&mut self, id: CustomerId) -> Result<&mut Customer> {
    self.customers.require_mut(id)
  }

  pub fn refund_mut(&mut self, id: RefundId) -> Result<&mut Refund> { self.refunds.require_mut(id) }

  pub fn product_mut(&mut self, id: ProductId) -> Result<&mut Product> {
    self.products.require_mut(id)
  }

  pub fn brand_mut(&mut self, id: BrandId) -> Result<&mut Brand> { self.brands.require_mut(id) }

  pub fn employee_mut(&mut self, id: EmployeeId) -> Result<&mut Employee> {
    self.employees.require_mut(id)
  }

  pub fn stock_mut(&mut self, id: StockId) -> Result<&mut Stock> { self.stocks.require_mut(id) }

  pub fn supplier_mut(&mut self, id: SupplierId) -> Result<&mut Supplier> {
    self.suppliers.require_mut(id)
  }

  pub fn promocode_mut(&mut self, id: PromocodeId) -> Result<&mut Promocode> {
    self.promocodes.require_mut(id)
  }

  pub fn store_mut(&mut self, id: StoreId) -> Result<&mut Store> { self.stores.require_mut(id) }
}
