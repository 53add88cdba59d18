//! Serialized form of a whole shop.
//!
//! A [`Snapshot`] carries every extent as a plain list. The username index
//! is not stored; it is rebuilt from the orders and their customers when
//! the snapshot is imported.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  id::Identifier,
  model::{
    Brand, Customer, Employee, ExtentKind, Order, Product, Promocode, Refund,
    Review, Stock, Store, Supplier, Supply,
  },
  shop::Shop,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
  pub customers:  Vec<Customer>,
  pub orders:     Vec<Order>,
  pub refunds:    Vec<Refund>,
  pub products:   Vec<Product>,
  pub brands:     Vec<Brand>,
  pub reviews:    Vec<Review>,
  pub employees:  Vec<Employee>,
  pub stocks:     Vec<Stock>,
  pub suppliers:  Vec<Supplier>,
  pub supplies:   Vec<Supply>,
  pub promocodes: Vec<Promocode>,
  pub stores:     Vec<Store>,
}

impl Snapshot {
  pub fn len(&self, kind: ExtentKind) -> usize {
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

  pub fn is_empty(&self) -> bool { ExtentKind::ALL.into_iter().all(|k| self.len(k) == 0) }

  /// The members of one extent as a JSON array.
  pub fn extent_json(&self, kind: ExtentKind) -> Result<String> {
    let body = match kind {
      ExtentKind::Customer => serde_json::to_string(&self.customers),
      ExtentKind::Order => serde_json::to_string(&self.orders),
      ExtentKind::Refund => serde_json::to_string(&self.refunds),
      ExtentKind::Product => serde_json::to_string(&self.products),
      ExtentKind::Brand => serde_json::to_string(&self.brands),
      ExtentKind::Review => serde_json::to_string(&self.reviews),
      ExtentKind::Employee => serde_json::to_string(&self.employees),
      ExtentKind::Stock => serde_json::to_string(&self.stocks),
      ExtentKind::Supplier => serde_json::to_string(&self.suppliers),
      ExtentKind::Supply => serde_json::to_string(&self.supplies),
      ExtentKind::Promocode => serde_json::to_string(&self.promocodes),
      ExtentKind::Store => serde_json::to_string(&self.stores),
    }?;
    Ok(body)
  }

  /// Fill one extent from a JSON array produced by [`Snapshot::extent_json`].
  pub fn set_extent_json(&mut self, kind: ExtentKind, body: &str) -> Result<()> {
    match kind {
      ExtentKind::Customer => self.customers = serde_json::from_str(body)?,
      ExtentKind::Order => self.orders = serde_json::from_str(body)?,
      ExtentKind::Refund => self.refunds = serde_json::from_str(body)?,
      ExtentKind::Product => self.products = serde_json::from_str(body)?,
      ExtentKind::Brand => self.brands = serde_json::from_str(body)?,
      ExtentKind::Review => self.reviews = serde_json::from_str(body)?,
      ExtentKind::Employee => self.employees = serde_json::from_str(body)?,
      ExtentKind::Stock => self.stocks = serde_json::from_str(body)?,
      ExtentKind::Supplier => self.suppliers = serde_json::from_str(body)?,
      ExtentKind::Supply => self.supplies = serde_json::from_str(body)?,
      ExtentKind::Promocode => self.promocodes = serde_json::from_str(body)?,
      ExtentKind::Store => self.stores = serde_json::from_str(body)?,
    }
    Ok(())
  }

  pub fn to_json_pretty(&self) -> Result<String> { Ok(serde_json::to_string_pretty(self)?) }

  pub fn from_json(body: &str) -> Result<Self> { Ok(serde_json::from_str(body)?) }
}

impl Shop {
  pub fn export(&self) -> Snapshot {
    Snapshot {
      customers:  self.customers.export(),
      orders:     self.orders.export(),
      refunds:    self.refunds.export(),
      products:   self.products.export(),
      brands:     self.brands.export(),
      reviews:    self.reviews.export(),
      employees:  self.employees.export(),
      stocks:     self.stocks.export(),
      suppliers:  self.suppliers.export(),
      supplies:   self.supplies.export(),
      promocodes: self.promocodes.export(),
      stores:     self.stores.export(),
    }
  }

  /// Replace the whole graph with `snapshot`. The snapshot is loaded into a
  /// fresh shop and verified first; if it is inconsistent, or lists an
  /// identifier twice within one extent, the error is returned and this
  /// shop is left as it was.
  pub fn import(&mut self, snapshot: Snapshot) -> Result<()> {
    let mut staged = self.empty_like();
    let mut problems = Vec::new();
    repeated(&mut problems, staged.customers.import(snapshot.customers));
    repeated(&mut problems, staged.orders.import(snapshot.orders));
    repeated(&mut problems, staged.refunds.import(snapshot.refunds));
    repeated(&mut problems, staged.products.import(snapshot.products));
    repeated(&mut problems, staged.brands.import(snapshot.brands));
    repeated(&mut problems, staged.reviews.import(snapshot.reviews));
    repeated(&mut problems, staged.employees.import(snapshot.employees));
    repeated(&mut problems, staged.stocks.import(snapshot.stocks));
    repeated(&mut problems, staged.suppliers.import(snapshot.suppliers));
    repeated(&mut problems, staged.supplies.import(snapshot.supplies));
    repeated(&mut problems, staged.promocodes.import(snapshot.promocodes));
    repeated(&mut problems, staged.stores.import(snapshot.stores));
    if !problems.is_empty() {
      return Err(Error::Integrity(problems));
    }
    staged.rebuild_username_index();
    staged.verify()?;

    *self = staged;
    tracing::info!(
      customers = self.customers.len(),
      orders = self.orders.len(),
      products = self.products.len(),
      "snapshot imported"
    );
    Ok(())
  }

  /// File every order under its customer's username. Orders whose customer
  /// is missing or has no username are skipped and reported by
  /// [`Shop::verify`].
  fn rebuild_username_index(&mut self) {
    self.orders_by_username.clear();
    for order in self.orders.all() {
      let username = self.customers.get(order.customer).and_then(|c| c.username());
      if let Some(u) = username {
        // Usernames from the registry are never blank.
        let _ = self.orders_by_username.insert(u, order.id);
      }
    }
  }
}

fn repeated<I: Identifier>(problems: &mut Vec<String>, ids: Vec<I>) {
  for id in ids {
    problems.push(format!("{} {id} appears more than once", I::KIND));
  }
}
