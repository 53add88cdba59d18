//! Whole-graph consistency check.

use std::collections::HashSet;

use crate::{
  Error, Result,
  hierarchy,
  link::{
    self, OrderCustomer, RefundOrder, ReviewProduct, SneakerBrand, SupplyStock,
    SupplySupplier,
  },
  shop::Shop,
};

impl Shop {
  /// Check that every association agrees at both ends and that nothing
  /// refers to an entity that is gone. Returns [`Error::Integrity`] listing
  /// every problem found.
  pub fn verify(&self) -> Result<()> {
    let mut problems = Vec::new();

    link::check::<SneakerBrand>(&self.products, &self.brands, &mut problems);
    link::check::<RefundOrder>(&self.refunds, &self.orders, &mut problems);
    link::check::<OrderCustomer>(&self.orders, &self.customers, &mut problems);
    link::check::<ReviewProduct>(&self.reviews, &self.products, &mut problems);
    link::check::<SupplyStock>(&self.supplies, &self.stocks, &mut problems);
    link::check::<SupplySupplier>(&self.supplies, &self.suppliers, &mut problems);
    hierarchy::verify_forest(&self.employees, &mut problems);

    self.check_usernames(&mut problems);
    self.check_product_references(&mut problems);
    self.check_supply_chain(&mut problems);
    self.check_promocodes(&mut problems);

    if problems.is_empty() {
      Ok(())
    } else {
      Err(Error::Integrity(problems))
    }
  }

  fn check_usernames(&self, problems: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for c in self.customers.all() {
      if let Some(u) = c.username()
        && !seen.insert(u.to_lowercase())
      {
        problems.push(format!("username {u:?} is used more than once"));
      }
    }

    for order in self.orders.all() {
      let username = self.customers.get(order.customer).and_then(|c| c.username());
      match username {
        Some(u) if self.orders_by_username.contains(u, order.id) => {}
        Some(u) => problems.push(format!("order {} is not indexed under {u:?}", order.id)),
        None => {
          problems.push(format!("order {} belongs to a customer without a username", order.id))
        }
      }
    }
    if self.orders_by_username.len() != self.orders.len() {
      problems.push(format!(
        "username index holds {} orders but {} exist",
        self.orders_by_username.len(),
        self.orders.len()
      ));
    }
  }

  fn check_product_references(&self, problems: &mut Vec<String>) {
    for c in self.customers.all() {
      for p in c.cart.iter().chain(c.wishlist.iter()) {
        if !self.products.contains(*p) {
          problems.push(format!("customer {} refers to missing product {p}", c.id));
        }
      }
    }
    for product in self.products.all() {
      let Some(a) = product.as_accessory() else { continue };
      for p in a.compatibilities() {
        if !self.products.contains(p) {
          problems.push(format!(
            "accessory {} is compatible with missing product {p}",
            product.id
          ));
        }
      }
    }
  }

  fn check_supply_chain(&self, problems: &mut Vec<String>) {
    for stock in self.stocks.all() {
      let suppliers: HashSet<_> = stock
        .supplies()
        .filter_map(|s| self.supplies.get(s))
        .map(|s| s.supplier)
        .collect();
      let expected = suppliers.iter().next().copied();
      if suppliers.len() > 1 {
        problems.push(format!("stock {} is supplied by {} suppliers", stock.id, suppliers.len()));
      } else if stock.supplier != expected {
        problems.push(format!(
          "stock {} records supplier {:?} but its supplies come from {:?}",
          stock.id, stock.supplier, expected
        ));
      }
    }

    for e in self.employees.all() {
      let Some(c) = e.logistics() else { continue };
      for s in c.assigned_supplies() {
        if !self.supplies.contains(s) {
          problems.push(format!("coordinator {} is assigned missing supply {s}", e.id));
        }
      }
    }
  }

  fn check_promocodes(&self, problems: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for p in self.promocodes.all() {
      if p.code() != p.code().trim() {
        problems.push(format!("promo code {:?} has surrounding whitespace", p.code()));
      }
      if !seen.insert(p.code().trim().to_ascii_lowercase()) {
        problems.push(format!("promo code {:?} is used more than once", p.code()));
      }
    }
  }
}
