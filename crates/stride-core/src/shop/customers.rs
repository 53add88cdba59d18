//! Customers, their carts, orders and refunds.

use crate::{
  Error, Result, Violation,
  id::{CustomerId, OrderId, ProductId, RefundId},
  link::{self, OrderCustomer, RefundOrder, Role},
  model::{
    Customer, LineItem, NewCustomer, Order, OrderStatus, Refund, RefundStatus,
  },
  pricing,
  validate,
};

use super::Shop;

impl Shop {
  /// Whether `username` is held by a customer other than `except`,
  /// ignoring case.
  fn username_taken(&self, username: &str, except: Option<CustomerId>) -> bool {
    let wanted = username.to_lowercase();
    self.customers.all().any(|c| {
      Some(c.id) != except && c.username().is_some_and(|u| u.to_lowercase() == wanted)
    })
  }

  // ── Customers ─────────────────────────────────────────────────────────

  pub fn create_customer(&mut self, input: NewCustomer) -> Result<CustomerId> {
    let customer = Customer::build(input)?;
    if let Some(username) = customer.username()
      && self.username_taken(username, None)
    {
      return Err(Violation::UsernameTaken(username.to_owned()).into());
    }
    let id = customer.id;
    self.customers.add(customer);
    tracing::debug!(customer = %id, "customer created");
    Ok(id)
  }

  /// Change a customer's username, moving their orders to the new key of
  /// the username index.
  pub fn rename_customer(&mut self, customer: CustomerId, username: &str) -> Result<()> {
    let username = validate::non_blank("username", username)?;
    let previous = self.customers.require(customer)?.username.clone();
    if self.username_taken(&username, Some(customer)) {
      return Err(Violation::UsernameTaken(username).into());
    }

    if let Some(previous) = &previous {
      self.orders_by_username.rename(previous, &username)?;
    }
    self.customers.require_mut(customer)?.username = Some(username.clone());

    tracing::info!(%customer, from = ?previous, to = %username, "customer renamed");
    Ok(())
  }

  // ── Cart and wishlist ─────────────────────────────────────────────────

  /// Put one unit of `product` in the cart. The same product may appear
  /// more than once.
  pub fn add_to_cart(&mut self, customer: CustomerId, product: ProductId) -> Result<()> {
    self.customers.require(customer)?;
    if !self.products.require(product)?.is_available() {
      return Err(Error::invalid("product", format!("{product} is not available")));
    }
    self.customers.require_mut(customer)?.cart.push(product);
    Ok(())
  }

  /// Take one unit of `product` out of the cart.
  pub fn remove_from_cart(&mut self, customer: CustomerId, product: ProductId) -> Result<()> {
    let c = self.customers.require_mut(customer)?;
    let Some(pos) = c.cart.iter().position(|p| *p == product) else {
      return Err(Error::not_associated(customer, product));
    };
    c.cart.remove(pos);
    Ok(())
  }

  /// Returns `false` if the product was already wished for.
  pub fn add_to_wishlist(&mut self, customer: CustomerId, product: ProductId) -> Result<bool> {
    self.customers.require(customer)?;
    self.products.require(product)?;
    Ok(self.customers.require_mut(customer)?.wishlist.insert(product))
  }

  pub fn remove_from_wishlist(&mut self, customer: CustomerId, product: ProductId) -> Result<()> {
    if !self.customers.require_mut(customer)?.wishlist.shift_remove(&product) {
      return Err(Error::not_associated(customer, product));
    }
    Ok(())
  }

  // ── Orders ────────────────────────────────────────────────────────────

  /// Turn the customer's cart into an order dated today, redeeming
  /// `promo_code` if it applies. The cart is emptied afterwards.
  ///
  /// Every product in the cart must still be available; otherwise nothing
  /// changes, the promo code included.
  pub fn place_order(&mut self, customer: CustomerId, promo_code: Option<&str>) -> Result<OrderId> {
    let today = self.clock.today();
    let Some(c) = self.customers.get(customer) else {
      return Err(link::missing_owner(customer));
    };
    let Some(username) = c.username.clone() else {
      return Err(Error::invalid("username", "customer has no username"));
    };
    if c.cart.is_empty() {
      return Err(Error::invalid("cart", "cannot order an empty cart"));
    }
    let items = c
      .cart
      .iter()
      .map(|&id| {
        let p = self.products.require(id)?;
        if !p.is_available() {
          return Err(Error::invalid("product", format!("{id} is no longer available")));
        }
        Ok(LineItem { product: id, name: p.name().to_owned(), unit_price: p.price() })
      })
      .collect::<Result<Vec<_>>>()?;

    let quote = pricing::compute_total(&items, promo_code, &mut self.promocodes, today);
    let order = Order::build(customer, items, quote.subtotal, quote.total, quote.discount, today);
    let id = order.id;

    self.orders.add(order);
    link::attach::<OrderCustomer>(&self.orders, &mut self.customers, id)?;
    self.orders_by_username.insert(&username, id)?;
    self.customers.require_mut(customer)?.cart.clear();

    tracing::info!(order = %id, %customer, total = %quote.total, "order placed");
    Ok(id)
  }

  /// Move an order to another customer, updating both order histories
  /// and the username index.
  pub fn reassign_order(&mut self, order: OrderId, customer: CustomerId) -> Result<()> {
    let current = self.orders.require(order)?.customer;
    let Some(target) = self.customers.get(customer) else {
      return Err(link::missing_owner(customer));
    };
    let Some(username) = target.username.clone() else {
      return Err(Error::invalid("username", "customer has no username"));
    };
    if current == customer {
      return Ok(());
    }
    let previous = self.customers.get(current).and_then(|c| c.username.clone());

    link::link::<OrderCustomer>(&mut self.orders, &mut self.customers, order, customer)?;
    if let Some(previous) = previous {
      self.orders_by_username.remove(&previous, order)?;
    }
    self.orders_by_username.insert(&username, order)?;

    tracing::info!(%order, from = %current, to = %customer, "order reassigned");
    Ok(())
  }

  pub fn set_order_status(&mut self, order: OrderId, status: OrderStatus) -> Result<()> {
    self.orders.require_mut(order)?.status = status;
    tracing::debug!(%order, ?status, "order status changed");
    Ok(())
  }

  pub fn set_payment_info(&mut self, order: OrderId, info: &str) -> Result<()> {
    self.orders.require_mut(order)?.set_payment_info(info)?;
    tracing::debug!(%order, "payment info recorded");
    Ok(())
  }

  /// Orders filed under `username`, ignoring case.
  pub fn lookup_orders(&self, username: &str) -> Result<Vec<OrderId>> {
    self.orders_by_username.lookup(username)
  }

  // ── Refunds ───────────────────────────────────────────────────────────

  /// Open a refund request against an existing order.
  pub fn create_refund(&mut self, order: OrderId, description: &str) -> Result<RefundId> {
    if !self.orders.contains(order) {
      return Err(link::missing_owner(order));
    }
    let refund = Refund::build(description, self.clock.today())?;
    let id = refund.id;
    self.refunds.add(refund);
    link::link::<RefundOrder>(&mut self.refunds, &mut self.orders, id, order)?;
    tracing::debug!(refund = %id, %order, "refund requested");
    Ok(id)
  }

  /// Approve a refund and mark its order refunded.
  pub fn approve_refund(&mut self, refund: RefundId) -> Result<()> {
    let Some(order) = self.refunds.require(refund)?.order else {
      return Err(Violation::RequiredRole(<RefundOrder as Role>::NAME).into());
    };
    if self.orders.require(order)?.status == OrderStatus::Cancelled {
      return Err(Violation::OrderCancelled(order).into());
    }
    self.refunds.require_mut(refund)?.status = RefundStatus::Approved;
    self.orders.require_mut(order)?.status = OrderStatus::Refunded;
    tracing::info!(%refund, %order, "refund approved");
    Ok(())
  }
}
