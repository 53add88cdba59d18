use chrono::NaiveDate;
use indexmap::IndexSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
  Result,
  id::{CustomerId, OrderId, ProductId, RefundId},
  registry::Entity,
  validate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  #[default]
  Pending,
  Processing,
  Shipped,
  Delivered,
  Cancelled,
  Refunded,
}

/// A product as it was when the order was placed. Later edits or deletion
/// of the product do not touch it; `product` is kept for reference only and
/// may no longer resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
  pub product:    ProductId,
  pub name:       String,
  pub unit_price: Decimal,
}

/// The promo code that discounted an order, copied at redemption time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
  pub code:    String,
  pub percent: Decimal,
}

pub const MAX_PAYMENT_INFO_CHARS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub(crate) id:        OrderId,
  pub(crate) customer:  CustomerId,
  products:             Vec<LineItem>,
  subtotal:             Decimal,
  total:                Decimal,
  discount:             Option<AppliedDiscount>,
  order_date:           NaiveDate,
  /// Free-form payment reference, e.g. "card ending 4242".
  #[serde(default)]
  payment_info:         Option<String>,
  pub(crate) status:    OrderStatus,
  pub(crate) refunds:   IndexSet<RefundId>,
}

impl Order {
  pub(crate) fn build(
    customer: CustomerId,
    products: Vec<LineItem>,
    subtotal: Decimal,
    total: Decimal,
    discount: Option<AppliedDiscount>,
    order_date: NaiveDate,
  ) -> Self {
    Self {
      id: OrderId::new(),
      customer,
      products,
      subtotal,
      total,
      discount,
      order_date,
      payment_info: None,
      status: OrderStatus::default(),
      refunds: IndexSet::new(),
    }
  }

  pub fn customer(&self) -> CustomerId { self.customer }

  pub fn products(&self) -> &[LineItem] { &self.products }

  /// Sum of the captured line items before any discount.
  pub fn subtotal(&self) -> Decimal { self.subtotal }

  pub fn total(&self) -> Decimal { self.total }

  /// The promo code that discounted this order, if one applied.
  pub fn discount(&self) -> Option<&AppliedDiscount> { self.discount.as_ref() }

  pub fn order_date(&self) -> NaiveDate { self.order_date }

  pub fn payment_info(&self) -> Option<&str> { self.payment_info.as_deref() }

  pub fn status(&self) -> OrderStatus { self.status }

  pub fn refunds(&self) -> impl Iterator<Item = RefundId> + '_ {
    self.refunds.iter().copied()
  }

  pub fn set_payment_info(&mut self, info: &str) -> Result<()> {
    self.payment_info = Some(validate::bounded("payment_info", info, MAX_PAYMENT_INFO_CHARS)?);
    Ok(())
  }
}

impl Entity for Order {
  type Id = OrderId;

  fn id(&self) -> OrderId { self.id }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefundStatus {
  #[default]
  Requested,
  Approved,
}

/// A refund request. Owned by exactly one order while live; once the order
/// goes away the refund is detached and dropped from its registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Refund {
  pub(crate) id:     RefundId,
  pub(crate) order:  Option<OrderId>,
  description:       String,
  pub(crate) status: RefundStatus,
  requested_on:      NaiveDate,
}

impl Refund {
  pub(crate) fn build(description: &str, requested_on: NaiveDate) -> Result<Self> {
    Ok(Self {
      id: RefundId::new(),
      order: None,
      description: validate::non_blank("description", description)?,
      status: RefundStatus::default(),
      requested_on,
    })
  }

  /// `None` once the refund has been detached from its order.
  pub fn order(&self) -> Option<OrderId> { self.order }

  pub fn is_detached(&self) -> bool { self.order.is_none() }

  pub fn description(&self) -> &str { &self.description }

  pub fn status(&self) -> RefundStatus { self.status }

  pub fn requested_on(&self) -> NaiveDate { self.requested_on }

  pub fn set_description(&mut self, description: &str) -> Result<()> {
    self.description = validate::non_blank("description", description)?;
    Ok(())
  }
}

impl Entity for Refund {
  type Id = RefundId;

  fn id(&self) -> RefundId { self.id }
}
