//! Entity types.
//!
//! Association fields are crate-private: they only change through the
//! operations on [`crate::Shop`], which keep both ends of every link in
//! step. Scalar fields have validating setters and can be edited freely.

pub mod customer;
pub mod order;
pub mod product;
pub mod promocode;
pub mod staff;
pub mod store;
pub mod supply;

use serde::{Deserialize, Serialize};

pub use customer::{Customer, NewCustomer};
pub use order::{AppliedDiscount, LineItem, Order, OrderStatus, Refund, RefundStatus};
pub use product::{
  Accessory, Brand, NewAccessory, NewBrand, NewReview, NewSneaker, Product,
  ProductKind, Review, Sneaker,
};
pub use promocode::{NewPromocode, Promocode};
pub use staff::{ContactNumber, Employee, LogisticsCoordinator, NewEmployee};
pub use store::{NewStore, Store};
pub use supply::{NewSupplier, Stock, Supplier, Supply};

/// The entity kinds that have their own registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtentKind {
  Customer,
  Order,
  Refund,
  Product,
  Brand,
  Review,
  Employee,
  Stock,
  Supplier,
  Supply,
  Promocode,
  Store,
}

impl ExtentKind {
  pub const ALL: [ExtentKind; 12] = [
    Self::Customer,
    Self::Order,
    Self::Refund,
    Self::Product,
    Self::Brand,
    Self::Review,
    Self::Employee,
    Self::Stock,
    Self::Supplier,
    Self::Supply,
    Self::Promocode,
    Self::Store,
  ];

  /// Stable name used as the persistence key.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Customer => "customer",
      Self::Order => "order",
      Self::Refund => "refund",
      Self::Product => "product",
      Self::Brand => "brand",
      Self::Review => "review",
      Self::Employee => "employee",
      Self::Stock => "stock",
      Self::Supplier => "supplier",
      Self::Supply => "supply",
      Self::Promocode => "promocode",
      Self::Store => "store",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|k| k.as_str() == s)
  }
}
