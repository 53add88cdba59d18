//! Typed identifiers for every entity kind.
//!
//! Associations store identifiers, never the entities themselves, so a
//! back-reference is always a lookup into the owning registry.

use std::{fmt, hash::Hash};

use uuid::Uuid;

/// Common surface of every identifier newtype.
pub trait Identifier:
  Copy + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static
{
  /// Human-readable entity kind, used in error messages.
  const KIND: &'static str;

  fn as_uuid(&self) -> Uuid;
}

macro_rules! define_id {
  ($name:ident, $kind:literal) => {
    #[derive(
      Debug,
      Clone,
      Copy,
      PartialEq,
      Eq,
      Hash,
      PartialOrd,
      Ord,
      ::serde::Serialize,
      ::serde::Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(Uuid);

    impl $name {
      /// Allocate a fresh random identifier.
      pub fn new() -> Self { Self(Uuid::new_v4()) }

      pub const fn from_uuid(id: Uuid) -> Self { Self(id) }
    }

    impl Default for $name {
      fn default() -> Self { Self::new() }
    }

    impl Identifier for $name {
      const KIND: &'static str = $kind;

      fn as_uuid(&self) -> Uuid { self.0 }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
      }
    }
  };
}

define_id!(CustomerId, "customer");
define_id!(OrderId, "order");
define_id!(RefundId, "refund");
define_id!(ProductId, "product");
define_id!(BrandId, "brand");
define_id!(ReviewId, "review");
define_id!(EmployeeId, "employee");
define_id!(StockId, "stock");
define_id!(SupplierId, "supplier");
define_id!(SupplyId, "supply");
define_id!(PromocodeId, "promocode");
define_id!(StoreId, "store");
