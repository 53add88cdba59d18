//! Error types for `stride-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::id::{
  BrandId, CustomerId, EmployeeId, Identifier, OrderId, StockId, SupplierId,
};

/// A mutation that would break an association invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
  #[error("an employee cannot supervise themselves")]
  SelfSupervision,

  #[error("making {supervisor} the supervisor of {employee} would close a cycle")]
  SupervisionCycle {
    employee:   EmployeeId,
    supervisor: EmployeeId,
  },

  #[error("brand {0} still has linked sneakers")]
  BrandNotEmpty(BrandId),

  #[error("customer {0} still has orders")]
  CustomerHasOrders(CustomerId),

  #[error("{kind} {id} does not exist")]
  MissingOwner { kind: &'static str, id: Uuid },

  #[error("the {0} role is required and can only be severed by deletion")]
  RequiredRole(&'static str),

  #[error("the {role} role does not accept {id}")]
  RoleMismatch { role: &'static str, id: Uuid },

  #[error("stock {stock} is already supplied by {current}")]
  SupplierConflict { stock: StockId, current: SupplierId },

  #[error("username {0:?} is already taken")]
  UsernameTaken(String),

  #[error("promo code {0:?} already exists")]
  DuplicateCode(String),

  #[error("employee {0} is not a logistics coordinator")]
  NotCoordinator(EmployeeId),

  #[error("order {0} has been cancelled")]
  OrderCancelled(OrderId),
}

#[derive(Debug, Error)]
pub enum Error {
  /// A required argument was empty, out of range or badly ordered.
  #[error("invalid {field}: {reason}")]
  Invalid { field: &'static str, reason: String },

  #[error("operation not permitted: {0}")]
  NotPermitted(#[from] Violation),

  #[error("{kind} not found: {id}")]
  NotFound { kind: &'static str, id: Uuid },

  #[error("{child_kind} {child} is not associated with {parent_kind} {parent}")]
  NotAssociated {
    parent_kind: &'static str,
    parent:      Uuid,
    child_kind:  &'static str,
    child:       Uuid,
  },

  #[error("integrity check failed: {}", .0.join("; "))]
  Integrity(Vec<String>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Precondition,
  Invariant,
  NotFound,
  Internal,
}

impl Error {
  pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Invalid { field, reason: reason.into() }
  }

  pub fn not_found<I: Identifier>(id: I) -> Self {
    Self::NotFound { kind: I::KIND, id: id.as_uuid() }
  }

  pub fn not_associated<P: Identifier, C: Identifier>(parent: P, child: C) -> Self {
    Self::NotAssociated {
      parent_kind: P::KIND,
      parent:      parent.as_uuid(),
      child_kind:  C::KIND,
      child:       child.as_uuid(),
    }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Invalid { .. } => ErrorKind::Precondition,
      Self::NotPermitted(_) => ErrorKind::Invariant,
      Self::NotFound { .. } | Self::NotAssociated { .. } => ErrorKind::NotFound,
      Self::Integrity(_) | Self::Serialization(_) => ErrorKind::Internal,
    }
  }

  /// The violated invariant, if this is a [`Error::NotPermitted`].
  pub fn violation(&self) -> Option<&Violation> {
    match self {
      Self::NotPermitted(v) => Some(v),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
