//! Core domain model for the Stride sneaker shop.
//!
//! Entities live in per-kind [`registry::Registry`] extents owned by a
//! [`Shop`]. Associations between them are stored as identifiers at both
//! ends and only change through `Shop` operations. Those operations keep
//! both ends in step and refuse anything that would break an invariant.
//!
//! This crate has no database or I/O dependencies. Persistence goes through
//! the [`store::ExtentStore`] trait.

pub mod clock;
pub mod error;
pub mod hierarchy;
pub mod id;
mod integrity;
mod lifecycle;
pub mod link;
pub mod model;
pub mod pricing;
pub mod qualified;
pub mod registry;
pub mod shop;
pub mod snapshot;
pub mod store;
pub mod validate;

pub use error::{Error, ErrorKind, Result, Violation};
pub use shop::{Shop, ShopSettings};
pub use snapshot::Snapshot;

#[cfg(test)]
mod proptests;
