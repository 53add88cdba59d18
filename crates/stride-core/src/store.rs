//! The `ExtentStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `stride-store-sqlite`).
//! The in-memory [`crate::Shop`] stays authoritative; a store only persists
//! and restores whole snapshots of it.

use std::future::Future;

use crate::snapshot::Snapshot;

/// Abstraction over a persistence backend for shop snapshots.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait ExtentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Replace everything stored with `snapshot`, atomically.
  fn save(&self, snapshot: Snapshot) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Read back the last saved snapshot. Returns `None` if nothing has been
  /// saved yet.
  fn load(&self) -> impl Future<Output = Result<Option<Snapshot>, Self::Error>> + Send + '_;
}
