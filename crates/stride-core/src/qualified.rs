//! The customer–order association, qualified by username.
//!
//! Keys are compared case-insensitively. Each bucket keeps its orders in
//! the order they were inserted, and an emptied bucket is dropped so the
//! key disappears from [`QualifiedIndex::keys`].

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::{Error, Result, id::OrderId};

#[derive(Debug, Clone, Default)]
pub struct QualifiedIndex {
  buckets: HashMap<String, IndexSet<OrderId>>,
}

/// Normalise a username into an index key.
fn key(username: &str) -> Result<String> {
  if username.trim().is_empty() {
    return Err(Error::invalid("username", "cannot be empty"));
  }
  Ok(username.to_lowercase())
}

impl QualifiedIndex {
  pub fn new() -> Self { Self::default() }

  /// File `order` under `username`. Inserting an already-filed order is a
  /// no-op.
  pub fn insert(&mut self, username: &str, order: OrderId) -> Result<()> {
    self.buckets.entry(key(username)?).or_default().insert(order);
    Ok(())
  }

  /// Remove `order` from `username`'s bucket. Returns whether it was there.
  pub fn remove(&mut self, username: &str, order: OrderId) -> Result<bool> {
    let k = key(username)?;
    let Some(bucket) = self.buckets.get_mut(&k) else {
      return Ok(false);
    };
    let removed = bucket.shift_remove(&order);
    if bucket.is_empty() {
      self.buckets.remove(&k);
    }
    Ok(removed)
  }

  /// Move every order filed under `old` to `new`, keeping their order.
  /// Renaming a key that holds nothing is a no-op.
  pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
    let (old, new) = (key(old)?, key(new)?);
    if old == new {
      return Ok(());
    }
    if let Some(moved) = self.buckets.remove(&old) {
      self.buckets.entry(new).or_default().extend(moved);
    }
    Ok(())
  }

  /// Orders filed under `username`. Unknown keys yield an empty list.
  pub fn lookup(&self, username: &str) -> Result<Vec<OrderId>> {
    Ok(
      self
        .buckets
        .get(&key(username)?)
        .map(|b| b.iter().copied().collect())
        .unwrap_or_default(),
    )
  }

  pub fn contains(&self, username: &str, order: OrderId) -> bool {
    key(username)
      .ok()
      .and_then(|k| self.buckets.get(&k))
      .is_some_and(|b| b.contains(&order))
  }

  /// Normalised keys that currently hold at least one order.
  pub fn keys(&self) -> impl Iterator<Item = &str> + '_ { self.buckets.keys().map(String::as_str) }

  /// Total number of filed orders across all keys.
  pub fn len(&self) -> usize { self.buckets.values().map(IndexSet::len).sum() }

  pub fn is_empty(&self) -> bool { self.buckets.is_empty() }

  pub fn clear(&mut self) { self.buckets.clear(); }
}
