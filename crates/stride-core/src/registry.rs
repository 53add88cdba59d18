//! Per-kind extents.
//!
//! A [`Registry`] is the authoritative set of live instances of one entity
//! kind. It keeps insertion order and never holds two entities with the same
//! identifier. It knows nothing about associations: severing the links of
//! removed entities is the job of [`crate::lifecycle`].

use indexmap::IndexMap;

use crate::{Error, Result, id::Identifier};

/// Anything that can live in a [`Registry`].
pub trait Entity {
  type Id: Identifier;

  fn id(&self) -> Self::Id;
}

#[derive(Debug, Clone)]
pub struct Registry<T: Entity> {
  items: IndexMap<T::Id, T>,
}

impl<T: Entity> Default for Registry<T> {
  fn default() -> Self { Self { items: IndexMap::new() } }
}

impl<T: Entity> Registry<T> {
  pub fn new() -> Self { Self::default() }

  /// Register `entity`. Returns `false` and leaves the registry untouched if
  /// an entity with the same identifier is already present.
  pub fn add(&mut self, entity: T) -> bool {
    let id = entity.id();
    if self.items.contains_key(&id) {
      return false;
    }
    self.items.insert(id, entity);
    true
  }

  /// Remove an entity, preserving the order of the rest. Removing a
  /// non-member is a no-op.
  pub fn remove(&mut self, id: T::Id) -> Option<T> { self.items.shift_remove(&id) }

  /// Drain every member in insertion order.
  pub fn clear(&mut self) -> Vec<T> { self.items.drain(..).map(|(_, v)| v).collect() }

  pub fn all(&self) -> impl Iterator<Item = &T> + '_ { self.items.values() }

  pub fn ids(&self) -> Vec<T::Id> { self.items.keys().copied().collect() }

  pub fn get(&self, id: T::Id) -> Option<&T> { self.items.get(&id) }

  pub fn get_mut(&mut self, id: T::Id) -> Option<&mut T> { self.items.get_mut(&id) }

  /// Like [`Registry::get`], but absence is an [`Error::NotFound`].
  pub fn require(&self, id: T::Id) -> Result<&T> {
    self.items.get(&id).ok_or_else(|| Error::not_found(id))
  }

  pub fn require_mut(&mut self, id: T::Id) -> Result<&mut T> {
    self.items.get_mut(&id).ok_or_else(|| Error::not_found(id))
  }

  pub fn contains(&self, id: T::Id) -> bool { self.items.contains_key(&id) }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl<T: Entity + Clone> Registry<T> {
  /// Copy out the current member set for serialization.
  pub fn export(&self) -> Vec<T> { self.items.values().cloned().collect() }

  /// Replace the member set. The registry is cleared first so stale and
  /// fresh members never mix. Only the first member with a given identifier
  /// is kept; the identifiers of the dropped repeats are returned.
  pub fn import(&mut self, members: impl IntoIterator<Item = T>) -> Vec<T::Id> {
    self.items.clear();
    let mut repeated = Vec::new();
    for member in members {
      let id = member.id();
      if !self.add(member) {
        repeated.push(id);
      }
    }
    repeated
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::id::BrandId;

  #[derive(Debug, Clone, PartialEq)]
  struct Tag {
    id:    BrandId,
    label: &'static str,
  }

  impl Entity for Tag {
    type Id = BrandId;

    fn id(&self) -> BrandId { self.id }
  }

  fn tag(label: &'static str) -> Tag { Tag { id: BrandId::new(), label } }

  #[test]
  fn add_is_idempotent() {
    let mut reg = Registry::new();
    let a = tag("a");
    assert!(reg.add(a.clone()));
    assert!(!reg.add(Tag { label: "other", ..a.clone() }));
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.get(a.id).unwrap().label, "a");
  }

  #[test]
  fn removal_preserves_order() {
    let mut reg = Registry::new();
    let (a, b, c) = (tag("a"), tag("b"), tag("c"));
    reg.add(a.clone());
    reg.add(b.clone());
    reg.add(c.clone());

    assert!(reg.remove(b.id).is_some());
    assert!(reg.remove(b.id).is_none());

    let labels: Vec<_> = reg.all().map(|t| t.label).collect();
    assert_eq!(labels, ["a", "c"]);
  }

  #[test]
  fn require_reports_missing_members() {
    let reg: Registry<Tag> = Registry::new();
    let err = reg.require(BrandId::new()).unwrap_err();
    assert!(matches!(err, Error::NotFound { kind: "brand", .. }));
  }

  #[test]
  fn import_replaces_previous_members() {
    let mut reg = Registry::new();
    reg.add(tag("stale"));

    let fresh = tag("fresh");
    let repeated = reg.import([fresh.clone(), Tag { label: "again", ..fresh.clone() }]);

    assert_eq!(repeated, vec![fresh.id]);
    assert_eq!(reg.export(), vec![fresh]);
  }
}
