//! Integration tests for `SqliteStore` against an in-memory database.

use rust_decimal::Decimal;
use stride_core::{
  Shop,
  model::{ExtentKind, NewBrand, NewCustomer, NewSneaker, NewStore},
  store::ExtentStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// A shop with one customer who has ordered one branded sneaker, and one
/// store.
fn populated() -> Shop {
  let mut shop = Shop::default();
  let alice = shop
    .create_customer(NewCustomer::new("alice", "Alice Smith", "alice@example.com"))
    .unwrap();
  let shoe = shop
    .create_sneaker(&NewSneaker {
      name:       "Pegasus".into(),
      price:      Decimal::new(11999, 2),
      category:   "Running".into(),
      available:  true,
      color:      "Black".into(),
      material:   "Mesh".into(),
      collection: "Core".into(),
      size:       42,
    })
    .unwrap();
  let brand = shop.create_brand(&NewBrand::named("Nike")).unwrap();
  shop.assign_brand(shoe, brand).unwrap();
  shop.add_to_cart(alice, shoe).unwrap();
  shop.place_order(alice, None).unwrap();
  shop
    .create_store(&NewStore { name: "Flagship".into(), address: "1 Main St".into() })
    .unwrap();
  shop
}

#[tokio::test]
async fn empty_store_loads_nothing() {
  let s = store().await;
  assert!(s.load().await.unwrap().is_none());
  assert!(s.last_saved().await.unwrap().is_none());
}

#[tokio::test]
async fn save_and_load_roundtrip() {
  let s = store().await;
  let shop = populated();

  s.save(shop.export()).await.unwrap();
  let loaded = s.load().await.unwrap().expect("saved snapshot");

  for kind in ExtentKind::ALL {
    assert_eq!(loaded.len(kind), shop.extent_len(kind), "{kind:?}");
  }
  assert_eq!(loaded.orders[0].total(), Decimal::new(11999, 2));
  assert_eq!(loaded.stores[0].name(), "Flagship");

  let mut restored = Shop::default();
  restored.import(loaded).unwrap();
  assert_eq!(restored.lookup_orders("ALICE").unwrap().len(), 1);
  assert!(s.last_saved().await.unwrap().is_some());
}

#[tokio::test]
async fn save_replaces_previous_snapshot() {
  let s = store().await;
  s.save(populated().export()).await.unwrap();

  let mut shop = Shop::default();
  shop
    .create_customer(NewCustomer::new("bob", "Bob", "bob@example.com"))
    .unwrap();
  s.save(shop.export()).await.unwrap();

  let loaded = s.load().await.unwrap().unwrap();
  assert_eq!(loaded.customers.len(), 1);
  assert_eq!(loaded.customers[0].username(), Some("bob"));
  assert!(loaded.orders.is_empty());
  assert!(loaded.products.is_empty());
}
