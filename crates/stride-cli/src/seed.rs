//! A small demo shop for trying the tool out.

use chrono::Days;
use rust_decimal::Decimal;
use stride_core::{
  Result, Shop, ShopSettings,
  model::{
    NewAccessory, NewBrand, NewCustomer, NewEmployee, NewPromocode, NewReview,
    NewSneaker, NewStore, NewSupplier,
  },
};

fn sneaker(name: &str, price: Decimal, collection: &str, size: u32) -> NewSneaker {
  NewSneaker {
    name: name.into(),
    price,
    category: "Lifestyle".into(),
    available: true,
    color: "White".into(),
    material: "Leather".into(),
    collection: collection.into(),
    size,
  }
}

/// Build a consistent shop with a few of everything, including one placed
/// order that used a promo code and has a refund request.
pub fn demo_shop(settings: ShopSettings) -> Result<Shop> {
  let mut shop = Shop::new(settings);
  let today = shop.clock().today();

  let nike = shop.create_brand(&NewBrand {
    name:              "Nike".into(),
    description:       "Just do it".into(),
    country_of_origin: "USA".into(),
  })?;
  let adidas = shop.create_brand(&NewBrand {
    name:              "Adidas".into(),
    description:       "Impossible is nothing".into(),
    country_of_origin: "Germany".into(),
  })?;

  let af1 = shop.create_sneaker(&sneaker("Air Force 1", Decimal::new(11999, 2), "Classic", 42))?;
  let samba = shop.create_sneaker(&sneaker("Samba OG", Decimal::new(9999, 2), "Originals", 41))?;
  shop.assign_brand(af1, nike)?;
  shop.assign_brand(samba, adidas)?;

  let cleaner = shop.create_accessory(&NewAccessory {
    name:           "Sneaker Cleaner".into(),
    price:          Decimal::new(1499, 2),
    category:       "Care".into(),
    available:      true,
    color:          "Clear".into(),
    material:       "Foam".into(),
    accessory_type: "Cleaning".into(),
  })?;
  shop.add_compatibility(cleaner, af1)?;
  shop.add_compatibility(cleaner, samba)?;

  shop.create_review(af1, &NewReview {
    rating:  5,
    header:  "Timeless".into(),
    comment: "Goes with everything.".into(),
  })?;

  shop.create_promocode(&NewPromocode {
    code:             "WELCOME10".into(),
    number_of_uses:   100,
    discount_percent: Decimal::from(10),
    start_date:       today,
    end_date:         today + Days::new(30),
  })?;

  let alice = shop.create_customer(NewCustomer::new("alice", "Alice Smith", "alice@example.com"))?;
  shop.create_customer(NewCustomer::new("bob", "Bob Jones", "bob@example.com"))?;
  shop.add_to_cart(alice, af1)?;
  shop.add_to_cart(alice, cleaner)?;
  shop.add_to_wishlist(alice, samba)?;
  let order = shop.place_order(alice, Some("WELCOME10"))?;
  shop.set_payment_info(order, "card ending 4242")?;
  shop.create_refund(order, "Wrong size")?;

  let manager = shop.create_employee(NewEmployee::new("Dana", "Reyes", "Store manager", today))?;
  let coordinator = shop.create_employee(NewEmployee {
    coordinator: true,
    clearance_level: 2,
    ..NewEmployee::new("Sam", "Okafor", "Logistics coordinator", today)
  })?;
  shop.assign_supervisor(coordinator, manager)?;

  let stock = shop.create_stock(120);
  let supplier = shop.create_supplier(&NewSupplier {
    name:     "Northwind Footwear".into(),
    location: "Rotterdam".into(),
  })?;
  let supply = shop.create_supply(stock, supplier, today)?;
  shop.assign_supply(coordinator, supply)?;

  shop.create_store(&NewStore {
    name:    "Stride Flagship".into(),
    address: "12 Market Street".into(),
  })?;

  Ok(shop)
}
