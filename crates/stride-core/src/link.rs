//! The bidirectional link primitive.
//!
//! A [`Role`] describes one association: an owner entity with a forward
//! slot and a target entity whose back-collection lists every owner that
//! points at it. [`link`] and [`unlink`] update both ends as one step.
//! Every check runs before the first write, so a rejected call leaves both
//! registries exactly as they were.

use indexmap::IndexSet;

use crate::{
  Error, Result, Violation,
  id::{
    BrandId, CustomerId, Identifier, OrderId, ProductId, RefundId, ReviewId,
    StockId, SupplierId, SupplyId,
  },
  model::{Brand, Customer, Order, Product, Refund, Review, Stock, Supplier, Supply},
  registry::{Entity, Registry},
};

pub type OwnerId<R> = <<R as Role>::Owner as Entity>::Id;
pub type TargetId<R> = <<R as Role>::Target as Entity>::Id;

/// One side-by-side association between two registries.
pub trait Role {
  type Owner: Entity;
  type Target: Entity;

  /// Short name used in errors and logs.
  const NAME: &'static str;

  /// Required roles can only be severed by destroying the owner.
  const REQUIRED: bool;

  fn target(owner: &Self::Owner) -> Option<<Self::Target as Entity>::Id>;

  fn retarget(owner: &mut Self::Owner, target: <Self::Target as Entity>::Id);

  /// Clear the forward slot. Required roles whose slot is not optional
  /// leave it as is: their owner is dropped right after being severed.
  fn detach(owner: &mut Self::Owner);

  fn back(target: &Self::Target) -> &IndexSet<<Self::Owner as Entity>::Id>;

  fn back_mut(target: &mut Self::Target) -> &mut IndexSet<<Self::Owner as Entity>::Id>;

  /// Whether this particular owner can take part in the role at all.
  fn accepts(_owner: &Self::Owner) -> bool { true }
}

/// Outcome of a successful [`link`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linked<T> {
  /// The owner already pointed at the requested target.
  Unchanged,
  /// The owner now points at the target; `previous` was detached first.
  Moved { previous: Option<T> },
}

/// Point `owner`'s forward slot at `target` and record `owner` in
/// `target`'s back-collection, detaching it from any previous target.
pub fn link<R: Role>(
  owners: &mut Registry<R::Owner>,
  targets: &mut Registry<R::Target>,
  owner: OwnerId<R>,
  target: TargetId<R>,
) -> Result<Linked<TargetId<R>>> {
  let current = {
    let o = owners.require(owner)?;
    if !R::accepts(o) {
      return Err(
        Violation::RoleMismatch { role: R::NAME, id: owner.as_uuid() }.into(),
      );
    }
    R::target(o)
  };
  targets.require(target)?;

  if current == Some(target) {
    return Ok(Linked::Unchanged);
  }

  if let Some(previous) = current
    && let Some(prev) = targets.get_mut(previous)
  {
    R::back_mut(prev).shift_remove(&owner);
  }
  if let Some(o) = owners.get_mut(owner) {
    R::retarget(o, target);
  }
  if let Some(t) = targets.get_mut(target) {
    R::back_mut(t).insert(owner);
  }

  tracing::debug!(role = R::NAME, %owner, %target, "linked");
  Ok(Linked::Moved { previous: current })
}

/// Remove `owner`'s link, returning the target it pointed at. Rejected for
/// required roles.
pub fn unlink<R: Role>(
  owners: &mut Registry<R::Owner>,
  targets: &mut Registry<R::Target>,
  owner: OwnerId<R>,
) -> Result<Option<TargetId<R>>> {
  if R::REQUIRED {
    owners.require(owner)?;
    return Err(Violation::RequiredRole(R::NAME).into());
  }
  sever::<R>(owners, targets, owner)
}

/// Record a freshly added owner in the back-collection of the target its
/// forward slot was built with. Owners without a target are left alone.
pub(crate) fn attach<R: Role>(
  owners: &Registry<R::Owner>,
  targets: &mut Registry<R::Target>,
  owner: OwnerId<R>,
) -> Result<()> {
  let Some(target) = R::target(owners.require(owner)?) else {
    return Ok(());
  };
  R::back_mut(targets.require_mut(target)?).insert(owner);
  Ok(())
}

/// [`unlink`] without the required-role guard, for lifecycle cascades.
pub(crate) fn sever<R: Role>(
  owners: &mut Registry<R::Owner>,
  targets: &mut Registry<R::Target>,
  owner: OwnerId<R>,
) -> Result<Option<TargetId<R>>> {
  let o = owners.require_mut(owner)?;
  let previous = R::target(o);
  R::detach(o);

  if let Some(t) = previous.and_then(|p| targets.get_mut(p)) {
    R::back_mut(t).shift_remove(&owner);
  }
  if let Some(previous) = previous {
    tracing::debug!(role = R::NAME, %owner, target = %previous, "unlinked");
  }
  Ok(previous)
}

/// Report every place where the two ends of `R` disagree.
pub(crate) fn check<R: Role>(
  owners: &Registry<R::Owner>,
  targets: &Registry<R::Target>,
  problems: &mut Vec<String>,
) {
  for owner in owners.all() {
    match R::target(owner) {
      None if R::REQUIRED => problems.push(format!(
        "{}: {} {} has no target",
        R::NAME,
        <OwnerId<R> as Identifier>::KIND,
        owner.id()
      )),
      None => {}
      Some(t) => match targets.get(t) {
        None => problems.push(format!(
          "{}: {} {} points at missing {} {t}",
          R::NAME,
          <OwnerId<R> as Identifier>::KIND,
          owner.id(),
          <TargetId<R> as Identifier>::KIND,
        )),
        Some(target) if !R::back(target).contains(&owner.id()) => {
          problems.push(format!(
            "{}: {} {t} does not list {} {}",
            R::NAME,
            <TargetId<R> as Identifier>::KIND,
            <OwnerId<R> as Identifier>::KIND,
            owner.id()
          ))
        }
        Some(_) => {}
      },
    }
  }

  for target in targets.all() {
    for &back in R::back(target) {
      let points_here = owners
        .get(back)
        .and_then(R::target)
        .is_some_and(|t| t == target.id());
      if !points_here {
        problems.push(format!(
          "{}: {} {} lists {} {back} which does not point back",
          R::NAME,
          <TargetId<R> as Identifier>::KIND,
          target.id(),
          <OwnerId<R> as Identifier>::KIND,
        ));
      }
    }
  }
}

/// Not-found on the owner side is reported by the caller as a missing
/// owner instead of a plain lookup miss.
pub(crate) fn missing_owner<I: Identifier>(id: I) -> Error {
  Violation::MissingOwner { kind: I::KIND, id: id.as_uuid() }.into()
}

// ─── Roles ───────────────────────────────────────────────────────────────────

/// Sneaker → Brand. Aggregation; only sneakers carry a brand.
pub struct SneakerBrand;

impl Role for SneakerBrand {
  type Owner = Product;
  type Target = Brand;

  const NAME: &'static str = "sneaker_brand";
  const REQUIRED: bool = false;

  fn target(owner: &Product) -> Option<BrandId> {
    owner.as_sneaker().and_then(|s| s.brand)
  }

  fn retarget(owner: &mut Product, target: BrandId) {
    if let Some(s) = owner.as_sneaker_mut() {
      s.brand = Some(target);
    }
  }

  fn detach(owner: &mut Product) {
    if let Some(s) = owner.as_sneaker_mut() {
      s.brand = None;
    }
  }

  fn back(target: &Brand) -> &IndexSet<ProductId> { &target.sneakers }

  fn back_mut(target: &mut Brand) -> &mut IndexSet<ProductId> { &mut target.sneakers }

  fn accepts(owner: &Product) -> bool { owner.as_sneaker().is_some() }
}

/// Refund → Order. Composition; detaching unsets the refund's order.
pub struct RefundOrder;

impl Role for RefundOrder {
  type Owner = Refund;
  type Target = Order;

  const NAME: &'static str = "refund_order";
  const REQUIRED: bool = true;

  fn target(owner: &Refund) -> Option<OrderId> { owner.order }

  fn retarget(owner: &mut Refund, target: OrderId) { owner.order = Some(target); }

  fn detach(owner: &mut Refund) { owner.order = None; }

  fn back(target: &Order) -> &IndexSet<RefundId> { &target.refunds }

  fn back_mut(target: &mut Order) -> &mut IndexSet<RefundId> { &mut target.refunds }
}

/// Order → Customer, mirrored by the customer's order history.
pub struct OrderCustomer;

impl Role for OrderCustomer {
  type Owner = Order;
  type Target = Customer;

  const NAME: &'static str = "order_customer";
  const REQUIRED: bool = true;

  fn target(owner: &Order) -> Option<CustomerId> { Some(owner.customer) }

  fn retarget(owner: &mut Order, target: CustomerId) { owner.customer = target; }

  fn detach(_owner: &mut Order) {}

  fn back(target: &Customer) -> &IndexSet<OrderId> { &target.order_history }

  fn back_mut(target: &mut Customer) -> &mut IndexSet<OrderId> {
    &mut target.order_history
  }
}

/// Review → Product. Composition.
pub struct ReviewProduct;

impl Role for ReviewProduct {
  type Owner = Review;
  type Target = Product;

  const NAME: &'static str = "review_product";
  const REQUIRED: bool = true;

  fn target(owner: &Review) -> Option<ProductId> { Some(owner.product) }

  fn retarget(owner: &mut Review, target: ProductId) { owner.product = target; }

  fn detach(_owner: &mut Review) {}

  fn back(target: &Product) -> &IndexSet<ReviewId> { &target.reviews }

  fn back_mut(target: &mut Product) -> &mut IndexSet<ReviewId> { &mut target.reviews }
}

/// Supply → Stock.
pub struct SupplyStock;

impl Role for SupplyStock {
  type Owner = Supply;
  type Target = Stock;

  const NAME: &'static str = "supply_stock";
  const REQUIRED: bool = true;

  fn target(owner: &Supply) -> Option<StockId> { Some(owner.stock) }

  fn retarget(owner: &mut Supply, target: StockId) { owner.stock = target; }

  fn detach(_owner: &mut Supply) {}

  fn back(target: &Stock) -> &IndexSet<SupplyId> { &target.supplies }

  fn back_mut(target: &mut Stock) -> &mut IndexSet<SupplyId> { &mut target.supplies }
}

/// Supply → Supplier.
pub struct SupplySupplier;

impl Role for SupplySupplier {
  type Owner = Supply;
  type Target = Supplier;

  const NAME: &'static str = "supply_supplier";
  const REQUIRED: bool = true;

  fn target(owner: &Supply) -> Option<SupplierId> { Some(owner.supplier) }

  fn retarget(owner: &mut Supply, target: SupplierId) { owner.supplier = target; }

  fn detach(_owner: &mut Supply) {}

  fn back(target: &Supplier) -> &IndexSet<SupplyId> { &target.supplies }

  fn back_mut(target: &mut Supplier) -> &mut IndexSet<SupplyId> { &mut target.supplies }
}

#[cfg(test)]
mod tests {
  use rust_decimal::Decimal;

  use super::*;
  use crate::model::{NewAccessory, NewBrand, NewSneaker};

  fn sneaker() -> Product {
    Product::sneaker(&NewSneaker {
      name:       "Air Force 1".into(),
      price:      Decimal::from(120),
      category:   "Lifestyle".into(),
      available:  true,
      color:      "White".into(),
      material:   "Leather".into(),
      collection: "Classic".into(),
      size:       42,
    })
    .unwrap()
  }

  fn accessory() -> Product {
    Product::accessory(&NewAccessory {
      name:           "Shoe Cleaner".into(),
      price:          Decimal::from(15),
      category:       "Care".into(),
      available:      true,
      color:          "Clear".into(),
      material:       "Chemical".into(),
      accessory_type: "Cleaning".into(),
    })
    .unwrap()
  }

  fn setup() -> (Registry<Product>, Registry<Brand>) {
    (Registry::new(), Registry::new())
  }

  #[test]
  fn linking_twice_is_a_no_op() {
    let (mut products, mut brands) = setup();
    let s = sneaker();
    let b = Brand::build(&NewBrand::named("Nike")).unwrap();
    let (sid, bid) = (s.id(), b.id());
    products.add(s);
    brands.add(b);

    let first = link::<SneakerBrand>(&mut products, &mut brands, sid, bid).unwrap();
    let second = link::<SneakerBrand>(&mut products, &mut brands, sid, bid).unwrap();

    assert_eq!(first, Linked::Moved { previous: None });
    assert_eq!(second, Linked::Unchanged);
    assert_eq!(brands.get(bid).unwrap().sneakers().count(), 1);
  }

  #[test]
  fn relinking_moves_the_back_reference() {
    let (mut products, mut brands) = setup();
    let s = sneaker();
    let x = Brand::build(&NewBrand::named("X")).unwrap();
    let y = Brand::build(&NewBrand::named("Y")).unwrap();
    let (sid, xid, yid) = (s.id(), x.id(), y.id());
    products.add(s);
    brands.add(x);
    brands.add(y);

    link::<SneakerBrand>(&mut products, &mut brands, sid, xid).unwrap();
    let moved = link::<SneakerBrand>(&mut products, &mut brands, sid, yid).unwrap();

    assert_eq!(moved, Linked::Moved { previous: Some(xid) });
    assert!(!brands.get(xid).unwrap().has_sneaker(sid));
    assert!(brands.get(yid).unwrap().has_sneaker(sid));

    let mut problems = Vec::new();
    check::<SneakerBrand>(&products, &brands, &mut problems);
    assert!(problems.is_empty(), "{problems:?}");
  }

  #[test]
  fn missing_target_leaves_owner_untouched() {
    let (mut products, mut brands) = setup();
    let s = sneaker();
    let sid = s.id();
    products.add(s);

    let err = link::<SneakerBrand>(&mut products, &mut brands, sid, crate::id::BrandId::new())
      .unwrap_err();

    assert!(matches!(err, Error::NotFound { kind: "brand", .. }));
    assert_eq!(products.get(sid).unwrap().as_sneaker().unwrap().brand(), None);
  }

  #[test]
  fn accessories_cannot_carry_a_brand() {
    let (mut products, mut brands) = setup();
    let a = accessory();
    let b = Brand::build(&NewBrand::named("Nike")).unwrap();
    let (aid, bid) = (a.id(), b.id());
    products.add(a);
    brands.add(b);

    let err = link::<SneakerBrand>(&mut products, &mut brands, aid, bid).unwrap_err();

    assert!(matches!(err.violation(), Some(Violation::RoleMismatch { .. })));
    assert_eq!(brands.get(bid).unwrap().sneakers().count(), 0);
  }

  #[test]
  fn required_roles_refuse_to_unlink() {
    let mut refunds = Registry::new();
    let mut orders: Registry<Order> = Registry::new();
    let r = Refund::build("Damaged item", chrono::NaiveDate::MIN).unwrap();
    let rid = r.id();
    refunds.add(r);

    let err = unlink::<RefundOrder>(&mut refunds, &mut orders, rid).unwrap_err();
    assert_eq!(err.violation(), Some(&Violation::RequiredRole("refund_order")));
  }
}
