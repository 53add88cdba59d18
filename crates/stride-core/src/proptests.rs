//! Random mutation sequences over a small shop. After every step the whole
//! graph must verify, and a rejected step must leave it exactly as it was.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::{
  Shop, ShopSettings,
  clock::FixedClock,
  id::{BrandId, CustomerId, EmployeeId, ProductId},
  model::{NewBrand, NewCustomer, NewEmployee, NewSneaker},
};

const EMPLOYEES: usize = 6;
const CUSTOMERS: usize = 3;
const SNEAKERS: usize = 3;
const BRANDS: usize = 2;

/// Usernames the customers are renamed between. Case variants collide on
/// purpose.
const USERNAMES: [&str; 6] = ["ann", "ANN", "bea", "cy", "Dee", "dee"];

#[derive(Debug, Clone)]
enum Step {
  Supervise(usize, usize),
  Unsupervise(usize),
  RemoveSubordinate(usize, usize),
  Rename(usize, usize),
  Order(usize, usize),
  DeleteOrder(usize),
  Reassign(usize, usize),
  AssignBrand(usize, usize),
  RemoveBrand(usize),
}

impl Step {
  /// Steps whose repetition must be a no-op once they succeeded.
  fn is_idempotent(&self) -> bool {
    matches!(self, Self::Supervise(..) | Self::Rename(..) | Self::AssignBrand(..))
  }
}

fn arb_step() -> impl Strategy<Value = Step> {
  prop_oneof![
    (0..EMPLOYEES, 0..EMPLOYEES).prop_map(|(e, s)| Step::Supervise(e, s)),
    (0..EMPLOYEES).prop_map(Step::Unsupervise),
    (0..EMPLOYEES, 0..EMPLOYEES).prop_map(|(s, e)| Step::RemoveSubordinate(s, e)),
    (0..CUSTOMERS, 0..USERNAMES.len()).prop_map(|(c, n)| Step::Rename(c, n)),
    (0..CUSTOMERS, 0..SNEAKERS).prop_map(|(c, p)| Step::Order(c, p)),
    (0..8usize).prop_map(Step::DeleteOrder),
    (0..8usize, 0..CUSTOMERS).prop_map(|(o, c)| Step::Reassign(o, c)),
    (0..SNEAKERS, 0..BRANDS).prop_map(|(p, b)| Step::AssignBrand(p, b)),
    (0..SNEAKERS).prop_map(Step::RemoveBrand),
  ]
}

struct Fixture {
  shop:      Shop,
  employees: Vec<EmployeeId>,
  customers: Vec<CustomerId>,
  sneakers:  Vec<ProductId>,
  brands:    Vec<BrandId>,
}

fn fixture() -> Fixture {
  let hired = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
  let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
  let mut shop = Shop::with_clock(ShopSettings::default(), Arc::new(FixedClock(today)));

  let employees = (0..EMPLOYEES)
    .map(|i| {
      let name = format!("E{i}");
      shop.create_employee(NewEmployee::new(&name, "Doe", "Clerk", hired)).unwrap()
    })
    .collect();
  let customers = ["c0", "c1", "c2"]
    .into_iter()
    .map(|u| shop.create_customer(NewCustomer::new(u, "Customer", "c@example.com")).unwrap())
    .collect();
  let sneakers = (0..SNEAKERS)
    .map(|i| {
      shop
        .create_sneaker(&NewSneaker {
          name:       format!("Runner {i}"),
          price:      Decimal::from(100 + i as i64),
          category:   "Running".into(),
          available:  true,
          color:      "Black".into(),
          material:   "Mesh".into(),
          collection: "Core".into(),
          size:       42,
        })
        .unwrap()
    })
    .collect();
  let brands = ["X", "Y"]
    .into_iter()
    .map(|name| shop.create_brand(&NewBrand::named(name)).unwrap())
    .collect();

  Fixture { shop, employees, customers, sneakers, brands }
}

fn apply(f: &mut Fixture, step: &Step) -> crate::Result<()> {
  let shop = &mut f.shop;
  match *step {
    Step::Supervise(e, s) => shop.assign_supervisor(f.employees[e], f.employees[s]).map(drop),
    Step::Unsupervise(e) => shop.remove_supervisor(f.employees[e]).map(drop),
    Step::RemoveSubordinate(s, e) => shop.remove_subordinate(f.employees[s], f.employees[e]),
    Step::Rename(c, n) => shop.rename_customer(f.customers[c], USERNAMES[n]),
    Step::Order(c, p) => {
      shop.add_to_cart(f.customers[c], f.sneakers[p])?;
      shop.place_order(f.customers[c], None).map(drop)
    }
    Step::DeleteOrder(o) => {
      let orders = shop.orders().ids();
      if orders.is_empty() {
        return Ok(());
      }
      shop.delete_order(orders[o % orders.len()]).map(drop)
    }
    Step::Reassign(o, c) => {
      let orders = shop.orders().ids();
      if orders.is_empty() {
        return Ok(());
      }
      shop.reassign_order(orders[o % orders.len()], f.customers[c])
    }
    Step::AssignBrand(p, b) => shop.assign_brand(f.sneakers[p], f.brands[b]).map(drop),
    Step::RemoveBrand(p) => shop.remove_brand(f.sneakers[p]).map(drop),
  }
}

fn state(shop: &Shop) -> String { shop.export().to_json_pretty().unwrap() }

/// Properties that must hold between any two steps.
fn check(shop: &Shop) -> Result<(), TestCaseError> {
  if let Err(err) = shop.verify() {
    return Err(TestCaseError::fail(format!("inconsistent graph: {err}")));
  }

  for e in shop.employees().all() {
    let chain = shop.chain_of_command(e.id).unwrap();
    prop_assert!(!chain.contains(&e.id), "{} is its own ancestor", e.id);
    prop_assert!(chain.len() < EMPLOYEES);
    let supervisors = shop.employees().all().filter(|s| s.has_subordinate(e.id)).count();
    prop_assert!(supervisors <= 1, "{} has {supervisors} supervisors", e.id);
  }

  for c in shop.customers().all() {
    let mut history: Vec<_> = c.order_history().collect();
    let mut filed = shop.lookup_orders(c.username().unwrap()).unwrap();
    history.sort();
    filed.sort();
    prop_assert_eq!(history, filed);
  }
  Ok(())
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(128))]

  #[test]
  fn random_mutations_keep_the_graph_consistent(
    steps in prop::collection::vec(arb_step(), 1..60)
  ) {
    let mut f = fixture();
    for step in &steps {
      let before = state(&f.shop);
      match apply(&mut f, step) {
        Ok(()) if step.is_idempotent() => {
          let after = state(&f.shop);
          prop_assert!(apply(&mut f, step).is_ok(), "{:?} failed when repeated", step);
          prop_assert_eq!(state(&f.shop), after, "{:?} changed the graph when repeated", step);
        }
        Ok(()) => {}
        Err(_) => {
          prop_assert_eq!(state(&f.shop), before, "rejected {:?} changed the graph", step);
        }
      }
      check(&f.shop)?;
    }
  }
}
