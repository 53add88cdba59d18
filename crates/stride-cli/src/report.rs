//! Plain-text rendering for the `summary` subcommand.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use stride_core::{Shop, model::ExtentKind};

/// One line per extent with its member count, then order revenue.
pub fn summary(shop: &Shop) -> String {
  let mut out = String::new();
  for kind in ExtentKind::ALL {
    let _ = writeln!(out, "{:<10} {:>6}", kind.as_str(), shop.extent_len(kind));
  }
  let revenue: Decimal = shop.orders().all().map(|o| o.total()).sum();
  let _ = writeln!(out, "{:<10} {:>6}", "revenue", revenue);
  out
}
