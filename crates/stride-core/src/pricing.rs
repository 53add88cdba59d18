//! Order totals and promo-code redemption.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
  id::PromocodeId,
  model::{AppliedDiscount, LineItem, Promocode},
  registry::Registry,
};

/// The priced result for a set of line items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
  pub subtotal: Decimal,
  pub total:    Decimal,
  pub discount: Option<AppliedDiscount>,
  /// The code that lost a use, if any.
  pub redeemed: Option<PromocodeId>,
}

pub fn subtotal(items: &[LineItem]) -> Decimal { items.iter().map(|i| i.unit_price).sum() }

/// Apply `percent` off `amount`. The product is exact; no rounding to
/// cents happens here.
pub fn discounted(amount: Decimal, percent: Decimal) -> Decimal {
  amount * (Decimal::ONE - percent / Decimal::ONE_HUNDRED)
}

/// Find the promo code matching `code`, ignoring case.
pub fn find_code<'a>(promocodes: &'a Registry<Promocode>, code: &str) -> Option<&'a Promocode> {
  promocodes.all().find(|p| p.matches(code))
}

/// Price `items`, redeeming `promo_code` if it is known, inside its window
/// on `today`, and not used up. A successful redemption consumes one use.
/// Anything else leaves the total undiscounted and the code untouched.
pub fn compute_total(
  items: &[LineItem],
  promo_code: Option<&str>,
  promocodes: &mut Registry<Promocode>,
  today: NaiveDate,
) -> Quote {
  let subtotal = subtotal(items);
  let undiscounted = Quote { subtotal, total: subtotal, discount: None, redeemed: None };

  let Some(code) = promo_code.filter(|c| !c.trim().is_empty()) else {
    return undiscounted;
  };
  let Some(id) = find_code(promocodes, code).map(|p| p.id) else {
    tracing::debug!(code, "unknown promo code");
    return undiscounted;
  };
  let Some(promo) = promocodes.get_mut(id) else {
    return undiscounted;
  };
  if !promo.is_valid_on(today) || promo.is_exhausted() {
    tracing::debug!(code = promo.code(), %today, uses = promo.number_of_uses, "promo code not redeemable");
    return undiscounted;
  }

  promo.number_of_uses -= 1;
  let percent = promo.discount_percent();
  tracing::debug!(code = promo.code(), remaining = promo.number_of_uses, "promo code redeemed");

  Quote {
    subtotal,
    total: discounted(subtotal, percent),
    discount: Some(AppliedDiscount { code: promo.code.clone(), percent }),
    redeemed: Some(id),
  }
}
