use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, id::PromocodeId, registry::Entity, validate};

pub const MAX_CODE_CHARS: usize = 15;

/// A limited-use percentage discount with a validity window. The code is
/// stored without surrounding whitespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promocode {
  pub(crate) id:             PromocodeId,
  pub(crate) code:           String,
  pub(crate) number_of_uses: u32,
  discount_percent:          Decimal,
  start_date:                NaiveDate,
  end_date:                  NaiveDate,
}

/// Input to [`crate::Shop::create_promocode`].
#[derive(Debug, Clone)]
pub struct NewPromocode {
  pub code:             String,
  pub number_of_uses:   u32,
  pub discount_percent: Decimal,
  pub start_date:       NaiveDate,
  pub end_date:         NaiveDate,
}

impl Promocode {
  pub(crate) fn build(input: &NewPromocode) -> Result<Self> {
    validate::date_order(input.start_date, input.end_date)?;
    Ok(Self {
      id:               PromocodeId::new(),
      code:             validate::bounded("code", input.code.trim(), MAX_CODE_CHARS)?,
      number_of_uses:   input.number_of_uses,
      discount_percent: validate::in_range(
        "discount_percent",
        input.discount_percent,
        Decimal::from(5),
        Decimal::from(30),
      )?,
      start_date:       input.start_date,
      end_date:         input.end_date,
    })
  }

  pub fn code(&self) -> &str { &self.code }

  pub fn number_of_uses(&self) -> u32 { self.number_of_uses }

  pub fn discount_percent(&self) -> Decimal { self.discount_percent }

  pub fn start_date(&self) -> NaiveDate { self.start_date }

  pub fn end_date(&self) -> NaiveDate { self.end_date }

  /// Case-insensitive comparison against a code typed by a customer.
  /// Surrounding whitespace is ignored on both sides.
  pub fn matches(&self, code: &str) -> bool {
    self.code.trim().eq_ignore_ascii_case(code.trim())
  }

  /// Inclusive on both ends.
  pub fn is_valid_on(&self, day: NaiveDate) -> bool {
    self.start_date <= day && day <= self.end_date
  }

  pub fn is_exhausted(&self) -> bool { self.number_of_uses == 0 }

  pub fn set_number_of_uses(&mut self, uses: u32) { self.number_of_uses = uses; }

  pub fn set_discount_percent(&mut self, percent: Decimal) -> Result<()> {
    self.discount_percent =
      validate::in_range("discount_percent", percent, Decimal::from(5), Decimal::from(30))?;
    Ok(())
  }

  pub fn set_window(&mut self, start: NaiveDate, end: NaiveDate) -> Result<()> {
    validate::date_order(start, end)?;
    self.start_date = start;
    self.end_date = end;
    Ok(())
  }
}

impl Entity for Promocode {
  type Id = PromocodeId;

  fn id(&self) -> PromocodeId { self.id }
}
