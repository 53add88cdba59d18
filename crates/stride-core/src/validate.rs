//! Scalar field validators.
//!
//! Every constructor and setter funnels through these so a rejected value
//! fails fast with [`Error::Invalid`] before any state is touched.

use std::fmt::Display;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{Error, Result};

/// Reject empty or whitespace-only strings.
pub fn non_blank(field: &'static str, value: &str) -> Result<String> {
  if value.trim().is_empty() {
    return Err(Error::invalid(field, "cannot be empty"));
  }
  Ok(value.to_owned())
}

/// Like [`non_blank`], with an upper bound on the character count.
pub fn bounded(field: &'static str, value: &str, max: usize) -> Result<String> {
  let value = non_blank(field, value)?;
  max_chars(field, &value, max)?;
  Ok(value)
}

pub fn max_chars(field: &'static str, value: &str, max: usize) -> Result<()> {
  if value.chars().count() > max {
    return Err(Error::invalid(
      field,
      format!("must be at most {max} characters long"),
    ));
  }
  Ok(())
}

/// Inclusive range check.
pub fn in_range<T>(field: &'static str, value: T, min: T, max: T) -> Result<T>
where
  T: PartialOrd + Display,
{
  if value < min || value > max {
    return Err(Error::invalid(
      field,
      format!("{value} is outside {min}..={max}"),
    ));
  }
  Ok(value)
}

pub fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal> {
  if value.is_sign_negative() && !value.is_zero() {
    return Err(Error::invalid(field, "cannot be negative"));
  }
  Ok(value)
}

/// `start` must be strictly before `end`.
pub fn date_order(start: NaiveDate, end: NaiveDate) -> Result<()> {
  if start >= end {
    return Err(Error::invalid(
      "start_date",
      format!("{start} must be earlier than end date {end}"),
    ));
  }
  Ok(())
}

pub fn not_after(field: &'static str, date: NaiveDate, today: NaiveDate) -> Result<()> {
  if date > today {
    return Err(Error::invalid(field, format!("{date} is in the future")));
  }
  Ok(())
}
