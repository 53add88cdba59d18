//! Source of "today" for date-window checks.

use std::fmt::Debug;

use chrono::{NaiveDate, Utc};

pub trait Clock: Debug + Send + Sync {
  fn today(&self) -> NaiveDate;
}

/// Reads the UTC date from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn today(&self) -> NaiveDate { Utc::now().date_naive() }
}

/// Always reports the same date. Used by tests and by replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
  fn today(&self) -> NaiveDate { self.0 }
}
