//! Conversions between snapshot extents and the rows stored for them.
//!
//! Timestamps are stored as RFC 3339 strings and extent bodies as compact
//! JSON arrays.

use chrono::{DateTime, Utc};
use stride_core::{Snapshot, model::ExtentKind};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Extents ─────────────────────────────────────────────────────────────────

/// An `extents` row as read from the database.
pub struct RawExtent {
  pub kind: String,
  pub body: String,
}

/// One row per extent kind, in [`ExtentKind::ALL`] order.
pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Vec<RawExtent>> {
  ExtentKind::ALL
    .into_iter()
    .map(|kind| {
      Ok(RawExtent {
        kind: kind.as_str().to_owned(),
        body: snapshot.extent_json(kind)?,
      })
    })
    .collect()
}

/// Rebuild a snapshot from stored rows. Kinds with no row stay empty.
pub fn decode_snapshot(rows: Vec<RawExtent>) -> Result<Snapshot> {
  let mut snapshot = Snapshot::default();
  for row in rows {
    let kind = ExtentKind::parse(&row.kind).ok_or_else(|| Error::UnknownExtent(row.kind.clone()))?;
    snapshot.set_extent_json(kind, &row.body)?;
  }
  Ok(snapshot)
}
