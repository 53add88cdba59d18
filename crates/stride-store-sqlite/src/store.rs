//! [`SqliteStore`], the SQLite implementation of [`ExtentStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use stride_core::{Snapshot, store::ExtentStore};

use crate::{
  Error, Result,
  encode::{RawExtent, decode_dt, decode_snapshot, encode_dt, encode_snapshot},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A snapshot store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// When the stored snapshot was written, or `None` if the store is empty.
  pub async fn last_saved(&self) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT MAX(saved_at) FROM extents", [], |row| row.get(0))?)
      })
      .await?;

    raw.as_deref().map(decode_dt).transpose()
  }
}

// ─── ExtentStore impl ────────────────────────────────────────────────────────

impl ExtentStore for SqliteStore {
  type Error = Error;

  async fn save(&self, snapshot: Snapshot) -> Result<()> {
    let rows = encode_snapshot(&snapshot)?;
    let at_str = encode_dt(Utc::now());
    let count = rows.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM extents", [])?;
        for row in &rows {
          tx.execute(
            "INSERT INTO extents (kind, body, saved_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![row.kind, row.body, at_str],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::debug!(extents = count, "snapshot saved");
    Ok(())
  }

  async fn load(&self) -> Result<Option<Snapshot>> {
    let rows: Vec<RawExtent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT kind, body FROM extents ORDER BY kind")?;
        let rows = stmt
          .query_map([], |row| Ok(RawExtent { kind: row.get(0)?, body: row.get(1)? }))?
          .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
      })
      .await?;

    if rows.is_empty() {
      return Ok(None);
    }
    decode_snapshot(rows).map(Some)
  }
}
