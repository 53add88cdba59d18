//! `stride`: maintenance tool for a saved Stride shop.
//!
//! # Usage
//!
//! ```
//! stride seed                      # write a demo shop to the store
//! stride summary                   # count members per extent
//! stride check                     # verify every association
//! stride --config prod.toml dump   # print the snapshot as JSON
//! ```

mod report;
mod seed;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use settings::AppConfig;
use stride_core::{Shop, store::ExtentStore};
use stride_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "stride", version, about = "Maintenance tool for the Stride shop store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "stride.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Replace the stored shop with a small demo shop.
  Seed,
  /// Print how many members each extent holds.
  Summary,
  /// Verify the stored shop; exits non-zero if it is inconsistent.
  Check,
  /// Print the stored snapshot as JSON.
  Dump,
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;

  let store_path = cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command {
    Command::Seed => {
      let shop = seed::demo_shop(cfg.shop_settings()).context("failed to build demo shop")?;
      store.save(shop.export()).await.context("failed to save shop")?;
      tracing::info!(path = ?store_path, "demo shop saved");
    }
    Command::Summary => {
      let shop = load_shop(&store, &cfg).await?;
      print!("{}", report::summary(&shop));
      if let Some(at) = store.last_saved().await? {
        println!("saved at   {at}");
      }
    }
    Command::Check => {
      let shop = load_shop(&store, &cfg).await?;
      shop.verify()?;
      println!("ok");
    }
    Command::Dump => {
      let snapshot = store.load().await?.unwrap_or_default();
      println!("{}", snapshot.to_json_pretty()?);
    }
  }

  Ok(())
}

/// Load the saved snapshot into a fresh shop. An empty store yields an
/// empty shop. Importing verifies the snapshot, so a damaged one is
/// reported here with every problem listed.
async fn load_shop(store: &SqliteStore, cfg: &AppConfig) -> Result<Shop> {
  let snapshot = store.load().await?.unwrap_or_default();
  let mut shop = Shop::new(cfg.shop_settings());
  if let Err(err) = shop.import(snapshot) {
    if let stride_core::Error::Integrity(problems) = &err {
      for problem in problems {
        tracing::error!("{problem}");
      }
    }
    return Err(err).context("stored shop is inconsistent");
  }
  Ok(shop)
}
