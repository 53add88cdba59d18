//! Runtime configuration, read from a TOML file and `STRIDE_*` environment
//! variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{ConfigBuilder, builder::DefaultState};
use rust_decimal::Decimal;
use serde::Deserialize;
use stride_core::ShopSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// SQLite file holding the saved shop. A leading `~/` is expanded.
  #[serde(default = "default_store_path")]
  pub store_path:  PathBuf,
  #[serde(default = "default_base_salary")]
  pub base_salary: Decimal,
}

fn default_store_path() -> PathBuf { PathBuf::from("stride.db") }

fn default_base_salary() -> Decimal { ShopSettings::default().base_salary }

impl AppConfig {
  /// Layer the optional file at `path` under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::from_builder(file_layer(path).add_source(config::Environment::with_prefix("STRIDE")))
  }

  fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    builder
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise AppConfig")
  }

  pub fn shop_settings(&self) -> ShopSettings { ShopSettings { base_salary: self.base_salary } }

  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

fn file_layer(path: &Path) -> ConfigBuilder<DefaultState> {
  config::Config::builder().add_source(config::File::from(path).required(false))
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
