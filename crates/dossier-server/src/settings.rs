//! Runtime server configuration.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Deserialised from `config.toml` layered under `DOSSIER_*` variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Read `path` (optional) and the environment on top of the defaults.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 2022)?
      .set_default("store_path", "dossier.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("DOSSIER"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
