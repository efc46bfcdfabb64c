use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/binorigin/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinoriginConfig {
    /// Connect timeout for vanity-import lookups, in seconds.
    pub vanity_connect_timeout_secs: u64,
    /// Total timeout for one vanity-import lookup, in seconds. A slow host
    /// is abandoned, not retried.
    pub vanity_timeout_secs: u64,
    /// Additional hosting domains that follow the default
    /// `https://{domain}/{owner}/{repo}` convention.
    #[serde(default)]
    pub extra_providers: Vec<String>,
}

impl Default for BinoriginConfig {
    fn default() -> Self {
        Self {
            vanity_connect_timeout_secs: 5,
            vanity_timeout_secs: 15,
            extra_providers: Vec::new(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("binorigin")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

pub fn load_or_init() -> Result<BinoriginConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BinoriginConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: BinoriginConfig = toml::from_str(&data)?;
    Ok(cfg)
}
