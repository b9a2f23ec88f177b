use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Scheme token of the protocol, without the `://` separator.
pub const SCHEME: &str = "mctp";

/// Port used when an address does not name one.
pub const DEFAULT_PORT: u16 = 9196;

/// Path requested when an address has no path or only `/`.
pub const DEFAULT_PATH: &str = "/index.md";

/// Defaults filled in by the address normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDefaults {
    pub port: u16,
    pub path: String,
}

impl Default for AddressDefaults {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
        }
    }
}

/// Bounds applied to one request/response exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    /// `None` blocks until the OS gives up.
    pub connect_timeout: Option<Duration>,
    /// Applied to every read on the connection; `None` waits forever.
    pub read_timeout: Option<Duration>,
    /// Upper bound on the header block, including line terminators.
    pub max_header_bytes: usize,
    /// Upper bound on the body read to end-of-stream.
    pub max_body_bytes: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        ClientConfig::default().fetch_limits()
    }
}

/// Global configuration loaded from `~/.config/mctp/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Port used when the address omits one.
    pub default_port: u16,
    /// Path used when the address has no path or only `/`.
    pub default_path: String,
    /// Connect timeout in seconds (0 = no timeout).
    pub connect_timeout_secs: u64,
    /// Per-read timeout in seconds (0 = no timeout).
    pub read_timeout_secs: u64,
    /// Maximum size of the response header block in bytes.
    pub max_header_bytes: usize,
    /// Maximum size of the response body in bytes.
    pub max_body_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_port: DEFAULT_PORT,
            default_path: DEFAULT_PATH.to_string(),
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
            max_header_bytes: 64 * 1024,
            max_body_bytes: 8 * 1024 * 1024,
        }
    }
}

fn secs(n: u64) -> Option<Duration> {
    (n > 0).then(|| Duration::from_secs(n))
}

impl ClientConfig {
    /// Rejects defaults that would produce a `Target` with port 0 or a relative path.
    pub fn validate(&self) -> Result<()> {
        if self.default_port == 0 {
            anyhow::bail!("default_port must be in 1..=65535, got 0");
        }
        if !self.default_path.starts_with('/') {
            anyhow::bail!(
                "default_path must start with `/`, got `{}`",
                self.default_path
            );
        }
        Ok(())
    }

    pub fn address_defaults(&self) -> AddressDefaults {
        AddressDefaults {
            port: self.default_port,
            path: self.default_path.clone(),
        }
    }

    pub fn fetch_limits(&self) -> FetchLimits {
        FetchLimits {
            connect_timeout: secs(self.connect_timeout_secs),
            read_timeout: secs(self.read_timeout_secs),
            max_header_bytes: self.max_header_bytes,
            max_body_bytes: self.max_body_bytes,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mctp")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClientConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ClientConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<ClientConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ClientConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
