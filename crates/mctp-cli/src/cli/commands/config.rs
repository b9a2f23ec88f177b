//! `mctp config` – show where the config lives and what it says.

use anyhow::Result;
use mctp_core::config::{self, ClientConfig};

pub fn run_config(cfg: &ClientConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml_for(cfg)?);
    Ok(())
}

fn toml_for(cfg: &ClientConfig) -> Result<String> {
    Ok(toml::to_string_pretty(cfg)?)
}
