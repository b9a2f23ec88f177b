//! `mctp raw <address>` – fetch and print the markdown body as served.

use anyhow::{Context, Result};
use mctp_core::address::normalize;
use mctp_core::config::ClientConfig;
use mctp_core::protocol;

pub async fn run_raw(cfg: &ClientConfig, address: &str) -> Result<()> {
    let target = normalize(address, &cfg.address_defaults())
        .with_context(|| format!("address `{}`", address.trim()))?;
    let limits = cfg.fetch_limits();
    let response = tokio::task::spawn_blocking(move || protocol::exchange(&target, &limits))
        .await
        .context("fetch task join")??;
    print!("{}", response.body);
    Ok(())
}
