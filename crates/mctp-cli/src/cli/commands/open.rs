//! `mctp open [address]` – run the load cycle and print the document.

use anyhow::{Context, Result};
use mctp_core::config::ClientConfig;
use mctp_core::page::{self, Page};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct PageJson<'a> {
    address: Option<&'a str>,
    title: &'a str,
    document: &'a str,
}

fn to_json(page: &Page) -> Result<String> {
    let view = PageJson {
        address: page.address.as_deref(),
        title: &page.title,
        document: &page.document,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

pub async fn run_open(
    cfg: &ClientConfig,
    address: Option<&str>,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let page = load_or_welcome(cfg, address).await?;
    tracing::info!(title = %page.title, "page loaded");

    let text = if json {
        to_json(&page)?
    } else {
        page.document.clone()
    };

    match output {
        Some(path) => {
            std::fs::write(path, &text).with_context(|| format!("write {}", path.display()))?;
            eprintln!("{} -> {}", page.title, path.display());
        }
        None => {
            println!("{text}");
            if !json {
                eprintln!("title: {}", page.title);
            }
        }
    }
    if let Some(addr) = &page.address {
        tracing::debug!(address = %addr, "display address");
    }
    Ok(())
}

async fn load_or_welcome(cfg: &ClientConfig, address: Option<&str>) -> Result<Page> {
    match address {
        Some(address) => page::load_async(address.to_string(), cfg.clone())
            .await
            .context("load task join"),
        None => Ok(page::welcome_page()),
    }
}
