//! CLI for the MCTP browser.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mctp_core::config;
use std::path::PathBuf;

use commands::{run_config, run_open, run_raw, run_welcome};

/// Top-level CLI for the MCTP browser.
#[derive(Debug, Parser)]
#[command(name = "mctp")]
#[command(about = "MCTP: fetch and render markdown from MCTP servers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch an address and print the rendered HTML document.
    Open {
        /// Address in the form `[mctp://]host[:port][/path]`; omit for the welcome page.
        address: Option<String>,
        /// Write the document to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Print `{address, title, document}` as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Fetch an address and print the raw markdown body, unconverted.
    Raw {
        /// Address in the form `[mctp://]host[:port][/path]`.
        address: String,
    },

    /// Print the built-in welcome page.
    Welcome,

    /// Show the config file location and effective settings.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Open {
                address,
                output,
                json,
            } => run_open(&cfg, address.as_deref(), output.as_deref(), json).await?,
            CliCommand::Raw { address } => run_raw(&cfg, &address).await?,
            CliCommand::Welcome => run_welcome(),
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
