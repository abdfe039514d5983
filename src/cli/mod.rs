mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use config::*;

use crate::{pay_config::PayConfig, slashtag::SlashUrl};

#[derive(Parser)]
#[clap(version, long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[clap(
        short,
        long,
        env = "SLASHPAY_CONFIG",
        default_value = "slashpay.yml",
        value_name = "FILE"
    )]
    config: PathBuf,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decodes a slashpay.json document and lists its entries
    Decode {
        #[clap(value_name = "FILE")]
        file: PathBuf,
    },
    /// Parses a slashtags url
    ParseUrl { url: String },
    /// Prints the effective configuration
    PrintConfig,
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_path(&cli.config)?;
    crate::tracing::init_tracer(config.tracing.clone())?;

    match cli.command {
        Command::Decode { file } => {
            let content = std::fs::read(&file)
                .with_context(|| format!("Couldn't read {}", file.display()))?;
            let pay_config =
                PayConfig::from_bytes(&content).context("Couldn't decode pay config")?;
            if pay_config.is_empty() {
                println!("No payment methods published");
            }
            for entry in pay_config.entries() {
                println!("{}: {}", entry.kind, entry.value);
            }
        }
        Command::ParseUrl { url } => {
            let parsed: SlashUrl = url.parse().context("Couldn't parse slashtags url")?;
            println!("protocol: {:?}", parsed.protocol);
            println!("id: {}", parsed.id);
            println!("path: {}", parsed.path);
            if let Some(query) = parsed.query {
                println!("query: {query}");
            }
        }
        Command::PrintConfig => {
            println!("{}", serde_yaml::to_string(&config)?);
        }
    }
    Ok(())
}
