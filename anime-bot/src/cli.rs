//! CLI parser and config loading.

use anime_client::ProviderKind;
use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "anime-bot")]
#[command(about = "Telegram bot that converts photos to anime style", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the bot (config from env; token overrides BOT_TOKEN, provider overrides ANIME_PROVIDER).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long, value_parser = parse_provider)]
        provider: Option<ProviderKind>,
    },
    /// Load and validate config without connecting to Telegram.
    CheckConfig {
        #[arg(short, long, value_parser = parse_provider)]
        provider: Option<ProviderKind>,
    },
}

fn parse_provider(s: &str) -> std::result::Result<ProviderKind, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

/// Load BotConfig from environment. `token` overrides BOT_TOKEN and `provider` overrides ANIME_PROVIDER.
pub fn load_config(token: Option<String>, provider: Option<ProviderKind>) -> Result<BotConfig> {
    BotConfig::load(token, provider)
}
