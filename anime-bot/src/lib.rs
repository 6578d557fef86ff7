//! # Anime bot application
//!
//! Wires dbot-telegram, handler-chain, handlers and image-handlers around the configured
//! style-transfer provider. Loads config from env and runs the REPL.

pub mod cli;
pub mod config;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use config::{BaseConfig, BotConfig};
pub use runner::{build_handler_chain, run_bot, AnimeBot};
