//! Binary for the anime conversion bot.

use anyhow::Result;
use anime_bot::{load_config, run_bot, Cli, Commands};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, provider } => {
            let config = load_config(token, provider)?;
            run_bot(config).await
        }
        Commands::CheckConfig { provider } => {
            let config = load_config(None, provider)?;
            config.validate()?;
            println!(
                "Config OK: provider={}, log_file={}",
                config.provider().kind,
                config.log_file()
            );
            Ok(())
        }
    }
}
