use anime_client::{build_provider, ConversionProvider};
use anyhow::{Context, Result};
use dbot_core::{init_tracing, Bot, Message as CoreMessage};
use dbot_telegram::{dispatch, run_repl, TelegramBotAdapter};
use handler_chain::HandlerChain;
use handlers::{HelpHandler, LoggingHandler};
use image_handlers::AnimeConversionHandler;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::BotConfig;

/// Order: logging, relay, commands. The relay claims every photo, so a captioned photo is converted.
pub fn build_handler_chain(
    bot: Arc<dyn Bot>,
    provider: Arc<dyn ConversionProvider>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AnimeConversionHandler::new(provider, bot.clone())))
        .add_handler(Arc::new(HelpHandler::new(bot)))
}

/// AnimeBot: handler chain plus the bot used for the global error reply.
pub struct AnimeBot {
    pub handler_chain: HandlerChain,
    bot: Arc<dyn Bot>,
}

impl AnimeBot {
    pub fn new(bot: Arc<dyn Bot>, provider: Arc<dyn ConversionProvider>) -> Self {
        Self {
            handler_chain: build_handler_chain(bot.clone(), provider),
            bot,
        }
    }

    /// Drive handler chain with core Message (for integration tests).
    #[doc(hidden)]
    pub async fn handle_core_message(&self, message: &CoreMessage) {
        dispatch(&self.handler_chain, self.bot.as_ref(), message).await;
    }
}

/// Main entry: validate config, init logging, build provider and chain, then run REPL.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file()).context("Failed to initialize logging")?;

    info!(
        provider = %config.provider().kind,
        skip_updates = config.skip_updates(),
        "Initializing bot"
    );

    let teloxide_bot = config.base().telegram().build_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let provider = build_provider(config.provider())?;
    info!(provider = provider.name(), "Provider ready");

    let handler_chain = build_handler_chain(bot.clone(), provider);

    info!("Bot started successfully");

    run_repl(teloxide_bot, handler_chain, bot, config.skip_updates()).await
}
