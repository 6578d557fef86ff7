//! `/start` and `/help`: always answer with the static help text.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{info, instrument};

pub const HELP_TEXT: &str = "Welcome to the Anime Style Converter Bot!\n\
Send me a photo, and I'll convert it into an anime style.\n\n\
Commands:\n\
/help - Show this help message\n";

const HELP_COMMANDS: &[&str] = &["start", "help"];

/// Extracts the command name from `/name`, `/name@bot` or `/name args`, lowercased.
pub fn parse_command(text: &str) -> Option<String> {
    let first = text.split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or(name);
    if name.is_empty() {
        return None;
    }
    Some(name.to_lowercase())
}

/// Replies to `/start` and `/help` with [`HELP_TEXT`] and stops the chain; anything else continues.
pub struct HelpHandler {
    bot: Arc<dyn Bot>,
}

impl HelpHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Handler for HelpHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some(command) = parse_command(&message.content) else {
            return Ok(HandlerResponse::Continue);
        };
        if !HELP_COMMANDS.contains(&command.as_str()) {
            return Ok(HandlerResponse::Continue);
        }

        info!(user_id = message.user.id, command = %command, "Sending help");
        self.bot.reply_to(message, HELP_TEXT).await?;
        Ok(HandlerResponse::Reply(HELP_TEXT.to_string()))
    }
}
