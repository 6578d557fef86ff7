//! Minimal framework config: token, optional API URL and log file path.
//! Loaded from env: BOT_TOKEN (or TELEGRAM_TOKEN), TELEGRAM_API_URL (or TELOXIDE_API_URL), LOG_FILE.

use anyhow::Result;
use std::env;

/// Minimal Telegram bot config (connectivity and logging only).
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Loads from env: BOT_TOKEN or TELEGRAM_TOKEN required; TELEGRAM_API_URL and LOG_FILE optional.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_token(None)
    }

    /// Like [`Self::from_env`], but `token` (e.g. from the CLI) wins over the env token when given.
    pub fn from_env_with_token(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TELEGRAM_TOKEN"))
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN (or TELEGRAM_TOKEN) not set"))?,
        };
        if bot_token.trim().is_empty() {
            anyhow::bail!("Bot token is empty");
        }
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Builds config with the given token; other fields None.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
        }
    }

    /// Builds the teloxide Bot, pointing it at `telegram_api_url` when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url) => {
                let url = reqwest::Url::parse(url).map_err(|e| {
                    anyhow::anyhow!("TELEGRAM_API_URL is not a valid URL: {}: {}", url, e)
                })?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}
