//! Base config: Telegram Bot connection and logging. Loaded from env.

use anyhow::Result;
use dbot_telegram::TelegramConfig;
use std::env;

/// Base config: Telegram-related and logging only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN or TELEGRAM_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// Log file path
    pub log_file: String,
    /// Drop updates queued while the bot was offline
    pub skip_updates: bool,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env_with_token(token)?;
        let skip_updates = env::var("SKIP_UPDATES")
            .ok()
            .map(|s| !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Ok(Self {
            bot_token: telegram.bot_token,
            telegram_api_url: telegram.telegram_api_url,
            log_file: telegram
                .log_file
                .unwrap_or_else(|| "logs/anime-bot.log".to_string()),
            skip_updates,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    /// Telegram connectivity part, for building the teloxide Bot.
    pub fn telegram(&self) -> TelegramConfig {
        TelegramConfig {
            bot_token: self.bot_token.clone(),
            telegram_api_url: self.telegram_api_url.clone(),
            log_file: Some(self.log_file.clone()),
        }
    }
}
