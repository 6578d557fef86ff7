//! Bot configuration: BaseConfig (Telegram + log) + ProviderConfig (style-transfer provider).

mod base;
mod bot_config;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
