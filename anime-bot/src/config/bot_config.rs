//! BotConfig: BaseConfig + ProviderConfig. Use load() for env-based loading.
//!
//! Provider settings live in anime-client; access via `provider()`.

use anime_client::{ProviderConfig, ProviderKind};
use anyhow::Result;

use super::BaseConfig;

/// Bot config: BaseConfig + provider. Use BotConfig::load() for env-based loading.
pub struct BotConfig {
    pub base: BaseConfig,
    pub provider: ProviderConfig,
}

impl BotConfig {
    /// Load full config from environment variables. `token` overrides BOT_TOKEN, `provider` overrides ANIME_PROVIDER.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>, provider: Option<ProviderKind>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let provider = ProviderConfig::from_env(provider)?;
        Ok(Self { base, provider })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.provider.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn skip_updates(&self) -> bool {
        self.base.skip_updates
    }
}
