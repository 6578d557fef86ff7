//! Config tests.

use crate::config::BotConfig;
use anime_client::ProviderKind;
use serial_test::serial;
use std::env;

fn reset_env() {
    for var in [
        "BOT_TOKEN",
        "TELEGRAM_TOKEN",
        "TELEGRAM_API_URL",
        "TELOXIDE_API_URL",
        "LOG_FILE",
        "SKIP_UPDATES",
        "ANIME_PROVIDER",
        "PROXY",
        "QQDDM_PROXY",
        "QQDDM_API_URL",
        "REPLICATE_API_TOKEN",
        "REPLICATE_MODEL",
        "REPLICATE_MODEL_VERSION",
        "REPLICATE_API_URL",
        "DEEPAI_API_KEY",
        "DEEPAI_API_URL",
        "DEEPAI_SCRATCH_DIR",
    ] {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    reset_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = BotConfig::load(None, None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.base().telegram_api_url.is_none());
    assert_eq!(config.log_file(), "logs/anime-bot.log");
    assert!(config.skip_updates());
    assert_eq!(config.provider().kind, ProviderKind::Qqddm);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    reset_env();
    env::set_var("TELEGRAM_TOKEN", "legacy_token");
    env::set_var("LOG_FILE", "/tmp/anime.log");
    env::set_var("SKIP_UPDATES", "false");
    env::set_var("ANIME_PROVIDER", "replicate");
    env::set_var("REPLICATE_API_TOKEN", "r8_custom_token_value");
    env::set_var("REPLICATE_MODEL_VERSION", "abc123");

    let config = BotConfig::load(None, None).unwrap();

    assert_eq!(config.bot_token(), "legacy_token");
    assert_eq!(config.log_file(), "/tmp/anime.log");
    assert!(!config.skip_updates());
    assert_eq!(config.provider().kind, ProviderKind::Replicate);
    assert_eq!(
        config.provider().replicate_model_version.as_deref(),
        Some("abc123")
    );
    assert!(config.validate().is_ok());
    reset_env();
}

#[test]
#[serial]
fn test_load_config_with_overrides() {
    reset_env();
    env::set_var("BOT_TOKEN", "env_token");
    env::set_var("ANIME_PROVIDER", "qqddm");

    let config = BotConfig::load(
        Some("override_token".to_string()),
        Some(ProviderKind::DeepAi),
    )
    .unwrap();

    assert_eq!(config.bot_token(), "override_token");
    assert_eq!(config.provider().kind, ProviderKind::DeepAi);
    // DeepAI without DEEPAI_API_KEY must not validate.
    assert!(config.validate().is_err());
    reset_env();
}

#[test]
#[serial]
fn test_missing_token_is_error() {
    reset_env();
    assert!(BotConfig::load(None, None).is_err());
}

#[test]
#[serial]
fn test_validate_telegram_api_url_invalid() {
    reset_env();
    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("TELEGRAM_API_URL", "not-a-valid-url");

    let config = BotConfig::load(None, None).unwrap();
    assert!(config.validate().is_err());

    reset_env();
}
