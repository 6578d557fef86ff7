//! Provider selection and credentials, loaded from env.
//!
//! ANIME_PROVIDER picks the provider (qqddm | replicate | deepai, default qqddm). Each provider
//! reads its own variables; only the selected provider's credentials are required.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::deepai::{DeepAiProvider, DEFAULT_DEEPAI_URL};
use crate::provider::ConversionProvider;
use crate::qqddm::{QqddmProvider, DEFAULT_QQDDM_URL};
use crate::replicate::{ReplicateProvider, DEFAULT_REPLICATE_MODEL, DEFAULT_REPLICATE_URL};

/// Which style-transfer service the bot talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Qqddm,
    Replicate,
    DeepAi,
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qqddm" | "qq" => Ok(ProviderKind::Qqddm),
            "replicate" | "animegan" | "animeganv2" => Ok(ProviderKind::Replicate),
            "deepai" | "toonify" => Ok(ProviderKind::DeepAi),
            other => anyhow::bail!(
                "unknown provider '{}' (expected qqddm, replicate or deepai)",
                other
            ),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Qqddm => "qqddm",
            ProviderKind::Replicate => "replicate",
            ProviderKind::DeepAi => "deepai",
        };
        f.write_str(name)
    }
}

/// Settings for all providers; [`build_provider`] uses the part matching `kind`.
#[derive(Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// QQDDM_API_URL
    pub qqddm_api_url: String,
    /// PROXY or QQDDM_PROXY; used for the QQDDM generation call only
    pub proxy: Option<String>,
    /// REPLICATE_API_TOKEN
    pub replicate_api_token: String,
    /// REPLICATE_API_URL
    pub replicate_api_url: String,
    /// REPLICATE_MODEL (owner/name)
    pub replicate_model: String,
    /// REPLICATE_MODEL_VERSION
    pub replicate_model_version: Option<String>,
    /// DEEPAI_API_KEY
    pub deepai_api_key: String,
    /// DEEPAI_API_URL
    pub deepai_api_url: String,
    /// DEEPAI_SCRATCH_DIR; system temp dir when unset
    pub deepai_scratch_dir: PathBuf,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl ProviderConfig {
    /// Loads every provider setting from env. `kind` overrides ANIME_PROVIDER if provided.
    pub fn from_env(kind: Option<ProviderKind>) -> Result<Self> {
        let kind = match kind {
            Some(kind) => kind,
            None => match non_empty_var("ANIME_PROVIDER") {
                Some(name) => name.parse().context("ANIME_PROVIDER")?,
                None => ProviderKind::Qqddm,
            },
        };

        Ok(Self {
            kind,
            qqddm_api_url: non_empty_var("QQDDM_API_URL")
                .unwrap_or_else(|| DEFAULT_QQDDM_URL.to_string()),
            proxy: non_empty_var("PROXY").or_else(|| non_empty_var("QQDDM_PROXY")),
            replicate_api_token: non_empty_var("REPLICATE_API_TOKEN").unwrap_or_default(),
            replicate_api_url: non_empty_var("REPLICATE_API_URL")
                .unwrap_or_else(|| DEFAULT_REPLICATE_URL.to_string()),
            replicate_model: non_empty_var("REPLICATE_MODEL")
                .unwrap_or_else(|| DEFAULT_REPLICATE_MODEL.to_string()),
            replicate_model_version: non_empty_var("REPLICATE_MODEL_VERSION"),
            deepai_api_key: non_empty_var("DEEPAI_API_KEY").unwrap_or_default(),
            deepai_api_url: non_empty_var("DEEPAI_API_URL")
                .unwrap_or_else(|| DEFAULT_DEEPAI_URL.to_string()),
            deepai_scratch_dir: non_empty_var("DEEPAI_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
        })
    }

    /// Checks the selected provider: credentials present, URLs parse, scratch dir exists.
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            ProviderKind::Qqddm => {
                validate_url("QQDDM_API_URL", &self.qqddm_api_url)?;
                if let Some(proxy) = &self.proxy {
                    validate_url("PROXY", proxy)?;
                }
            }
            ProviderKind::Replicate => {
                if self.replicate_api_token.is_empty() {
                    anyhow::bail!("REPLICATE_API_TOKEN is required when ANIME_PROVIDER=replicate");
                }
                validate_url("REPLICATE_API_URL", &self.replicate_api_url)?;
                if self.replicate_model_version.is_none() && !self.replicate_model.contains('/') {
                    anyhow::bail!(
                        "REPLICATE_MODEL must be owner/name, got '{}'",
                        self.replicate_model
                    );
                }
            }
            ProviderKind::DeepAi => {
                if self.deepai_api_key.is_empty() {
                    anyhow::bail!("DEEPAI_API_KEY is required when ANIME_PROVIDER=deepai");
                }
                validate_url("DEEPAI_API_URL", &self.deepai_api_url)?;
                if !self.deepai_scratch_dir.is_dir() {
                    anyhow::bail!(
                        "DEEPAI_SCRATCH_DIR is not a directory: {}",
                        self.deepai_scratch_dir.display()
                    );
                }
            }
        }
        Ok(())
    }
}

fn validate_url(name: &str, value: &str) -> Result<()> {
    reqwest::Url::parse(value)
        .map(|_| ())
        .with_context(|| format!("{} is not a valid URL: {}", name, value))
}

/// Builds the configured provider.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn ConversionProvider>> {
    let provider: Arc<dyn ConversionProvider> = match config.kind {
        ProviderKind::Qqddm => Arc::new(
            QqddmProvider::new(config.qqddm_api_url.clone(), config.proxy.as_deref())
                .context("Build QQDDM client")?,
        ),
        ProviderKind::Replicate => Arc::new(
            ReplicateProvider::new(config.replicate_api_token.clone())
                .with_base_url(config.replicate_api_url.clone())
                .with_model(config.replicate_model.clone())
                .with_version(config.replicate_model_version.clone()),
        ),
        ProviderKind::DeepAi => Arc::new(
            DeepAiProvider::new(config.deepai_api_key.clone())
                .with_base_url(config.deepai_api_url.clone())
                .with_scratch_dir(config.deepai_scratch_dir.clone()),
        ),
    };
    Ok(provider)
}
