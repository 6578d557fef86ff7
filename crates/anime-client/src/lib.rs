//! # anime-client
//!
//! 照片动漫化（风格迁移）客户端，统一在一个 trait 之后。
//! Provider 接收用户照片 [`ImagePayload`]，返回转换后的图片字节或其 URL（[`ConversionResult`]）；
//! 任何失败都以 [`ConversionError`] 返回。
//!
//! Providers: [`QqddmProvider`]、[`ReplicateProvider`]（AnimeGANv2）、[`DeepAiProvider`]（Toonify）。
//! 启动时由 [`ProviderConfig::from_env`] + [`build_provider`] 选定其一。

mod config;
mod deepai;
mod error;
mod http;
mod payload;
mod provider;
mod qqddm;
mod replicate;

pub use config::{build_provider, ProviderConfig, ProviderKind};
pub use deepai::{DeepAiProvider, DEFAULT_DEEPAI_URL};
pub use error::ConversionError;
pub use http::mask_token;
pub use payload::{ConversionResult, ImagePayload};
pub use provider::ConversionProvider;
pub use qqddm::{QqddmProvider, DEFAULT_QQDDM_URL};
pub use replicate::{ReplicateProvider, DEFAULT_REPLICATE_MODEL, DEFAULT_REPLICATE_URL};
