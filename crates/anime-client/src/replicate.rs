//! Replicate predictions 客户端（默认模型 AnimeGANv2）
//!
//! 以 `Prefer: wait` 创建 prediction，响应中通常已包含输出 URL。
//! 等待结束仍未完成的 prediction 视为失败，不做轮询。

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::error::ConversionError;
use crate::http::{ensure_success, mask_token, read_json};
use crate::payload::{ConversionResult, ImagePayload};
use crate::provider::ConversionProvider;

pub const DEFAULT_REPLICATE_URL: &str = "https://api.replicate.com";
pub const DEFAULT_REPLICATE_MODEL: &str = "cjwbw/animeganv2";

#[derive(Debug, Deserialize)]
struct Prediction {
    #[serde(default)]
    id: String,
    status: String,
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Replicate provider：设置了 `version` 时使用带版本的 predictions 接口，否则使用模型最新版本
#[derive(Clone)]
pub struct ReplicateProvider {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    model: String,
    version: Option<String>,
}

impl ReplicateProvider {
    pub fn new(api_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_REPLICATE_URL.to_string(),
            api_token,
            model: DEFAULT_REPLICATE_MODEL.to_string(),
            version: None,
        }
    }

    /// 自定义 API 根地址（如测试中的 mock server）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// 设置模型（`owner/name`）
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// 固定模型版本 id
    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    fn prediction_url(&self) -> String {
        match self.version {
            Some(_) => format!("{}/v1/predictions", self.base_url),
            None => format!("{}/v1/models/{}/predictions", self.base_url, self.model),
        }
    }

    fn request_body(&self, image: &ImagePayload) -> Value {
        let input = json!({ "image": image.to_data_url() });
        match &self.version {
            Some(version) => json!({ "version": version, "input": input }),
            None => json!({ "input": input }),
        }
    }

    /// 已完成的 prediction 返回输出 URL；失败或未完成均为错误
    fn output_url(prediction: Prediction) -> Result<String, ConversionError> {
        match prediction.status.as_str() {
            "succeeded" => {}
            "failed" | "canceled" => {
                let message = match prediction.error {
                    Some(Value::String(s)) => s,
                    Some(other) => other.to_string(),
                    None => prediction.status.clone(),
                };
                return Err(ConversionError::Provider { code: -1, message });
            }
            other => {
                return Err(ConversionError::MalformedResponse(format!(
                    "prediction {} still {}",
                    prediction.id, other
                )))
            }
        }
        let url = match prediction.output {
            Some(Value::String(url)) => Some(url),
            Some(Value::Array(items)) => items
                .into_iter()
                .find_map(|v| v.as_str().map(str::to_string)),
            _ => None,
        };
        url.filter(|u| !u.is_empty()).ok_or_else(|| {
            ConversionError::MalformedResponse("prediction has no output URL".to_string())
        })
    }
}

#[async_trait]
impl ConversionProvider for ReplicateProvider {
    fn name(&self) -> &'static str {
        "replicate"
    }

    #[instrument(skip(self, image), fields(provider = "replicate", bytes = image.len()))]
    async fn convert(&self, image: &ImagePayload) -> Result<ConversionResult, ConversionError> {
        let url = self.prediction_url();
        info!(
            url = %url,
            model = %self.model,
            version = ?self.version,
            api_token = %mask_token(&self.api_token),
            "Replicate prediction request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(&self.request_body(image))
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let prediction: Prediction = read_json(response).await?;
        let id = prediction.id.clone();
        let output = Self::output_url(prediction)?;

        info!(prediction_id = %id, output_url = %output, "Replicate prediction completed");
        Ok(ConversionResult::Url(output))
    }
}
