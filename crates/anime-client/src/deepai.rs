//! DeepAI Toonify 客户端
//!
//! 图片先写入临时文件，再以 multipart 字段 `image` 上传；请求结束后（无论成功与否）删除临时文件。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::{info, instrument, warn};

use crate::error::ConversionError;
use crate::http::{ensure_success, mask_token, read_json};
use crate::payload::{ConversionResult, ImagePayload};
use crate::provider::ConversionProvider;

pub const DEFAULT_DEEPAI_URL: &str = "https://api.deepai.org";

#[derive(Deserialize)]
struct ToonifyResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    output_url: Option<String>,
    #[serde(default)]
    err: Option<String>,
}

/// DeepAI provider，临时文件写在 `scratch_dir` 下
#[derive(Clone)]
pub struct DeepAiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    scratch_dir: PathBuf,
}

impl DeepAiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_DEEPAI_URL.to_string(),
            api_key,
            scratch_dir: std::env::temp_dir(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_scratch_dir(mut self, scratch_dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = scratch_dir.into();
        self
    }

    /// 创建临时文件并异步写入图片；返回的句柄 drop 或 close 时删除文件
    async fn stage(&self, image: &ImagePayload) -> Result<NamedTempFile, ConversionError> {
        let file = tempfile::Builder::new()
            .prefix("toonify-")
            .suffix(&format!(".{}", image.extension()))
            .tempfile_in(&self.scratch_dir)?;
        tokio::fs::write(file.path(), image.bytes()).await?;
        Ok(file)
    }

    async fn upload(&self, path: &Path, image: &ImagePayload) -> Result<String, ConversionError> {
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("image.{}", image.extension()));
        let part = reqwest::multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(image.mime())?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let url = format!("{}/api/toonify", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .multipart(form)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body: ToonifyResponse = read_json(response).await?;

        match body.output_url.filter(|u| !u.is_empty()) {
            Some(output) => {
                info!(job_id = ?body.id, output_url = %output, "DeepAI toonify completed");
                Ok(output)
            }
            None => Err(ConversionError::MalformedResponse(
                body.err.unwrap_or_else(|| "missing output_url".to_string()),
            )),
        }
    }
}

#[async_trait]
impl ConversionProvider for DeepAiProvider {
    fn name(&self) -> &'static str {
        "deepai"
    }

    #[instrument(skip(self, image), fields(provider = "deepai", bytes = image.len()))]
    async fn convert(&self, image: &ImagePayload) -> Result<ConversionResult, ConversionError> {
        info!(
            base_url = %self.base_url,
            api_key = %mask_token(&self.api_key),
            "DeepAI toonify request"
        );
        let staged = self.stage(image).await?;
        let result = self.upload(staged.path(), image).await;
        if let Err(e) = staged.close() {
            warn!(error = %e, "Failed to remove temporary image");
        }
        result.map(ConversionResult::Url)
    }
}
