//! QQDDM（"异次元的我"）客户端
//!
//! 一次 JSON POST 上传 base64 图片；响应的 `extra` 字段是 JSON 字符串，其中包含结果 URL。
//! 请求体需签名（`x-sign-value` / `x-sign-version`）。
//! 取第一个 URL 下载后以字节返回，Telegram 不一定能直接访问该 CDN。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::ConversionError;
use crate::http::{ensure_success, read_json};
use crate::payload::{ConversionResult, ImagePayload};
use crate::provider::ConversionProvider;

pub const DEFAULT_QQDDM_URL: &str =
    "https://ai.tu.qq.com/trpc.shadow_cv.ai_processor_cgi.AIProcessorCgi/Process";

const BUSI_ID: &str = "different_dimension_me_img_entry";
const ORIGIN: &str = "https://h5.tu.qq.com";
const SIGN_SALT: &str = "HQ31X02e";
const SIGN_VERSION: &str = "v1";
/// 服务拒绝处理的图片（未检测到人脸、违规内容等）
const ILLEGAL_PICTURE_CODE: i64 = 1001;

/// 请求签名：md5(origin + 请求体长度 + salt)，小写十六进制
fn sign(body: &str) -> String {
    format!("{:x}", md5::compute(format!("{}{}{}", ORIGIN, body.len(), SIGN_SALT)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessRequest {
    busi_id: &'static str,
    extra: String,
    images: Vec<String>,
}

#[derive(Serialize)]
struct RequestExtra {
    face_rects: Vec<serde_json::Value>,
    version: u8,
    platform: &'static str,
    data_report: DataReport,
}

#[derive(Serialize)]
struct DataReport {
    parent_trace_id: String,
    root_channel: &'static str,
    level: u8,
}

#[derive(Deserialize)]
struct ProcessResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    extra: Option<String>,
}

#[derive(Deserialize)]
struct ResponseExtra {
    #[serde(default)]
    img_urls: Vec<String>,
}

/// QQDDM provider
///
/// `generate` 可走代理（服务有地区限制）；下载结果不走代理。
#[derive(Clone)]
pub struct QqddmProvider {
    generate: reqwest::Client,
    download: reqwest::Client,
    endpoint: String,
}

impl QqddmProvider {
    /// 创建客户端；给定 `proxy` 时生成请求经由代理发送
    pub fn new(endpoint: impl Into<String>, proxy: Option<&str>) -> Result<Self, ConversionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(proxy) = proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| ConversionError::Config(format!("invalid proxy {}: {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }
        let generate = builder
            .build()
            .map_err(|e| ConversionError::Config(e.to_string()))?;
        Ok(Self {
            generate,
            download: reqwest::Client::new(),
            endpoint: endpoint.into(),
        })
    }

    fn build_request(image: &ImagePayload) -> Result<ProcessRequest, ConversionError> {
        let extra = RequestExtra {
            face_rects: Vec::new(),
            version: 2,
            platform: "web",
            data_report: DataReport {
                parent_trace_id: uuid::Uuid::new_v4().to_string(),
                root_channel: "",
                level: 0,
            },
        };
        let extra = serde_json::to_string(&extra)
            .map_err(|e| ConversionError::MalformedResponse(e.to_string()))?;
        Ok(ProcessRequest {
            busi_id: BUSI_ID,
            extra,
            images: vec![image.to_base64()],
        })
    }

    /// 解析响应：code 0 成功，1001 为非法图片，其余均为错误
    fn parse_urls(response: ProcessResponse) -> Result<Vec<String>, ConversionError> {
        match response.code {
            0 => {}
            ILLEGAL_PICTURE_CODE => return Err(ConversionError::IllegalPicture(response.msg)),
            code => {
                return Err(ConversionError::Provider {
                    code,
                    message: response.msg,
                })
            }
        }
        let extra = response
            .extra
            .ok_or_else(|| ConversionError::MalformedResponse("missing extra".to_string()))?;
        let extra: ResponseExtra = serde_json::from_str(&extra)
            .map_err(|e| ConversionError::MalformedResponse(format!("extra: {}", e)))?;
        if extra.img_urls.is_empty() {
            return Err(ConversionError::MalformedResponse(
                "no img_urls in response".to_string(),
            ));
        }
        Ok(extra.img_urls)
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ConversionError> {
        let response = self.download.get(url).send().await?;
        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ConversionError::MalformedResponse(
                "result image is empty".to_string(),
            ));
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ConversionProvider for QqddmProvider {
    fn name(&self) -> &'static str {
        "qqddm"
    }

    #[instrument(skip(self, image), fields(provider = "qqddm", bytes = image.len()))]
    async fn convert(&self, image: &ImagePayload) -> Result<ConversionResult, ConversionError> {
        let request = Self::build_request(image)?;
        // 签名覆盖实际发送的请求体
        let body = serde_json::to_string(&request)
            .map_err(|e| ConversionError::MalformedResponse(e.to_string()))?;
        let signature = sign(&body);
        info!(endpoint = %self.endpoint, body_len = body.len(), "QQDDM conversion request");

        let response = self
            .generate
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ORIGIN, ORIGIN)
            .header(reqwest::header::REFERER, format!("{}/", ORIGIN))
            .header("x-sign-value", signature)
            .header("x-sign-version", SIGN_VERSION)
            .body(body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let envelope: ProcessResponse = read_json(response).await?;
        debug!(code = envelope.code, msg = %envelope.msg, "QQDDM response");

        let urls = Self::parse_urls(envelope).map_err(|e| {
            warn!(error = %e, "QQDDM refused conversion");
            e
        })?;
        let image = self.fetch(&urls[0]).await?;
        info!(result_url = %urls[0], result_bytes = image.len(), "QQDDM conversion completed");
        Ok(ConversionResult::Bytes(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(code: i64, msg: &str, extra: Option<&str>) -> ProcessResponse {
        ProcessResponse {
            code,
            msg: msg.to_string(),
            extra: extra.map(str::to_string),
        }
    }

    #[test]
    fn test_request_shape() {
        let image = ImagePayload::new(vec![0xFF, 0xD8, 0xFF]).unwrap();
        let request = QqddmProvider::build_request(&image).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["busiId"], BUSI_ID);
        assert_eq!(json["images"][0], "/9j/");
        let extra: serde_json::Value =
            serde_json::from_str(json["extra"].as_str().unwrap()).unwrap();
        assert_eq!(extra["version"], 2);
        assert_eq!(extra["platform"], "web");
        assert!(extra["data_report"]["parent_trace_id"].is_string());
    }

    #[test]
    fn test_sign_covers_origin_body_length_and_salt() {
        // md5("https://h5.tu.qq.com" + "2" + "HQ31X02e")
        assert_eq!(sign("{}"), "4e7ca5398e3b31d429f976c503ea1424");
        // 只与长度有关
        assert_eq!(sign(r#"{"busiId":"x"}"#), sign(r#"{"busiId":"y"}"#));
        assert_eq!(sign(r#"{"busiId":"x"}"#), "94ec185deae3f39ffc86120166daa1f2");
    }

    #[test]
    fn test_parse_urls_success() {
        let urls = QqddmProvider::parse_urls(envelope(
            0,
            "",
            Some(r#"{"img_urls":["https://a/1.jpg","https://a/2.jpg"]}"#),
        ))
        .unwrap();
        assert_eq!(urls, vec!["https://a/1.jpg", "https://a/2.jpg"]);
    }

    #[test]
    fn test_parse_urls_illegal_picture() {
        let err = QqddmProvider::parse_urls(envelope(1001, "no face", None)).unwrap_err();
        assert!(err.is_illegal_picture());
    }

    #[test]
    fn test_parse_urls_other_code() {
        let err = QqddmProvider::parse_urls(envelope(2111, "volume limit", None)).unwrap_err();
        assert!(matches!(err, ConversionError::Provider { code: 2111, .. }));
    }

    #[test]
    fn test_parse_urls_bad_extra() {
        let err = QqddmProvider::parse_urls(envelope(0, "", Some("not json"))).unwrap_err();
        assert!(matches!(err, ConversionError::MalformedResponse(_)));
        let err = QqddmProvider::parse_urls(envelope(0, "", Some(r#"{"img_urls":[]}"#))).unwrap_err();
        assert!(matches!(err, ConversionError::MalformedResponse(_)));
    }

    #[test]
    fn test_invalid_proxy_is_config_error() {
        let result = QqddmProvider::new(DEFAULT_QQDDM_URL, Some("::not a proxy::"));
        assert!(matches!(result, Err(ConversionError::Config(_))));
    }
}
