//! Provider 调用共用的响应处理

use serde::de::DeserializeOwned;

use crate::error::ConversionError;

/// 错误与日志中保留的响应体最大字符数
const BODY_EXCERPT_CHARS: usize = 200;

/// Masks an API key for logging: first 7 + "***" + last 4 chars; keys of 11 chars or fewer become "***".
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

pub(crate) fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

/// 2xx 原样返回；其余状态码转为带响应体摘要的 [`ConversionError::Status`]
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ConversionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ConversionError::Status {
        status: status.as_u16(),
        body: excerpt(&body),
    })
}

/// 按 JSON 解析响应体；解析失败为 [`ConversionError::MalformedResponse`]
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ConversionError> {
    let text = response.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| ConversionError::MalformedResponse(format!("{}: {}", e, excerpt(&text))))
}
