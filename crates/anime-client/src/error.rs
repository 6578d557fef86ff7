//! Provider 错误类型

use thiserror::Error;

/// 转换一张图片时可能出现的所有错误。
///
/// 除 [`ConversionError::IllegalPicture`] 外，调用方一律记录日志并提示用户稍后重试。
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Empty image payload")]
    EmptyImage,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Picture rejected by provider: {0}")]
    IllegalPicture(String),

    #[error("Provider error {code}: {message}")]
    Provider { code: i64, message: String },

    #[error("Invalid provider configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    /// 同一张图片重试无意义时为 true，用户应换一张
    pub fn is_illegal_picture(&self) -> bool {
        matches!(self, ConversionError::IllegalPicture(_))
    }
}
