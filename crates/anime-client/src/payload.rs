//! 单次转换的请求与结果类型

use base64::Engine;

use crate::error::ConversionError;

/// 用户照片，保证非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    bytes: Vec<u8>,
    mime: &'static str,
}

impl ImagePayload {
    /// 包装下载到的字节；为空时返回 [`ConversionError::EmptyImage`]
    pub fn new(bytes: Vec<u8>) -> Result<Self, ConversionError> {
        if bytes.is_empty() {
            return Err(ConversionError::EmptyImage);
        }
        let mime = sniff_mime(&bytes);
        Ok(Self { bytes, mime })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 根据文件头猜测 MIME 类型；无法识别时为 `image/jpeg`（Telegram 照片均为 JPEG）
    pub fn mime(&self) -> &'static str {
        self.mime
    }

    /// 与 [`Self::mime`] 对应的扩展名（不含点）
    pub fn extension(&self) -> &'static str {
        match self.mime {
            "image/png" => "png",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// `data:<mime>;base64,<...>` 形式，Replicate 的文件输入可直接接受
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.to_base64())
    }
}

fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

/// Provider 的返回：转换后的图片本身，或指向它的 URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    Bytes(Vec<u8>),
    Url(String),
}
