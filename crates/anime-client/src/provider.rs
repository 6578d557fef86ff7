//! Provider trait

use async_trait::async_trait;

use crate::error::ConversionError;
use crate::payload::{ConversionResult, ImagePayload};

/// 第三方风格迁移服务。一次调用转换一张图片，调用之间不保留状态。
#[async_trait]
pub trait ConversionProvider: Send + Sync {
    /// 日志与配置中使用的短名称（`qqddm`、`replicate`、`deepai`）
    fn name(&self) -> &'static str;

    /// 发送图片，返回转换后的图片或其 URL
    async fn convert(&self, image: &ImagePayload) -> Result<ConversionResult, ConversionError>;
}
