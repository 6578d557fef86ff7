//! 动漫化 Handler：下载照片 → 调用 provider → 发送结果

use anime_client::{ConversionError, ConversionProvider, ConversionResult, ImagePayload};
use async_trait::async_trait;
use dbot_core::{
    Bot as CoreBot, ChatAction, DbotError, Handler, HandlerError, HandlerResponse, Message,
    OutgoingPhoto, Result,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// --- 用户可见的消息 ---
pub const RESULT_CAPTION: &str = "Here is your anime-styled image!";
pub const MSG_ILLEGAL_PICTURE: &str =
    "The image is not valid for conversion. Please try another one.";
pub const MSG_CONVERSION_FAILED: &str = "An unexpected error occurred. Please try again later.";

/// 一次转发（relay）失败的原因
#[derive(Error, Debug)]
pub enum RelayError {
    /// 与消息平台交互失败（如下载照片）
    #[error(transparent)]
    Bot(#[from] DbotError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl RelayError {
    /// 展示给用户的文本；只有被 provider 拒绝的图片有单独提示
    pub fn user_message(&self) -> &'static str {
        match self {
            RelayError::Conversion(e) if e.is_illegal_picture() => MSG_ILLEGAL_PICTURE,
            _ => MSG_CONVERSION_FAILED,
        }
    }
}

/// 动漫化 Handler
///
/// 通过 [`ConversionProvider`] 转换照片并把结果发回聊天。非照片消息直接放行；
/// 转换失败时在聊天中提示并记录日志，不会让 handler chain 失败。
#[derive(Clone)]
pub struct AnimeConversionHandler {
    provider: Arc<dyn ConversionProvider>,
    bot: Arc<dyn CoreBot>,
}

impl AnimeConversionHandler {
    pub fn new(provider: Arc<dyn ConversionProvider>, bot: Arc<dyn CoreBot>) -> Self {
        Self { provider, bot }
    }

    /// 下载最大尺寸的照片并转换，原样返回 provider 的结果
    #[instrument(skip(self, message), fields(provider = self.provider.name()))]
    pub async fn relay(&self, message: &Message) -> std::result::Result<ConversionResult, RelayError> {
        let photo = message
            .largest_photo()
            .ok_or(DbotError::Handler(HandlerError::NoPhoto))?;

        let bytes = self.bot.download_file(&photo.file_id).await?;
        info!(
            file_id = %photo.file_id,
            width = photo.width,
            height = photo.height,
            bytes = bytes.len(),
            "Downloaded photo"
        );

        let payload = ImagePayload::new(bytes)?;
        let result = self.provider.convert(&payload).await?;
        Ok(result)
    }

    async fn deliver(&self, message: &Message, result: ConversionResult) -> Result<()> {
        let photo = match result {
            ConversionResult::Bytes(bytes) => OutgoingPhoto::Bytes(bytes),
            ConversionResult::Url(url) => OutgoingPhoto::Url(url),
        };
        self.bot
            .send_photo(&message.chat, photo, Some(RESULT_CAPTION))
            .await
    }

    /// 提示用户出错；发送失败只记录日志
    async fn send_fallback(&self, message: &Message, text: &str) {
        if let Err(e) = self.bot.send_message(&message.chat, text).await {
            error!(error = %e, chat_id = message.chat.id, "Failed to send fallback message");
        }
    }
}

#[async_trait]
impl Handler for AnimeConversionHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_photo() {
            return Ok(HandlerResponse::Continue);
        }

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            provider = self.provider.name(),
            "Processing photo conversion request"
        );

        if let Err(e) = self
            .bot
            .send_chat_action(&message.chat, ChatAction::UploadPhoto)
            .await
        {
            warn!(error = %e, "Failed to send chat action");
        }

        let result = match self.relay(message).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, user_id = message.user.id, "Photo conversion failed");
                self.send_fallback(message, e.user_message()).await;
                return Ok(HandlerResponse::Stop);
            }
        };

        if let Err(e) = self.deliver(message, result).await {
            error!(error = %e, user_id = message.user.id, "Failed to send converted photo");
            self.send_fallback(message, MSG_CONVERSION_FAILED).await;
            return Ok(HandlerResponse::Stop);
        }

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "Converted photo sent"
        );
        Ok(HandlerResponse::Stop)
    }
}
