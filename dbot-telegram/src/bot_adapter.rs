//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, Chat, ChatAction, DbotError, OutgoingPhoto, Result};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile};

/// File name for photos uploaded from memory; Telegram uses it to guess the type.
const UPLOAD_FILE_NAME: &str = "anime.jpg";

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn bot_error(e: impl std::fmt::Display) -> DbotError {
    DbotError::Bot(e.to_string())
}

fn input_file(photo: OutgoingPhoto) -> Result<InputFile> {
    match photo {
        OutgoingPhoto::Bytes(bytes) => Ok(InputFile::memory(bytes).file_name(UPLOAD_FILE_NAME)),
        OutgoingPhoto::Url(url) => {
            let parsed = reqwest::Url::parse(&url)
                .map_err(|e| DbotError::InvalidUrl(format!("{}: {}", url, e)))?;
            Ok(InputFile::url(parsed))
        }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: &Chat,
        photo: OutgoingPhoto,
        caption: Option<&str>,
    ) -> Result<()> {
        let mut request = self.bot.send_photo(ChatId(chat.id), input_file(photo)?);
        if let Some(caption) = caption {
            request = request.caption(caption.to_string());
        }
        request.await.map_err(bot_error)?;
        Ok(())
    }

    async fn send_chat_action(&self, chat: &Chat, action: ChatAction) -> Result<()> {
        let action = match action {
            ChatAction::UploadPhoto => teloxide::types::ChatAction::UploadPhoto,
        };
        self.bot
            .send_chat_action(ChatId(chat.id), action)
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(FileId(file_id.to_string()))
            .await
            .map_err(bot_error)?;
        let mut buf = Vec::new();
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(bot_error)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_file_rejects_invalid_url() {
        let result = input_file(OutgoingPhoto::Url("not a url".to_string()));
        assert!(matches!(result, Err(DbotError::InvalidUrl(_))));
    }

    #[test]
    fn test_input_file_accepts_bytes_and_url() {
        assert!(input_file(OutgoingPhoto::Bytes(vec![1, 2, 3])).is_ok());
        assert!(input_file(OutgoingPhoto::Url("https://cdn.example.com/a.png".to_string())).is_ok());
    }
}
