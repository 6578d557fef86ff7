//! Bot abstraction for talking back to the user.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it via teloxide and tests substitute mocks.

use crate::error::Result;
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// A photo to send: raw bytes uploaded by the bot, or a URL the platform fetches itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingPhoto {
    Bytes(Vec<u8>),
    Url(String),
}

/// Status shown in the chat while a request is being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAction {
    UploadPhoto,
}

/// Abstraction for sending messages and fetching attachments. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends a reply to the given message (same chat).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
    /// Sends a photo with an optional caption.
    async fn send_photo(&self, chat: &Chat, photo: OutgoingPhoto, caption: Option<&str>)
        -> Result<()>;
    /// Shows a transient chat action (e.g. "sending photo...").
    async fn send_chat_action(&self, chat: &Chat, action: ChatAction) -> Result<()>;
    /// Downloads an attachment by its transport file id and returns the bytes.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>>;
}
