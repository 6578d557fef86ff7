//! Message, direction and photo types for the core model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// Direction of the message (from user or from bot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// What the message carries. Only photos are converted; text may be a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Text,
    Photo,
    Other,
}

/// One size of a photo attachment. `file_id` is what the transport needs to download it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub file_id: String,
    pub file_unique_id: String,
    pub width: u32,
    pub height: u32,
    pub file_size: u32,
}

impl PhotoRef {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A single message with user, chat, text content (text or caption) and photo sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub message_type: MessageType,
    /// Every size the transport offers for the attached photo; empty for non-photo messages.
    pub photos: Vec<PhotoRef>,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Highest resolution photo size. On equal area the later entry wins (Telegram lists sizes ascending).
    pub fn largest_photo(&self) -> Option<&PhotoRef> {
        self.photos
            .iter()
            .enumerate()
            .max_by_key(|(i, p)| (p.area(), *i))
            .map(|(_, p)| p)
    }

    pub fn is_photo(&self) -> bool {
        self.message_type == MessageType::Photo && !self.photos.is_empty()
    }
}
