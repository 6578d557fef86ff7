//! Adapters from Telegram (teloxide) types to dbot_core types.
//! Depends only on teloxide and dbot_core type definitions.

use dbot_core::{
    Chat, Message, MessageDirection, MessageType, PhotoRef, ToCoreMessage, ToCoreUser, User,
};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Converts one Telegram photo size to a core [`PhotoRef`].
pub fn photo_ref(size: &teloxide::types::PhotoSize) -> PhotoRef {
    PhotoRef {
        file_id: size.file.id.to_string(),
        file_unique_id: size.file.unique_id.to_string(),
        width: size.width,
        height: size.height,
        file_size: size.file.size,
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
/// Photo captions land in `content`, so a captioned photo still reads as a photo message.
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let photos = self.photos();
        let message_type = if !photos.is_empty() {
            MessageType::Photo
        } else if self.0.text().is_some() {
            MessageType::Text
        } else {
            MessageType::Other
        };

        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    last_name: None,
                }),
            chat: Chat {
                id: self.0.chat.id.0,
                chat_type: format!("{:?}", self.0.chat.kind),
            },
            content: self
                .0
                .text()
                .or_else(|| self.0.caption())
                .unwrap_or("")
                .to_string(),
            message_type,
            photos,
            direction: MessageDirection::Incoming,
            created_at: chrono::Utc::now(),
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    fn photos(&self) -> Vec<PhotoRef> {
        self.0
            .photo()
            .map(|sizes| sizes.iter().map(photo_ref).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::{FileId, FileMeta, FileUniqueId, PhotoSize};

    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: Some("User".to_string()),
            username: Some("testuser".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("testuser".to_string()));
        assert_eq!(core_user.first_name, Some("Test".to_string()));
        assert_eq!(core_user.last_name, Some("User".to_string()));
    }

    #[test]
    fn test_photo_ref_copies_file_meta() {
        let size = PhotoSize {
            file: FileMeta {
                id: FileId("AgACAgIAAxkBAAIB".to_string()),
                unique_id: FileUniqueId("AQADuq0xG".to_string()),
                size: 48_213,
            },
            width: 800,
            height: 600,
        };

        let photo = photo_ref(&size);

        assert_eq!(photo.file_id, "AgACAgIAAxkBAAIB");
        assert_eq!(photo.file_unique_id, "AQADuq0xG");
        assert_eq!((photo.width, photo.height), (800, 600));
        assert_eq!(photo.file_size, 48_213);
    }
}
