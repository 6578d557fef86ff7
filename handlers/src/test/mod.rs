mod logging_handler_test;

use chrono::Utc;
use dbot_core::{Chat, Message, MessageDirection, MessageType, PhotoRef, User};

pub(crate) fn sample_message(user_id: i64, content: &str) -> Message {
    Message {
        id: "msg-1".to_string(),
        user: User {
            id: user_id,
            username: Some("testuser".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 123,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: MessageType::Text,
        photos: Vec::new(),
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

pub(crate) fn sample_photo_message(user_id: i64, caption: &str) -> Message {
    Message {
        message_type: MessageType::Photo,
        photos: vec![PhotoRef {
            file_id: "photo-file".to_string(),
            file_unique_id: "photo-unique".to_string(),
            width: 1280,
            height: 720,
            file_size: 90_000,
        }],
        ..sample_message(user_id, caption)
    }
}
