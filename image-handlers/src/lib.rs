//! # image-handlers
//!
//! 照片转发：把用户发来的照片交给配置的风格迁移 provider，再把结果发回同一聊天。

mod anime_conversion_handler;

pub use anime_conversion_handler::{
    AnimeConversionHandler, RelayError, MSG_CONVERSION_FAILED, MSG_ILLEGAL_PICTURE, RESULT_CAPTION,
};
