//! Unit tests for LoggingHandler.

use super::{sample_message, sample_photo_message};
use crate::LoggingHandler;
use dbot_core::{Handler, HandlerResponse};

#[tokio::test]
async fn test_logging_handler_before_continues() {
    let h = LoggingHandler;
    assert!(h.before(&sample_message(1, "hello")).await.unwrap());
    assert!(h.before(&sample_photo_message(1, "")).await.unwrap());
}

#[tokio::test]
async fn test_logging_handler_handle_and_after_are_passive() {
    let h = LoggingHandler;
    let msg = sample_message(1, "hello");
    assert_eq!(h.handle(&msg).await.unwrap(), HandlerResponse::Continue);
    assert!(h.after(&msg, &HandlerResponse::Stop).await.is_ok());
}
