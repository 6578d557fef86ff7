//! Integration tests for [`handler_chain::HandlerChain`].
//!
//! Covers: before/after hooks, before stopping the chain, Stop/Reply ending the handle phase,
//! ordering of hooks across handlers, and error propagation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use dbot_core::{
    Chat, DbotError, Handler, HandlerResponse, Message, MessageDirection, MessageType, PhotoRef,
    User,
};
use handler_chain::HandlerChain;

fn create_photo_message() -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: String::new(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        message_type: MessageType::Photo,
        photos: vec![PhotoRef {
            file_id: "file-1".to_string(),
            file_unique_id: "unique-1".to_string(),
            width: 640,
            height: 480,
            file_size: 1024,
        }],
        direction: MessageDirection::Incoming,
        created_at: Utc::now(),
    }
}

/// Records every hook call as "<phase>_<name>" and answers handle() with a fixed response.
struct RecordingHandler {
    name: &'static str,
    response: HandlerResponse,
    allow: bool,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingHandler {
    fn new(name: &'static str, response: HandlerResponse, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name,
            response,
            allow: true,
            log,
        }
    }

    fn blocking(name: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            allow: false,
            ..Self::new(name, HandlerResponse::Continue, log)
        }
    }
}

#[async_trait::async_trait]
impl Handler for RecordingHandler {
    async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
        self.log.lock().unwrap().push(format!("before_{}", self.name));
        Ok(self.allow)
    }

    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.log.lock().unwrap().push(format!("handle_{}", self.name));
        Ok(self.response.clone())
    }

    async fn after(&self, _message: &Message, response: &HandlerResponse) -> dbot_core::Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("after_{}:{:?}", self.name, response));
        Ok(())
    }
}

#[tokio::test]
async fn test_empty_chain_continues() {
    let chain = HandlerChain::new();
    assert!(chain.is_empty());
    let result = chain.handle(&create_photo_message()).await.unwrap();
    assert_eq!(result, HandlerResponse::Continue);
}

/// Hooks run before in order, handle in order, after in reverse; Continue everywhere.
#[tokio::test]
async fn test_hooks_run_in_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(RecordingHandler::new(
            "first",
            HandlerResponse::Continue,
            log.clone(),
        )))
        .add_handler(Arc::new(RecordingHandler::new(
            "second",
            HandlerResponse::Ignore,
            log.clone(),
        )));
    assert_eq!(chain.len(), 2);

    let result = chain.handle(&create_photo_message()).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "before_first",
            "before_second",
            "handle_first",
            "handle_second",
            "after_second:Continue",
            "after_first:Continue",
        ]
    );
}

/// A before() returning false stops everything; no handle, no after.
#[tokio::test]
async fn test_before_false_stops_chain() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(RecordingHandler::blocking("gate", log.clone())))
        .add_handler(Arc::new(RecordingHandler::new(
            "relay",
            HandlerResponse::Stop,
            log.clone(),
        )));

    let result = chain.handle(&create_photo_message()).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert_eq!(*log.lock().unwrap(), vec!["before_gate"]);
}

/// Stop from a handler skips later handlers' handle(), and every after() sees Stop.
#[tokio::test]
async fn test_stop_skips_later_handlers() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(RecordingHandler::new(
            "relay",
            HandlerResponse::Stop,
            log.clone(),
        )))
        .add_handler(Arc::new(RecordingHandler::new(
            "fallback",
            HandlerResponse::Continue,
            log.clone(),
        )));

    let result = chain.handle(&create_photo_message()).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    let log = log.lock().unwrap();
    assert!(!log.contains(&"handle_fallback".to_string()));
    assert!(log.contains(&"after_fallback:Stop".to_string()));
    assert!(log.contains(&"after_relay:Stop".to_string()));
}

/// Reply ends the handle phase and is passed to after().
#[tokio::test]
async fn test_reply_is_passed_to_after() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let chain = HandlerChain::new().add_handler(Arc::new(RecordingHandler::new(
        "help",
        HandlerResponse::Reply("help text".to_string()),
        log.clone(),
    )));

    let result = chain.handle(&create_photo_message()).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("help text".to_string()));
    assert!(log
        .lock()
        .unwrap()
        .contains(&"after_help:Reply(\"help text\")".to_string()));
}

/// An Err from handle() propagates to the caller and after() hooks do not run.
#[tokio::test]
async fn test_handler_error_propagates() {
    struct FailingHandler;

    #[async_trait::async_trait]
    impl Handler for FailingHandler {
        async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
            Err(DbotError::Bot("send failed".to_string()))
        }
    }

    struct AfterCounter(Arc<AtomicUsize>);

    #[async_trait::async_trait]
    impl Handler for AfterCounter {
        async fn after(&self, _message: &Message, _response: &HandlerResponse) -> dbot_core::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    let after_count = Arc::new(AtomicUsize::new(0));
    let chain = HandlerChain::new()
        .add_handler(Arc::new(AfterCounter(after_count.clone())))
        .add_handler(Arc::new(FailingHandler));

    let result = chain.handle(&create_photo_message()).await;

    assert!(matches!(result, Err(DbotError::Bot(_))));
    assert_eq!(after_count.load(Ordering::SeqCst), 0);
}
