//! # dbot-core
//!
//! Core types and traits for the Telegram bot: [`Bot`], [`Handler`], message, photo and user types,
//! and tracing initialization. Transport-agnostic; used by dbot-telegram, handler-chain and the handlers.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, ChatAction, OutgoingPhoto};
pub use error::{DbotError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageDirection, MessageType, PhotoRef,
    ToCoreMessage, ToCoreUser, User,
};
