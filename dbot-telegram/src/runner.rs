//! REPL runner: converts teloxide messages to core::Message and passes them to HandlerChain.
//! Each update runs in its own task; a failing chain is logged and answered with a generic error.

use anyhow::Result;
use dbot_core::{Bot as CoreBot, Message as CoreMessage, ToCoreMessage};
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Sent when the handler chain itself fails; conversion failures are answered by the relay.
pub const GLOBAL_ERROR_TEXT: &str = "An error occurred while processing your request.";

/// Runs the chain for one message. Errors never escape: they are logged and the chat gets [`GLOBAL_ERROR_TEXT`].
pub async fn dispatch(chain: &HandlerChain, reply_bot: &dyn CoreBot, message: &CoreMessage) {
    if let Err(e) = chain.handle(message).await {
        error!(
            error = %e,
            user_id = message.user.id,
            chat_id = message.chat.id,
            "Handler chain failed"
        );
        if let Err(send_err) = reply_bot.send_message(&message.chat, GLOBAL_ERROR_TEXT).await {
            error!(error = %send_err, chat_id = message.chat.id, "Failed to send error reply");
        }
    }
}

/// Starts the REPL with the given teloxide Bot and HandlerChain. `reply_bot` is used for the global error reply.
/// With `skip_updates`, updates queued while the bot was offline are dropped before polling starts.
#[instrument(skip(bot, handler_chain, reply_bot))]
pub async fn run_repl(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    reply_bot: Arc<dyn CoreBot>,
    skip_updates: bool,
) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(username = ?me.user.username, "Connected to Telegram"),
        Err(e) => warn!(error = %e, "get_me failed; continuing"),
    }

    if skip_updates {
        match bot.delete_webhook().drop_pending_updates(true).await {
            Ok(_) => info!("Dropped pending updates"),
            Err(e) => warn!(error = %e, "Failed to drop pending updates"),
        }
    }

    let chain = handler_chain;
    teloxide::repl(
        bot,
        move |_bot: Bot, msg: teloxide::types::Message| {
            let chain = chain.clone();
            let reply_bot = reply_bot.clone();

            async move {
                let core_msg = TelegramMessageWrapper(&msg).to_core();
                info!(
                    user_id = core_msg.user.id,
                    chat_id = core_msg.chat.id,
                    message_type = ?core_msg.message_type,
                    photo_sizes = core_msg.photos.len(),
                    "Received message"
                );

                tokio::spawn(async move {
                    dispatch(&chain, reply_bot.as_ref(), &core_msg).await;
                });

                Ok(())
            }
        },
    )
    .await;

    Ok(())
}
