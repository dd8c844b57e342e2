//! Update routing.
//!
//! ```text
//! Update
//! ├── Message
//! │   ├── /command       -> handle_command
//! │   └── text           -> handle_text
//! └── CallbackQuery      -> handle_callback
//! ```

use gothyxan_core::ChatId;
use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::User;

use crate::handler::{
    BotState, Command, Sender, TRACING_TARGET, handle_callback, handle_command, handle_text,
};

/// Builds the dispatcher handler tree.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    let messages = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(on_command),
        )
        .branch(
            dptree::filter_map(|msg: Message| msg.text().map(str::to_owned)).endpoint(on_text),
        );

    let callbacks = Update::filter_callback_query().endpoint(on_callback);

    dptree::entry().branch(messages).branch(callbacks)
}

async fn on_command(state: BotState, msg: Message, command: Command) -> anyhow::Result<()> {
    handle_command(&state, &message_sender(&msg), command).await?;
    Ok(())
}

async fn on_text(state: BotState, msg: Message, text: String) -> anyhow::Result<()> {
    handle_text(&state, &message_sender(&msg), &text).await?;
    Ok(())
}

async fn on_callback(state: BotState, query: CallbackQuery) -> anyhow::Result<()> {
    let Some(message) = query.message.as_ref() else {
        tracing::debug!(
            target: TRACING_TARGET,
            callback_id = %query.id,
            "Ignoring callback without a message"
        );
        return Ok(());
    };

    let sender = sender(ChatId(message.chat().id.0), Some(&query.from));
    let callback_id = query.id.to_string();
    handle_callback(&state, &sender, &callback_id, query.data.as_deref()).await?;
    Ok(())
}

fn message_sender(msg: &Message) -> Sender {
    sender(ChatId(msg.chat.id.0), msg.from.as_ref())
}

/// Identifies the user behind an update, falling back to the chat itself.
fn sender(chat_id: ChatId, user: Option<&User>) -> Sender {
    Sender {
        chat_id,
        user_id: user.map_or(chat_id.0, |user| user.id.0 as i64),
        username: user.and_then(|user| user.username.clone()),
    }
}
