//! Inline keyboard callbacks.

use gothyxan_core::{BudgetAdjustment, ErrorKind, Result};
use strum::{Display, EnumString};

use super::{BotState, GENERIC_FAILURE, Sender, TRACING_TARGET};
use crate::render;
use crate::transport::TextOptions;

/// Action encoded in an outfit keyboard button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum CallbackAction {
    #[strum(serialize = "action:regenerate")]
    Regenerate,
    #[strum(serialize = "action:save")]
    Save,
    #[strum(serialize = "action:links")]
    Links,
    #[strum(serialize = "budget:cheaper")]
    Cheaper,
    #[strum(serialize = "budget:premium")]
    Premium,
}

impl CallbackAction {
    fn adjustment(self) -> Option<BudgetAdjustment> {
        match self {
            Self::Cheaper => Some(BudgetAdjustment::Cheaper),
            Self::Premium => Some(BudgetAdjustment::Premium),
            _ => None,
        }
    }
}

/// Handles a callback query; unknown data is ignored.
pub async fn handle_callback(
    state: &BotState,
    sender: &Sender,
    callback_id: &str,
    data: Option<&str>,
) -> Result<()> {
    let chat_id = sender.chat_id;
    let Some(action) = data.and_then(|data| data.parse::<CallbackAction>().ok()) else {
        tracing::debug!(target: TRACING_TARGET, chat_id = %chat_id, ?data, "Ignoring callback");
        return Ok(());
    };

    let session = match state.session(sender).await {
        Ok(session) => session,
        Err(error) => {
            state
                .transport
                .answer_callback(callback_id, GENERIC_FAILURE, true)
                .await?;
            return state.report(chat_id, error).await;
        }
    };

    match action {
        CallbackAction::Regenerate | CallbackAction::Cheaper | CallbackAction::Premium => {
            if let Some(adjustment) = action.adjustment() {
                session.lock().await.preferences.adjust(adjustment);
            }

            state
                .transport
                .answer_callback(callback_id, "Regenerating...", false)
                .await?;
            state.generate_and_send(chat_id, &session).await
        }
        CallbackAction::Save => {
            let saved = {
                let mut chat = session.lock().await;
                state.stylist.save(&mut chat).await
            };

            let (text, alert) = match saved {
                Ok(_) => ("Outfit saved", false),
                Err(error) if error.kind == ErrorKind::NotFound => ("No outfit to save", true),
                Err(error) => {
                    tracing::error!(
                        target: TRACING_TARGET,
                        chat_id = %chat_id,
                        kind = %error.kind,
                        error = %error,
                        "Saving outfit failed"
                    );
                    (GENERIC_FAILURE, true)
                }
            };

            state.transport.answer_callback(callback_id, text, alert).await
        }
        CallbackAction::Links => {
            let links = {
                let chat = session.lock().await;
                chat.last_outfit.as_ref().map(render::format_links)
            };

            match links {
                None => {
                    state
                        .transport
                        .answer_callback(callback_id, "No outfit yet", true)
                        .await
                }
                Some(None) => {
                    state
                        .transport
                        .answer_callback(callback_id, "No links available", true)
                        .await
                }
                Some(Some(text)) => {
                    state
                        .transport
                        .send_text(chat_id, &text, TextOptions::html())
                        .await?;
                    state
                        .transport
                        .answer_callback(callback_id, "Links sent", false)
                        .await
                }
            }
        }
    }
}
