//! Chat event handlers.
//!
//! Handlers resolve the chat's session, mutate its preferences and drive the
//! [`Stylist`]. Every backend or validation error is reported to the chat
//! here; only transport failures propagate to the dispatcher.

mod callback;
mod command;

use std::sync::Arc;

use gothyxan_core::{
    BackendService, ChatId, ChatSessionStore, Error, Result, SharedChatSession, Stylist,
};

pub use self::callback::{CallbackAction, handle_callback};
pub use self::command::{Command, handle_command, handle_text};
use crate::render::{self, PhotoDelivery};
use crate::transport::{ChatTransport, TextOptions};

/// Tracing target for chat event handling.
pub const TRACING_TARGET: &str = "gothyxan_bot::handler";

/// Reply sent when a request fails for reasons the user cannot fix.
pub const GENERIC_FAILURE: &str = "Something went wrong, please try again later.";

/// Who an event came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub chat_id: ChatId,
    pub user_id: i64,
    pub username: Option<String>,
}

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct BotState {
    store: ChatSessionStore,
    stylist: Stylist,
    transport: Arc<dyn ChatTransport>,
    photos: PhotoDelivery,
}

impl BotState {
    /// Creates handler state on top of `backend` and `transport`.
    ///
    /// `placeholder_url` is the last-resort image for photo delivery.
    pub fn new(
        backend: BackendService,
        transport: Arc<dyn ChatTransport>,
        placeholder_url: impl Into<String>,
    ) -> Self {
        Self {
            store: ChatSessionStore::new(backend.clone()),
            stylist: Stylist::new(backend),
            photos: PhotoDelivery::new(Arc::clone(&transport), placeholder_url),
            transport,
        }
    }

    /// Returns the session store.
    pub fn store(&self) -> &ChatSessionStore {
        &self.store
    }

    async fn session(&self, sender: &Sender) -> Result<SharedChatSession> {
        self.store
            .ensure_session(sender.chat_id, sender.user_id, sender.username.as_deref())
            .await
    }

    async fn reply(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.transport
            .send_text(chat_id, text, TextOptions::plain())
            .await
    }

    /// Tells the user why a request failed.
    ///
    /// Validation messages are shown verbatim; everything else is logged and
    /// replaced by [`GENERIC_FAILURE`].
    async fn report(&self, chat_id: ChatId, error: Error) -> Result<()> {
        if error.is_user_facing() {
            let message = error.message.as_deref().unwrap_or(GENERIC_FAILURE);
            return self.reply(chat_id, message).await;
        }

        tracing::error!(
            target: TRACING_TARGET,
            chat_id = %chat_id,
            kind = %error.kind,
            status = ?error.status,
            error = %error,
            "Request failed"
        );
        self.reply(chat_id, GENERIC_FAILURE).await
    }

    /// Generates an outfit for the chat and delivers text, keyboard and photos.
    async fn generate_and_send(&self, chat_id: ChatId, session: &SharedChatSession) -> Result<()> {
        let generated = {
            let mut chat = session.lock().await;
            self.stylist.generate(&mut chat).await
        };

        let outfit = match generated {
            Ok(outfit) => outfit,
            Err(error) => return self.report(chat_id, error).await,
        };

        let options = TextOptions::html().with_keyboard(render::outfit_keyboard());
        self.transport
            .send_text(chat_id, &render::format_outfit(&outfit), options)
            .await?;
        self.photos
            .deliver(chat_id, &render::collect_photos(&outfit))
            .await;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use gothyxan_core::MockBackend;

    use super::*;
    use crate::transport::RecordingTransport;

    pub const PLACEHOLDER: &str = "http://backend/api/media/placeholder?variant=medium";

    pub fn harness() -> (BotState, MockBackend, RecordingTransport) {
        let mock = MockBackend::new();
        let transport = RecordingTransport::new();
        let state = BotState::new(mock.service(), Arc::new(transport.clone()), PLACEHOLDER);
        (state, mock, transport)
    }

    pub fn sender(chat_id: i64) -> Sender {
        Sender {
            chat_id: ChatId(chat_id),
            user_id: chat_id * 10,
            username: Some("neo".to_owned()),
        }
    }
}
