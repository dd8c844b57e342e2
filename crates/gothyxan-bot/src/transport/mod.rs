//! Outbound chat transport.
//!
//! Handlers only talk to a [`ChatTransport`]; the Telegram implementation
//! lives in [`telegram`] and tests use [`RecordingTransport`].

#[cfg(test)]
mod recording;
mod telegram;

use gothyxan_core::{ChatId, Result};

#[cfg(test)]
pub use self::recording::{RecordingTransport, Sent};
pub use self::telegram::TelegramTransport;

/// Tracing target for transport operations.
pub const TRACING_TARGET: &str = "gothyxan_bot::transport";

/// One inline keyboard button carrying callback data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub text: String,
    pub data: String,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: data.into(),
        }
    }
}

/// Inline keyboard laid out in rows.
pub type Keyboard = Vec<Vec<KeyboardButton>>;

/// Formatting options for a text message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Parse the text as Telegram HTML.
    pub html: bool,
    /// Suppress link previews.
    pub disable_preview: bool,
    /// Inline keyboard attached below the message.
    pub keyboard: Option<Keyboard>,
}

impl TextOptions {
    /// Plain text without markup.
    pub fn plain() -> Self {
        Self::default()
    }

    /// HTML text with link previews disabled.
    pub fn html() -> Self {
        Self {
            html: true,
            disable_preview: true,
            keyboard: None,
        }
    }

    #[must_use]
    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Photo addressed by URL with an optional HTML caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub url: String,
    pub caption: Option<String>,
}

/// Outbound side of a chat platform.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a text message.
    async fn send_text(&self, chat_id: ChatId, text: &str, options: TextOptions) -> Result<()>;

    /// Sends several photos as one album.
    async fn send_media_group(&self, chat_id: ChatId, photos: &[Photo]) -> Result<()>;

    /// Sends a single photo with an HTML caption.
    async fn send_photo(&self, chat_id: ChatId, url: &str, caption: Option<&str>) -> Result<()>;

    /// Acknowledges a callback query, optionally as an alert.
    async fn answer_callback(&self, callback_id: &str, text: &str, alert: bool) -> Result<()>;
}
