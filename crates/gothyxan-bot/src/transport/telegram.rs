//! Telegram transport built on teloxide.

use gothyxan_core::{ChatId, Error, ErrorKind, Result};
use teloxide::payloads::setters::*;
use teloxide::requests::Requester;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputMedia, InputMediaPhoto,
    LinkPreviewOptions, ParseMode,
};
use teloxide::{Bot, RequestError};
use url::Url;

use super::{ChatTransport, Keyboard, Photo, TRACING_TARGET, TextOptions};

/// [`ChatTransport`] sending through the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl std::fmt::Debug for TelegramTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramTransport").finish_non_exhaustive()
    }
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn telegram_chat(chat_id: ChatId) -> teloxide::types::ChatId {
    teloxide::types::ChatId(chat_id.into())
}

fn transport_error(error: RequestError) -> Error {
    let kind = match &error {
        RequestError::Network(e) if e.is_timeout() => ErrorKind::Timeout,
        RequestError::Network(_) | RequestError::Io(_) => ErrorKind::NetworkError,
        RequestError::InvalidJson { .. } => ErrorKind::Serialization,
        _ => ErrorKind::Unknown,
    };

    Error::from_source(kind, error).with_message("Telegram request failed")
}

fn photo_url(url: &str) -> Result<InputFile> {
    let url = Url::parse(url).map_err(|e| {
        Error::from_source(ErrorKind::InvalidInput, e).with_message(format!("invalid photo URL '{url}'"))
    })?;
    Ok(InputFile::url(url))
}

fn inline_keyboard(keyboard: Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.into_iter().map(|row| {
        row.into_iter()
            .map(|button| InlineKeyboardButton::callback(button.text, button.data))
            .collect::<Vec<_>>()
    }))
}

fn disabled_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

#[async_trait::async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(&self, chat_id: ChatId, text: &str, options: TextOptions) -> Result<()> {
        let mut request = self.bot.send_message(telegram_chat(chat_id), text);
        if options.html {
            request = request.parse_mode(ParseMode::Html);
        }
        if options.disable_preview {
            request = request.link_preview_options(disabled_preview());
        }
        if let Some(keyboard) = options.keyboard {
            request = request.reply_markup(inline_keyboard(keyboard));
        }

        request.await.map_err(transport_error)?;
        Ok(())
    }

    async fn send_media_group(&self, chat_id: ChatId, photos: &[Photo]) -> Result<()> {
        let media = photos
            .iter()
            .map(|photo| {
                let mut media = InputMediaPhoto::new(photo_url(&photo.url)?);
                if let Some(caption) = &photo.caption {
                    media = media.caption(caption.clone()).parse_mode(ParseMode::Html);
                }
                Ok(InputMedia::Photo(media))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::trace!(
            target: TRACING_TARGET,
            chat_id = %chat_id,
            count = media.len(),
            "Sending media group"
        );

        self.bot
            .send_media_group(telegram_chat(chat_id), media)
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn send_photo(&self, chat_id: ChatId, url: &str, caption: Option<&str>) -> Result<()> {
        let mut request = self.bot.send_photo(telegram_chat(chat_id), photo_url(url)?);
        if let Some(caption) = caption {
            request = request.caption(caption).parse_mode(ParseMode::Html);
        }

        request.await.map_err(transport_error)?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: &str, alert: bool) -> Result<()> {
        self.bot
            .answer_callback_query(callback_id)
            .text(text)
            .show_alert(alert)
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}
