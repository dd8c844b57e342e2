//! Best-effort photo delivery with retry and fallbacks.

use std::sync::Arc;
use std::time::Duration;

use gothyxan_core::ChatId;

use crate::transport::{ChatTransport, Photo};

/// Tracing target for photo delivery.
const TRACING_TARGET: &str = "gothyxan_bot::render::delivery";

/// Album send attempts before falling back to single photos.
pub const PHOTO_ATTEMPTS: u32 = 3;

/// Base delay between album attempts, multiplied by the attempt number.
const RETRY_BACKOFF: Duration = Duration::from_millis(400);

/// Sends outfit photos, never failing the surrounding handler.
///
/// The album is tried [`PHOTO_ATTEMPTS`] times with a growing delay. After
/// that the first photo is sent alone, and if that fails too the backend
/// placeholder image is sent with the same caption.
#[derive(Clone)]
pub struct PhotoDelivery {
    transport: Arc<dyn ChatTransport>,
    placeholder_url: String,
}

impl PhotoDelivery {
    pub fn new(transport: Arc<dyn ChatTransport>, placeholder_url: impl Into<String>) -> Self {
        Self {
            transport,
            placeholder_url: placeholder_url.into(),
        }
    }

    /// Returns true when any photo reached the chat.
    pub async fn deliver(&self, chat_id: ChatId, photos: &[Photo]) -> bool {
        let Some(first) = photos.first() else {
            return false;
        };

        let album: Vec<Photo> = photos
            .iter()
            .enumerate()
            .map(|(index, photo)| Photo {
                url: photo.url.clone(),
                caption: photo.caption.clone().filter(|_| index == 0),
            })
            .collect();

        for attempt in 1..=PHOTO_ATTEMPTS {
            match self.transport.send_media_group(chat_id, &album).await {
                Ok(()) => return true,
                Err(error) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        chat_id = %chat_id,
                        attempt,
                        error = %error,
                        "Failed to send outfit photo group"
                    );
                }
            }

            if attempt < PHOTO_ATTEMPTS {
                tokio::time::sleep(RETRY_BACKOFF * attempt).await;
            }
        }

        let caption = first.caption.as_deref();
        for url in [first.url.as_str(), self.placeholder_url.as_str()] {
            match self.transport.send_photo(chat_id, url, caption).await {
                Ok(()) => return true,
                Err(error) => {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        chat_id = %chat_id,
                        url,
                        error = %error,
                        "Failed to send fallback outfit photo"
                    );
                }
            }
        }

        false
    }
}
