//! In-memory transport capturing everything handlers send.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use gothyxan_core::{ChatId, Error, Result};

use super::{ChatTransport, Photo, TextOptions};

/// One outbound call captured by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        chat_id: ChatId,
        text: String,
        options: TextOptions,
    },
    MediaGroup {
        chat_id: ChatId,
        photos: Vec<Photo>,
    },
    Photo {
        chat_id: ChatId,
        url: String,
        caption: Option<String>,
    },
    Callback {
        callback_id: String,
        text: String,
        alert: bool,
    },
}

#[derive(Default)]
struct RecordingState {
    sent: Vec<Sent>,
    media_failures: usize,
    photo_failures: VecDeque<bool>,
}

/// Transport recording every call, with scriptable photo failures.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `count` media group sends fail.
    pub fn fail_media_groups(&self, count: usize) {
        self.state().media_failures = count;
    }

    /// Scripts the outcome of upcoming single photo sends; `true` fails.
    pub fn fail_photos(&self, outcomes: impl IntoIterator<Item = bool>) {
        self.state().photo_failures.extend(outcomes);
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<Sent> {
        self.state().sent.clone()
    }

    /// Text messages sent so far.
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Callback answers as `(text, alert)`.
    pub fn answers(&self) -> Vec<(String, bool)> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Callback { text, alert, .. } => Some((text, alert)),
                _ => None,
            })
            .collect()
    }

    fn state(&self) -> MutexGuard<'_, RecordingState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(&self, chat_id: ChatId, text: &str, options: TextOptions) -> Result<()> {
        self.state().sent.push(Sent::Text {
            chat_id,
            text: text.to_owned(),
            options,
        });
        Ok(())
    }

    async fn send_media_group(&self, chat_id: ChatId, photos: &[Photo]) -> Result<()> {
        let mut state = self.state();
        state.sent.push(Sent::MediaGroup {
            chat_id,
            photos: photos.to_vec(),
        });

        if state.media_failures > 0 {
            state.media_failures -= 1;
            return Err(Error::network_error().with_message("media group rejected"));
        }
        Ok(())
    }

    async fn send_photo(&self, chat_id: ChatId, url: &str, caption: Option<&str>) -> Result<()> {
        let mut state = self.state();
        state.sent.push(Sent::Photo {
            chat_id,
            url: url.to_owned(),
            caption: caption.map(str::to_owned),
        });

        if state.photo_failures.pop_front().unwrap_or(false) {
            return Err(Error::network_error().with_message("photo rejected"));
        }
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: &str, alert: bool) -> Result<()> {
        self.state().sent.push(Sent::Callback {
            callback_id: callback_id.to_owned(),
            text: text.to_owned(),
            alert,
        });
        Ok(())
    }
}
