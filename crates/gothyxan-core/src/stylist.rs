//! Outfit generation orchestration.

use serde_json::Value;

use crate::backend::{BackendService, OutfitRequest, RefreshInvoker};
use crate::{ChatSession, Error, Outfit, Result};

/// Tracing target for outfit orchestration.
pub const TRACING_TARGET: &str = "gothyxan_core::stylist";

/// Generates and saves outfits on behalf of a chat.
///
/// Every backend call runs through a [`RefreshInvoker`], so an expired
/// access token is renewed transparently and the chat's session replaced.
#[derive(Debug, Clone)]
pub struct Stylist {
    backend: BackendService,
    invoker: RefreshInvoker,
}

impl Stylist {
    /// Creates a stylist on top of `backend`.
    pub fn new(backend: BackendService) -> Self {
        let invoker = RefreshInvoker::new(backend.clone());
        Self { backend, invoker }
    }

    /// Generates an outfit from the chat's current preferences.
    ///
    /// On success the outfit becomes the chat's `last_outfit`. On failure the
    /// previous outfit is kept.
    pub async fn generate(&self, chat: &mut ChatSession) -> Result<Outfit> {
        let request = OutfitRequest::from(&chat.preferences);
        let backend = &self.backend;
        let request = &request;

        let outfit = self
            .invoker
            .invoke(&mut chat.session, move |token| async move {
                backend.generate_outfit(&token, request).await
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET,
            style = outfit.style().unwrap_or_default(),
            "Outfit generated"
        );

        chat.last_outfit = Some(outfit.clone());
        Ok(outfit)
    }

    /// Saves the chat's most recent outfit.
    pub async fn save(&self, chat: &mut ChatSession) -> Result<Value> {
        let Some(outfit) = chat.last_outfit.as_ref() else {
            return Err(Error::not_found().with_message("no outfit to save"));
        };

        let backend = &self.backend;
        let ack = self
            .invoker
            .invoke(&mut chat.session, move |token| async move {
                backend.save_outfit(&token, outfit).await
            })
            .await?;

        tracing::debug!(target: TRACING_TARGET, "Outfit saved");
        Ok(ack)
    }
}
