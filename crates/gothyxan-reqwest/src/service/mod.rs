//! Backend provider implementation.
//!
//! This module implements the [`BackendProvider`] trait for [`ReqwestClient`].

use gothyxan_core::{BackendProvider, BackendSession, Outfit, OutfitRequest};
use serde::Serialize;
use serde_json::Value;

use crate::connect::{ReqwestClient, TRACING_TARGET};
use crate::error::Error;

const LOGIN_PATH: &str = "/auth/telegram/login";
const REFRESH_PATH: &str = "/auth/refresh";
const GENERATE_PATH: &str = "/outfits/generate";
const SAVE_PATH: &str = "/outfits/save";

/// Channel reported to the backend when saving outfits.
const SAVE_CHANNEL: &str = "TELEGRAM";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload<'a> {
    telegram_id: &'a str,
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bot_secret: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshPayload<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct SavePayload<'a> {
    channel: &'static str,
    outfit: &'a Outfit,
}

fn parse_session(value: Value) -> gothyxan_core::Result<BackendSession> {
    serde_json::from_value(value).map_err(|e| Error::Serde(e).into())
}

#[async_trait::async_trait]
impl BackendProvider for ReqwestClient {
    async fn login(
        &self,
        telegram_id: &str,
        username: Option<&str>,
    ) -> gothyxan_core::Result<BackendSession> {
        tracing::debug!(
            target: TRACING_TARGET,
            telegram_id,
            with_secret = self.config().effective_bot_secret().is_some(),
            "Logging in"
        );

        let payload = LoginPayload {
            telegram_id,
            username,
            bot_secret: self.config().effective_bot_secret(),
        };

        let value = self.post(LOGIN_PATH, &payload, None).await?;
        parse_session(value)
    }

    async fn refresh(&self, refresh_token: &str) -> gothyxan_core::Result<BackendSession> {
        let payload = RefreshPayload { refresh_token };
        let value = self.post(REFRESH_PATH, &payload, None).await?;
        parse_session(value)
    }

    async fn generate_outfit(
        &self,
        access_token: &str,
        request: &OutfitRequest,
    ) -> gothyxan_core::Result<Outfit> {
        let value = self
            .post(GENERATE_PATH, request, Some(access_token))
            .await?;
        Ok(Outfit::new(value))
    }

    async fn save_outfit(
        &self,
        access_token: &str,
        outfit: &Outfit,
    ) -> gothyxan_core::Result<Value> {
        let payload = SavePayload {
            channel: SAVE_CHANNEL,
            outfit,
        };

        Ok(self.post(SAVE_PATH, &payload, Some(access_token)).await?)
    }

    async fn close(&self) {
        ReqwestClient::close(self);
    }
}
