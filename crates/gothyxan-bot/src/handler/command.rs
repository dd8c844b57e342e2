//! Slash commands and quick-mode text.

use gothyxan_core::{ChatId, LuxuryToggle, RequestPreferences, Result, SharedChatSession};
use teloxide::utils::command::BotCommands;

use super::{BotState, Sender, TRACING_TARGET};
use crate::render::HELP_TEXT;

/// Commands understood by the bot.
#[derive(Debug, Clone, PartialEq, Eq, BotCommands)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "log in and show help.")]
    Start,
    #[command(description = "set the outfit style, e.g. /setstyle streetwear.")]
    SetStyle(String),
    #[command(description = "set the occasion, e.g. /setoccasion date.")]
    SetOccasion(String),
    #[command(description = "set the city used for weather, e.g. /setcity London.")]
    SetCity(String),
    #[command(description = "cheaper, premium or custom <min> <max>.")]
    Budget(String),
    #[command(description = "on or off.")]
    Luxury(String),
    #[command(description = "show the current request.")]
    State,
    #[command(description = "generate an outfit.")]
    Generate,
}

/// Handles a slash command.
pub async fn handle_command(state: &BotState, sender: &Sender, command: Command) -> Result<()> {
    let chat_id = sender.chat_id;
    tracing::debug!(target: TRACING_TARGET, chat_id = %chat_id, ?command, "Command received");

    let session = match state.session(sender).await {
        Ok(session) => session,
        Err(error) => return state.report(chat_id, error).await,
    };

    match command {
        Command::Start => state.reply(chat_id, HELP_TEXT).await,
        Command::Generate => state.generate_and_send(chat_id, &session).await,
        Command::SetStyle(args) => {
            update(state, chat_id, &session, |preferences| {
                let style = preferences.set_style(&args)?;
                Ok(format!("Style set to: {style}"))
            })
            .await
        }
        Command::SetOccasion(args) => {
            update(state, chat_id, &session, |preferences| {
                let occasion = preferences.set_occasion(&args)?;
                Ok(format!("Occasion set to: {occasion}"))
            })
            .await
        }
        Command::SetCity(args) => {
            update(state, chat_id, &session, |preferences| {
                let city = preferences.set_city(&args)?;
                Ok(format!("City set to: {city}"))
            })
            .await
        }
        Command::Budget(args) => {
            update(state, chat_id, &session, |preferences| {
                preferences.apply_budget_input(&args)?;
                Ok(format!("Budget set: {}", preferences.budget_summary()))
            })
            .await
        }
        Command::Luxury(args) => {
            update(state, chat_id, &session, |preferences| {
                preferences.set_luxury(LuxuryToggle::parse(&args)?);
                let mode = if preferences.luxury_only { "enabled" } else { "disabled" };
                Ok(format!("Luxury mode: {mode}"))
            })
            .await
        }
        Command::State => {
            update(state, chat_id, &session, |preferences| {
                let json = serde_json::to_string_pretty(preferences)?;
                Ok(format!("Current request:\n{json}"))
            })
            .await
        }
    }
}

/// Applies `mutate` under the chat lock and replies with its outcome.
async fn update<F>(
    state: &BotState,
    chat_id: ChatId,
    session: &SharedChatSession,
    mutate: F,
) -> Result<()>
where
    F: FnOnce(&mut RequestPreferences) -> Result<String>,
{
    let outcome = mutate(&mut session.lock().await.preferences);

    match outcome {
        Ok(text) => state.reply(chat_id, &text).await,
        Err(error) => state.report(chat_id, error).await,
    }
}

/// Handles plain text: the text becomes the style and an outfit is generated.
pub async fn handle_text(state: &BotState, sender: &Sender, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }

    let chat_id = sender.chat_id;
    let session = match state.session(sender).await {
        Ok(session) => session,
        Err(error) => return state.report(chat_id, error).await,
    };

    let updated = session.lock().await.preferences.set_style(text).map(drop);
    if let Err(error) = updated {
        return state.report(chat_id, error).await;
    }

    state.generate_and_send(chat_id, &session).await
}
