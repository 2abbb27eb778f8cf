//! Webhook lifecycle: purge stale registrations, register fresh ones.
//!
//! Purging is scoped by name, so webhooks owned by other bots on the same
//! account are left alone.

use reqwest::Url;
use tracing::{info, instrument, warn};

use crate::{
    base::{
        error::BotError,
        types::{NewWebhook, Webhook, WebhookEvent, WebhookResource},
    },
    service::chat::ChatClient,
};

/// Path the platform posts callbacks to, relative to the webhook base URL.
pub const EVENTS_PATH: &str = "/events";

/// The (resource, event) pairs the bot subscribes to, in registration order.
pub const SUBSCRIPTIONS: [(WebhookResource, WebhookEvent); 2] = [
    (WebhookResource::Messages, WebhookEvent::Created),
    (WebhookResource::AttachmentActions, WebhookEvent::Created),
];

/// How `purge_named` treats a webhook that cannot be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purge {
    /// Stop at the first failed delete and report it.
    Strict,
    /// Log the failed delete and move on to the next webhook.
    BestEffort,
}

/// Delete every webhook registered under `name`.
///
/// Returns the number of webhooks deleted. Failing to list is always an
/// error; a failed delete is an error only in [`Purge::Strict`] mode.
#[instrument(skip(chat))]
pub async fn purge_named(chat: &ChatClient, name: &str, mode: Purge) -> Result<usize, BotError> {
    let webhooks = chat.list_webhooks().await.map_err(|e| BotError::registration("Failed to list webhooks", e))?;

    let mut deleted = 0;

    for webhook in webhooks.iter().filter(|w| w.name == name) {
        info!("Deleting webhook `{}` ({} {}) -> {}", webhook.name, webhook.resource, webhook.event, webhook.target_url);

        match chat.delete_webhook(&webhook.id).await {
            Ok(()) => deleted += 1,
            Err(err) if mode == Purge::Strict => {
                return Err(BotError::registration(&format!("Failed to delete webhook `{}`", webhook.id), err));
            }
            Err(err) => warn!("Failed to delete webhook `{}`: {:#}", webhook.id, err),
        }
    }

    Ok(deleted)
}

/// Register one webhook per subscription under `name`, all targeting the events endpoint.
///
/// A failure leaves any webhook already created in place; rerunning the
/// full purge and register cycle cleans it up.
#[instrument(skip(chat))]
pub async fn register(chat: &ChatClient, base_url: &Url, name: &str) -> Result<Vec<Webhook>, BotError> {
    let target_url = events_url(base_url)?;

    let mut created = Vec::with_capacity(SUBSCRIPTIONS.len());

    for (resource, event) in SUBSCRIPTIONS {
        info!("Creating {} {} webhook ...", resource, event);

        let request = NewWebhook {
            name: name.to_string(),
            target_url: target_url.to_string(),
            resource,
            event,
        };

        let webhook = chat
            .create_webhook(&request)
            .await
            .map_err(|e| BotError::registration(&format!("Failed to create {resource} {event} webhook"), e))?;

        info!("Webhook `{}` created ({}).", webhook.id, webhook.target_url);

        created.push(webhook);
    }

    Ok(created)
}

/// Join the events path onto the base URL; the path replaces any path the base carries.
pub fn events_url(base_url: &Url) -> Result<Url, BotError> {
    base_url
        .join(EVENTS_PATH)
        .map_err(|e| BotError::Configuration(format!("Cannot derive the events URL from `{base_url}`: {e}")))
}
