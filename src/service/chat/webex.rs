//! Chat service integration over the Webex REST API.
//!
//! Every call is a single bearer-authenticated HTTPS request with a bounded
//! timeout. Non-success responses are turned into errors that carry the
//! status, the API's own message, and its tracking id for support cases.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Response, StatusCode,
    header::{HeaderMap, LINK},
};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, info, instrument};

use crate::base::{
    config::Config,
    types::{AttachmentAction, Message, NewMessage, NewWebhook, Person, Res, Room, Void, Webhook},
};

use super::{ChatClient, GenericChatClient};

// Extra methods on `ChatClient` applied by the webex implementation.

impl ChatClient {
    /// Creates a new Webex chat client.
    pub fn webex(config: &Config) -> Res<Self> {
        let client = WebexChatClient::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// A page of list results.
#[derive(Debug, Deserialize)]
struct Items<T> {
    items: Vec<T>,
}

/// The error body Webex returns alongside non-success statuses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    message: Option<String>,
    tracking_id: Option<String>,
}

/// Webex client implementation.
#[derive(Clone)]
struct WebexChatClient {
    access_token: String,
    base_url: String,
    http: reqwest::Client,
}

impl WebexChatClient {
    /// Create a new Webex chat client.
    #[instrument(name = "WebexChatClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = config.api_base_url.trim_end_matches('/').to_string();

        info!("Webex API root: {}", base_url);

        Ok(Self {
            access_token: config.access_token.clone(),
            base_url,
            http,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Res<(T, HeaderMap)> {
        let response = self.http.get(url).bearer_auth(&self.access_token).send().await?;
        let response = check(response).await?;
        let headers = response.headers().clone();

        Ok((response.json().await?, headers))
    }

    async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Res<T> {
        let (value, _) = self.get(&self.endpoint(path)).await?;
        Ok(value)
    }
}

#[async_trait]
impl GenericChatClient for WebexChatClient {
    #[instrument(skip(self))]
    async fn list_webhooks(&self) -> Res<Vec<Webhook>> {
        let mut webhooks = Vec::new();
        let mut next = Some(self.endpoint("webhooks?max=100"));

        while let Some(url) = next {
            let (page, headers): (Items<Webhook>, _) = self.get(&url).await?;
            webhooks.extend(page.items);
            next = next_link(&headers);
        }

        debug!("Listed {} webhooks", webhooks.len());

        Ok(webhooks)
    }

    #[instrument(skip(self))]
    async fn create_webhook(&self, webhook: &NewWebhook) -> Res<Webhook> {
        let response = self.http.post(self.endpoint("webhooks")).bearer_auth(&self.access_token).json(webhook).send().await?;

        Ok(check(response).await?.json().await?)
    }

    #[instrument(skip(self))]
    async fn delete_webhook(&self, webhook_id: &str) -> Void {
        let response = self.http.delete(self.endpoint(&format!("webhooks/{webhook_id}"))).bearer_auth(&self.access_token).send().await?;

        check(response).await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Res<Room> {
        self.get_one(&format!("rooms/{room_id}")).await
    }

    #[instrument(skip(self))]
    async fn get_message(&self, message_id: &str) -> Res<Message> {
        self.get_one(&format!("messages/{message_id}")).await
    }

    #[instrument(skip(self))]
    async fn get_person(&self, person_id: &str) -> Res<Person> {
        self.get_one(&format!("people/{person_id}")).await
    }

    #[instrument(skip(self))]
    async fn get_attachment_action(&self, action_id: &str) -> Res<AttachmentAction> {
        self.get_one(&format!("attachment/actions/{action_id}")).await
    }

    #[instrument(skip(self))]
    async fn create_message(&self, message: &NewMessage) -> Res<Message> {
        let response = self.http.post(self.endpoint("messages")).bearer_auth(&self.access_token).json(message).send().await?;

        Ok(check(response).await?.json().await?)
    }

    #[instrument(skip(self))]
    async fn get_me(&self) -> Res<Person> {
        self.get_one("people/me").await
    }
}

// Helpers.

/// Pass through success responses; turn anything else into an error.
async fn check(response: Response) -> Res<Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(api_error(status, &body))
}

/// Build an error from a non-success status and its body.
fn api_error(status: StatusCode, body: &str) -> anyhow::Error {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed.message.unwrap_or_else(|| body.trim().to_string());

    match parsed.tracking_id {
        Some(tracking_id) => anyhow::anyhow!("Webex API returned {}: {} (tracking id: {})", status, message, tracking_id),
        None => anyhow::anyhow!("Webex API returned {}: {}", status, message),
    }
}

/// Extract the `rel="next"` target from an RFC 8288 `Link` header.
fn next_link(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(LINK)?.to_str().ok()?;

    let mut rest = value;

    // Targets are bracketed and may themselves contain `,` or `;`.
    while let Some(start) = rest.find('<') {
        let (target, after) = rest[start + 1..].split_once('>')?;
        let params = after.split_once('<').map_or(after, |(params, _)| params);

        if params.split(';').any(|p| p.trim().trim_end_matches(',').trim().replace(' ', "") == "rel=\"next\"") {
            return Some(target.to_string());
        }

        rest = after;
    }

    None
}

// Tests.

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    fn headers(link: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_str(link).unwrap());
        headers
    }

    #[test]
    fn finds_next_link() {
        let headers = headers(r#"<https://webexapis.com/v1/webhooks?max=100&cursor=abc>; rel="next""#);

        assert_eq!(next_link(&headers).as_deref(), Some("https://webexapis.com/v1/webhooks?max=100&cursor=abc"));
    }

    #[test]
    fn ignores_other_relations() {
        let both = headers(r#"<https://webexapis.com/v1/webhooks?cursor=prev>; rel="prev", <https://webexapis.com/v1/webhooks?cursor=next>; rel="next""#);
        let prev_only = headers(r#"<https://webexapis.com/v1/webhooks?cursor=prev>; rel="prev""#);

        assert_eq!(next_link(&both).as_deref(), Some("https://webexapis.com/v1/webhooks?cursor=next"));
        assert_eq!(next_link(&prev_only), None);
        assert_eq!(next_link(&HeaderMap::new()), None);
    }

    #[test]
    fn keeps_commas_inside_next_target() {
        let headers = headers(r#"<https://webexapis.com/v1/webhooks?cursor=a,b>; rel="prev", <https://webexapis.com/v1/webhooks?cursor=c,d;e>; rel="next""#);

        assert_eq!(next_link(&headers).as_deref(), Some("https://webexapis.com/v1/webhooks?cursor=c,d;e"));
    }

    #[test]
    fn api_error_includes_tracking_id() {
        let err = api_error(StatusCode::NOT_FOUND, r#"{"message":"The requested resource could not be found.","trackingId":"ROUTER_123"}"#);

        assert_eq!(err.to_string(), "Webex API returned 404 Not Found: The requested resource could not be found. (tracking id: ROUTER_123)");
    }

    #[test]
    fn api_error_falls_back_to_raw_body() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream unavailable\n");

        assert_eq!(err.to_string(), "Webex API returned 502 Bad Gateway: upstream unavailable");
    }
}
