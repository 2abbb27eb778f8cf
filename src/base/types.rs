//! Shared result aliases and the Webex resource types exchanged with the facade.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

/// The generic error type used by plumbing code.
pub type Err = anyhow::Error;
/// A result with the generic error type.
pub type Res<T> = Result<T, Err>;
/// A result with no value.
pub type Void = Res<()>;

// Webhooks.

/// The platform entity kind a webhook (or an inbound event) pertains to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WebhookResource {
    /// Chat messages.
    Messages,
    /// Card form submissions.
    AttachmentActions,
    /// Any resource this bot never subscribes to.
    #[serde(other)]
    Other,
}

impl WebhookResource {
    /// The wire name of the resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookResource::Messages => "messages",
            WebhookResource::AttachmentActions => "attachmentActions",
            WebhookResource::Other => "other",
        }
    }
}

impl fmt::Display for WebhookResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The change to a resource that triggers a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WebhookEvent {
    /// The resource was created.
    Created,
    /// Any other event.
    #[serde(other)]
    Other,
}

impl WebhookEvent {
    /// The wire name of the event.
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookEvent::Created => "created",
            WebhookEvent::Other => "other",
        }
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A webhook registration as reported by the platform.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Platform-assigned id.
    pub id: String,
    /// Application-chosen name; the identity used by the lifecycle manager.
    pub name: String,
    /// URL the platform posts events to.
    pub target_url: String,
    /// Subscribed resource.
    pub resource: WebhookResource,
    /// Subscribed event.
    pub event: WebhookEvent,
    /// Whether the platform currently delivers to this webhook.
    #[serde(default)]
    pub status: Option<String>,
}

/// A request to create a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWebhook {
    /// Application-chosen name.
    pub name: String,
    /// URL the platform should post events to.
    pub target_url: String,
    /// Resource to subscribe to.
    pub resource: WebhookResource,
    /// Event to subscribe to.
    pub event: WebhookEvent,
}

// Lookups.

/// A room (space).
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room id.
    pub id: String,
    /// Room title.
    #[serde(default)]
    pub title: Option<String>,
    /// `direct` or `group`.
    #[serde(default, rename = "type")]
    pub room_type: Option<String>,
}

/// A person (user or bot account).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Person id.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: String,
    /// Email addresses, possibly empty.
    #[serde(default)]
    pub emails: Vec<String>,
}

impl Person {
    /// The first listed email address, or an empty string.
    pub fn first_email_or_empty(&self) -> &str {
        self.emails.first().map(String::as_str).unwrap_or_default()
    }
}

/// A posted message.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message id.
    pub id: String,
    /// Room the message was posted to.
    #[serde(default)]
    pub room_id: String,
    /// Author of the message.
    #[serde(default)]
    pub person_id: String,
    /// Email of the author.
    #[serde(default)]
    pub person_email: Option<String>,
    /// Plain text content.
    #[serde(default)]
    pub text: Option<String>,
    /// Parent message when threaded.
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// The record created when a user submits a card form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentAction {
    /// Action id.
    pub id: String,
    /// Action kind, `submit` for form submissions.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// The message that hosted the card.
    pub message_id: String,
    /// The person who submitted the form.
    pub person_id: String,
    /// The room the card was posted to.
    pub room_id: String,
    /// Submitted values keyed by input id.
    #[serde(default)]
    pub inputs: Map<String, Value>,
}

impl AttachmentAction {
    /// The submitted string value of the given input, if present.
    pub fn input(&self, field_id: &str) -> Option<&str> {
        self.inputs.get(field_id).and_then(Value::as_str)
    }
}

// Sends.

/// A rich attachment on an outbound message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// MIME-like content type of the attachment.
    pub content_type: String,
    /// The attachment document.
    pub content: Value,
}

/// An outbound message.
///
/// Built fluently, e.g. `NewMessage::to_room(id).with_text("hi")`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    /// Destination room.
    pub room_id: String,
    /// Message to thread under.
    pub parent_id: Option<String>,
    /// Plain text body.
    pub text: Option<String>,
    /// Markdown body.
    pub markdown: Option<String>,
    /// Rich attachments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl NewMessage {
    /// Start a message addressed to a room.
    pub fn to_room(room_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            parent_id: None,
            text: None,
            markdown: None,
            attachments: Vec::new(),
        }
    }

    /// Set the plain text body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the markdown body.
    pub fn with_markdown(mut self, markdown: impl Into<String>) -> Self {
        self.markdown = Some(markdown.into());
        self
    }

    /// Thread the message under a parent message.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Add a rich attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

// Tests.

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn webhook_listing_tolerates_foreign_resources() {
        let webhook: Webhook = serde_json::from_value(json!({
            "id": "W1",
            "name": "someoneElse",
            "targetUrl": "https://example.com/hook",
            "resource": "memberships",
            "event": "deleted",
            "status": "active",
            "created": "2020-01-01T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(webhook.resource, WebhookResource::Other);
        assert_eq!(webhook.event, WebhookEvent::Other);
    }

    #[test]
    fn new_message_omits_unset_fields() {
        let message = NewMessage::to_room("R1").with_markdown("**hi**");

        assert_eq!(serde_json::to_value(&message).unwrap(), json!({ "roomId": "R1", "markdown": "**hi**" }));
    }

    #[test]
    fn new_webhook_uses_wire_names() {
        let webhook = NewWebhook {
            name: "hook".to_string(),
            target_url: "https://example.com/events".to_string(),
            resource: WebhookResource::AttachmentActions,
            event: WebhookEvent::Created,
        };

        assert_eq!(
            serde_json::to_value(&webhook).unwrap(),
            json!({ "name": "hook", "targetUrl": "https://example.com/events", "resource": "attachmentActions", "event": "created" })
        );
    }

    #[test]
    fn first_email_falls_back_to_empty() {
        let mut person = Person { id: "P1".to_string(), display_name: "Bot Tester".to_string(), emails: vec![] };
        assert_eq!(person.first_email_or_empty(), "");

        person.emails = vec!["a@x.com".to_string(), "b@x.com".to_string()];
        assert_eq!(person.first_email_or_empty(), "a@x.com");
    }

    #[test]
    fn non_string_inputs_are_not_returned() {
        let action: AttachmentAction = serde_json::from_value(json!({
            "id": "A1",
            "type": "submit",
            "messageId": "M1",
            "personId": "P1",
            "roomId": "R1",
            "inputs": { "TextFieldVal": 42, "Other": "x" }
        }))
        .unwrap();

        assert_eq!(action.input("TextFieldVal"), None);
        assert_eq!(action.input("Other"), Some("x"));
        assert_eq!(action.input("Missing"), None);
    }
}
