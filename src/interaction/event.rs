//! Decoding of inbound webhook callbacks.

use serde::Deserialize;
use serde_json::Value;

/// The envelope every webhook callback shares.
#[derive(Debug, Deserialize)]
struct RawEvent {
    resource: String,
    event: String,
    #[serde(default)]
    data: Value,
}

/// Payload of a `messages`/`created` callback.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEventData {
    /// Id of the new message.
    pub id: String,
    /// Room the message was posted to.
    pub room_id: String,
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub person_email: Option<String>,
}

/// Payload of an `attachmentActions`/`created` callback.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentActionEventData {
    /// Id of the attachment action.
    pub id: String,
    /// Room the card was posted to.
    pub room_id: String,
    #[serde(default)]
    pub person_id: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

/// A webhook callback, classified by its (resource, event) pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawEvent")]
pub enum InboundEvent {
    /// A message was posted to a room the bot is in.
    MessageCreated(MessageEventData),
    /// Someone submitted a card form the bot posted.
    AttachmentActionCreated(AttachmentActionEventData),
    /// Anything else; acknowledged and dropped.
    Ignored { resource: String, event: String },
}

impl TryFrom<RawEvent> for InboundEvent {
    type Error = serde_json::Error;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let event = match (raw.resource.as_str(), raw.event.as_str()) {
            ("messages", "created") => InboundEvent::MessageCreated(serde_json::from_value(raw.data)?),
            ("attachmentActions", "created") => InboundEvent::AttachmentActionCreated(serde_json::from_value(raw.data)?),
            _ => InboundEvent::Ignored {
                resource: raw.resource,
                event: raw.event,
            },
        };

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_message_created() {
        let event: InboundEvent = serde_json::from_value(json!({
            "id": "WH1",
            "name": "botWithCardExampleWebhook",
            "resource": "messages",
            "event": "created",
            "data": {
                "id": "M1",
                "roomId": "R1",
                "roomType": "direct",
                "personId": "P1",
                "personEmail": "jane@x.com",
                "created": "2020-01-01T00:00:00.000Z"
            }
        }))
        .unwrap();

        assert_eq!(
            event,
            InboundEvent::MessageCreated(MessageEventData {
                id: "M1".to_string(),
                room_id: "R1".to_string(),
                person_id: Some("P1".to_string()),
                person_email: Some("jane@x.com".to_string()),
            })
        );
    }

    #[test]
    fn decodes_attachment_action_created() {
        let event: InboundEvent = serde_json::from_value(json!({
            "resource": "attachmentActions",
            "event": "created",
            "data": { "id": "A1", "type": "submit", "messageId": "M1", "personId": "P1", "roomId": "R1" }
        }))
        .unwrap();

        let InboundEvent::AttachmentActionCreated(data) = event else {
            panic!("expected an attachment action");
        };
        assert_eq!(data.id, "A1");
        assert_eq!(data.room_id, "R1");
        assert_eq!(data.message_id.as_deref(), Some("M1"));
    }

    #[test]
    fn unknown_pairs_are_ignored_not_rejected() {
        let event: InboundEvent = serde_json::from_value(json!({
            "resource": "messages",
            "event": "deleted",
            "data": { "id": "M1" }
        }))
        .unwrap();

        assert_eq!(
            event,
            InboundEvent::Ignored {
                resource: "messages".to_string(),
                event: "deleted".to_string()
            }
        );

        let event: InboundEvent = serde_json::from_value(json!({ "resource": "memberships", "event": "created" })).unwrap();
        assert!(matches!(event, InboundEvent::Ignored { .. }));
    }

    #[test]
    fn recognized_pair_with_bad_payload_fails() {
        let result = serde_json::from_value::<InboundEvent>(json!({
            "resource": "messages",
            "event": "created",
            "data": { "id": "M1" }
        }));

        assert!(result.is_err());
    }
}
