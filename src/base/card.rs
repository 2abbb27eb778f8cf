//! The adaptive card used to collect a support request.
//!
//! To learn more about designing and working with buttons and cards, see
//! <https://developer.webex.com/docs/api/guides/cards>.

use std::sync::LazyLock;

use serde_json::{Value, json};

use super::types::Attachment;

/// Content type of adaptive card attachments.
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// Id of the text input carrying the request.
pub const TEXT_FIELD_ID: &str = "TextFieldVal";

/// The request form, attached verbatim to every card reply.
pub static REQUEST_FORM: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://adaptivecards.io/schemas/adaptive-card.json",
        "type": "AdaptiveCard",
        "version": "1.1",
        "body": [
            {
                "type": "TextBlock",
                "text": "Please type in your requirement: ",
                "size": "medium",
                "weight": "bolder"
            },
            {
                "type": "TextBlock",
                "text": "Enter your request in the following field, an agent will contact you once it is received ",
                "wrap": true
            },
            {
                "type": "Input.Text",
                "placeholder": "Type your requirement HERE",
                "style": "text",
                "maxLength": 0,
                "id": TEXT_FIELD_ID
            }
        ],
        "actions": [
            {
                "type": "Action.Submit",
                "title": "Enter",
                "data": {
                    "formDemoAction": "Submit"
                }
            }
        ]
    })
});

/// The request form wrapped as a message attachment.
pub fn request_form_attachment() -> Attachment {
    Attachment {
        content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
        content: REQUEST_FORM.clone(),
    }
}
