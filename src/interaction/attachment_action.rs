//! Handles card form submissions.

use tracing::{info, instrument};

use crate::{
    base::{
        card::TEXT_FIELD_ID,
        error::BotError,
        replies::{ACKNOWLEDGMENT_MARKDOWN, request_summary},
        types::NewMessage,
    },
    runtime::Runtime,
};

use super::{HandlerResult, Outcome, event::AttachmentActionEventData};

/// Acknowledge a form submission and forward it to the triage space.
///
/// The acknowledgment is threaded under the card that was submitted; the
/// summary goes, unthreaded, to the configured destination room.
#[instrument(skip_all, fields(action_id = %data.id))]
pub async fn handle_action_submitted(runtime: &Runtime, data: &AttachmentActionEventData) -> HandlerResult {
    let chat = &runtime.chat;

    let room = chat.get_room(&data.room_id).await.map_err(|e| BotError::lookup("room", &data.room_id, e))?;
    let action = chat.get_attachment_action(&data.id).await.map_err(|e| BotError::lookup("attachment action", &data.id, e))?;
    let person = chat.get_person(&action.person_id).await.map_err(|e| BotError::lookup("person", &action.person_id, e))?;

    let request = action.input(TEXT_FIELD_ID).ok_or_else(|| BotError::MissingField(TEXT_FIELD_ID.to_string()))?;

    info!(
        room = room.title.as_deref().unwrap_or_default(),
        from = %person.display_name,
        emails = ?person.emails,
        request,
        "New form submission"
    );

    let acknowledgment = NewMessage::to_room(&room.id).with_parent(&action.message_id).with_markdown(ACKNOWLEDGMENT_MARKDOWN);
    chat.create_message(&acknowledgment).await.map_err(|e| BotError::send("acknowledgment", &room.id, e))?;

    let destination = &runtime.config.destination_space_id;
    let summary = NewMessage::to_room(destination).with_markdown(request_summary(&person, request));
    chat.create_message(&summary).await.map_err(|e| BotError::send("request summary", destination, e))?;

    Ok(Outcome::Replied { sends: 2 })
}
