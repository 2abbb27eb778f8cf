use tracing::{error, info, instrument};

use crate::{
    base::{
        card,
        error::BotError,
        replies::{CARD_FALLBACK_TEXT, GREETING_TEXT},
        types::NewMessage,
    },
    runtime::Runtime,
};

use super::{HandlerResult, Outcome, event::MessageEventData};

/// Reply to a message posted in a room the bot is in.
///
/// Messages authored by the bot itself are never answered; without this
/// check every reply would trigger another one.
#[instrument(skip_all, fields(message_id = %data.id))]
pub async fn handle_message_created(runtime: &Runtime, data: &MessageEventData) -> HandlerResult {
    let chat = &runtime.chat;

    let room = chat.get_room(&data.room_id).await.map_err(|e| BotError::lookup("room", &data.room_id, e))?;
    let message = chat.get_message(&data.id).await.map_err(|e| BotError::lookup("message", &data.id, e))?;

    if message.person_id == runtime.bot.id {
        return Ok(Outcome::SkippedOwnMessage);
    }

    let person = chat.get_person(&message.person_id).await.map_err(|e| BotError::lookup("person", &message.person_id, e))?;

    info!(
        room = room.title.as_deref().unwrap_or_default(),
        from = %person.display_name,
        text = message.text.as_deref().unwrap_or_default(),
        "New message"
    );

    // The two sends are independent: a failed greeting still gets the card out.

    let greeting = NewMessage::to_room(&room.id).with_text(GREETING_TEXT);
    let form = NewMessage::to_room(&room.id).with_text(CARD_FALLBACK_TEXT).with_attachment(card::request_form_attachment());

    let greeting = chat.create_message(&greeting).await.map_err(|e| BotError::send("greeting", &room.id, e));
    let form = chat.create_message(&form).await.map_err(|e| BotError::send("request form", &room.id, e));

    match (greeting, form) {
        (Ok(_), Ok(_)) => Ok(Outcome::Replied { sends: 2 }),
        (Err(err), Ok(_)) | (Ok(_), Err(err)) => Err(err),
        (Err(first), Err(second)) => {
            error!("Error while handling: {}", second);
            Err(first)
        }
    }
}
