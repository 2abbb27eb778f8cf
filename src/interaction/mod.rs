//! Event handling and user interactions for the bot.
//!
//! This module provides functionality for handling webhook callbacks:
//! - Decoding callbacks into typed events
//! - Routing each event to exactly one handler
//! - Replying to messages and forwarding card form submissions

pub mod attachment_action;
pub mod event;
pub mod message;

use tracing::{debug, error, info, instrument};

use crate::{base::error::BotError, runtime::Runtime};

use event::InboundEvent;

/// The response body for every callback, whatever happened while handling it.
pub const ACK: &str = "OK";

/// What a handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler sent this many messages.
    Replied { sends: usize },
    /// The message was the bot's own; nothing was sent.
    SkippedOwnMessage,
    /// The event kind is not one the bot handles.
    Ignored,
}

/// Result of handling a single event.
pub type HandlerResult = Result<Outcome, BotError>;

/// Handle one callback and produce the acknowledgment.
///
/// Handler failures are terminal for the event: they are logged here and
/// never reach the webhook sender.
#[instrument(skip_all)]
pub async fn dispatch(runtime: &Runtime, event: InboundEvent) -> &'static str {
    match route(runtime, event).await {
        Ok(outcome) => debug!("Handled event: {:?}", outcome),
        Err(err) => error!("Error while handling: {}", err),
    }

    ACK
}

/// Route an event to its handler by (resource, event).
pub async fn route(runtime: &Runtime, event: InboundEvent) -> HandlerResult {
    match event {
        InboundEvent::MessageCreated(data) => message::handle_message_created(runtime, &data).await,
        InboundEvent::AttachmentActionCreated(data) => attachment_action::handle_action_submitted(runtime, &data).await,
        InboundEvent::Ignored { resource, event } => {
            info!("Ignoring unexpected webhook (resource `{}`, event `{}`).", resource, event);
            Ok(Outcome::Ignored)
        }
    }
}
