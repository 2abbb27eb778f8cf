//! Error taxonomy for startup and per-event failures.

use thiserror::Error;

/// The failures the bot distinguishes between.
///
/// `Configuration` and `Registration` abort startup. The rest are terminal
/// for a single event: the dispatcher logs them and acknowledges anyway.
#[derive(Debug, Error)]
pub enum BotError {
    /// A required setting is missing or malformed.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// Listing, creating, or deleting webhooks failed.
    #[error("Webhook registration failed: {0}")]
    Registration(String),
    /// A read from the messaging platform failed.
    #[error("Failed to look up {what} `{id}`: {reason}")]
    Lookup {
        /// The kind of entity being resolved.
        what: &'static str,
        /// The id being resolved.
        id: String,
        /// The underlying failure.
        reason: String,
    },
    /// Sending a message failed.
    #[error("Failed to send {what} to room `{room_id}`: {reason}")]
    Send {
        /// The message being sent.
        what: &'static str,
        /// The destination room.
        room_id: String,
        /// The underlying failure.
        reason: String,
    },
    /// An expected form field was absent from a submission.
    #[error("Form submission is missing field `{0}`")]
    MissingField(String),
}

impl BotError {
    /// Wrap a failed lookup.
    pub fn lookup(what: &'static str, id: &str, err: anyhow::Error) -> Self {
        BotError::Lookup {
            what,
            id: id.to_string(),
            reason: format!("{err:#}"),
        }
    }

    /// Wrap a failed send.
    pub fn send(what: &'static str, room_id: &str, err: anyhow::Error) -> Self {
        BotError::Send {
            what,
            room_id: room_id.to_string(),
            reason: format!("{err:#}"),
        }
    }

    /// Wrap a failed webhook operation.
    pub fn registration(context: &str, err: anyhow::Error) -> Self {
        BotError::Registration(format!("{context}: {err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_message_names_entity_and_id() {
        let err = BotError::lookup("room", "R1", anyhow::anyhow!("404 Not Found"));

        assert_eq!(err.to_string(), "Failed to look up room `R1`: 404 Not Found");
    }

    #[test]
    fn registration_keeps_error_chain() {
        let inner = anyhow::anyhow!("connection reset").context("GET webhooks");
        let err = BotError::registration("Failed to list webhooks", inner);

        assert_eq!(err.to_string(), "Webhook registration failed: Failed to list webhooks: GET webhooks: connection reset");
    }
}
