//! Scripted reply texts.

use super::types::Person;

/// First reply to any message from a user.
pub const GREETING_TEXT: &str = "Incident reporting Bot:";

/// Plain text shown by clients that cannot render the card.
pub const CARD_FALLBACK_TEXT: &str = "If you see this your client cannot render cards";

/// Threaded acknowledgment of a form submission.
pub const ACKNOWLEDGMENT_MARKDOWN: &str = "Your request has been received";

/// The summary forwarded to the triage space.
pub fn request_summary(person: &Person, request: &str) -> String {
    format!("Request from {} ({}): {}", person.display_name, person.first_email_or_empty(), request)
}
