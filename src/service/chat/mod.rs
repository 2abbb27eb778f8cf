pub mod webex;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{AttachmentAction, Message, NewMessage, NewWebhook, Person, Res, Room, Void, Webhook};

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the platform operations the bot relies on: managing
/// webhooks, resolving the entities an event refers to, and posting
/// messages. Implementing this trait allows a different platform (or a
/// fake, in tests) to stand in for Webex.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// List every webhook registered by this account.
    async fn list_webhooks(&self) -> Res<Vec<Webhook>>;

    /// Register a webhook.
    async fn create_webhook(&self, webhook: &NewWebhook) -> Res<Webhook>;

    /// Remove a webhook by id.
    async fn delete_webhook(&self, webhook_id: &str) -> Void;

    /// Get the details of a room.
    async fn get_room(&self, room_id: &str) -> Res<Room>;

    /// Get the details of a message.
    async fn get_message(&self, message_id: &str) -> Res<Message>;

    /// Get the details of a person.
    async fn get_person(&self, person_id: &str) -> Res<Person>;

    /// Get a card form submission, including its input values.
    async fn get_attachment_action(&self, action_id: &str) -> Res<AttachmentAction>;

    /// Post a message.
    async fn create_message(&self, message: &NewMessage) -> Res<Message>;

    /// Get the account whose token the client uses.
    ///
    /// The bot compares message authors against this identity so it never
    /// answers its own messages.
    async fn get_me(&self) -> Res<Person>;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
