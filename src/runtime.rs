//! Runtime services and shared state for the bot.

use std::{future::Future, io};

use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::{
    base::{
        config::Config,
        error::BotError,
        types::{Person, Res, Void},
    },
    lifecycle::{self, Purge},
    server,
    service::chat::ChatClient,
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration, the chat client, and the bot's own
/// identity. It is designed to be trivially cloneable, allowing it to be
/// passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The chat client instance.
    pub chat: ChatClient,
    /// The account the bot posts as, resolved once at startup.
    pub bot: Person,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the chat client.
        let chat = ChatClient::webex(&config)?;

        // Get the details for the account whose token we are using.
        let bot = chat.get_me().await.map_err(|e| BotError::lookup("bot identity", "me", e))?;

        info!("Bot identity: {} ({})", bot.display_name, bot.id);

        Ok(Self { config, chat, bot })
    }

    /// Register webhooks, serve callbacks until Ctrl-C, then remove the webhooks.
    pub async fn start(&self) -> Void {
        let address = format!("{}:{}", self.config.bind_address, self.config.port);

        self.run(TcpListener::bind(address), shutdown_signal()).await
    }

    /// Run the full lifecycle against a listener and a shutdown trigger.
    ///
    /// Webhooks are registered before `listen` is awaited. Once registration
    /// succeeds they are purged again however serving ends, bind failures
    /// included.
    pub async fn run<L, F>(&self, listen: L, shutdown: F) -> Void
    where
        L: Future<Output = io::Result<TcpListener>>,
        F: Future<Output = ()> + Send + 'static,
    {
        self.acquire_webhooks().await?;

        let served = match listen.await {
            Ok(listener) => server::serve(listener, self.clone(), shutdown).await,
            Err(err) => Err(anyhow::anyhow!("Failed to bind the callback listener: {}", err)),
        };

        if let Err(err) = &served {
            error!("Serving stopped with an error: {:#}", err);
        }

        self.release_webhooks().await;

        served
    }

    /// Replace any stale registrations with a fresh pair.
    ///
    /// A stale webhook that cannot be deleted aborts startup before anything is created.
    #[instrument(skip_all)]
    async fn acquire_webhooks(&self) -> Result<(), BotError> {
        let name = &self.config.webhook_name;

        let purged = lifecycle::purge_named(&self.chat, name, Purge::Strict).await?;
        info!("Removed {} stale webhooks named `{}`.", purged, name);

        let base_url = self.config.webhook_base_url()?;
        let created = lifecycle::register(&self.chat, &base_url, name).await?;
        info!("Registered {} webhooks named `{}`.", created.len(), name);

        Ok(())
    }

    /// Best-effort removal of this bot's webhooks.
    #[instrument(skip_all)]
    async fn release_webhooks(&self) {
        info!("Cleaning up webhooks ...");

        match lifecycle::purge_named(&self.chat, &self.config.webhook_name, Purge::BestEffort).await {
            Ok(purged) => info!("Removed {} webhooks.", purged),
            Err(err) => error!("Failed to clean up webhooks: {}", err),
        }
    }
}

/// Resolves on Ctrl-C.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }

    info!("Shutting down ...");
}
