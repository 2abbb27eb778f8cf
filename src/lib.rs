//! Library root for `support-redirect-bot`.
//!
//! Support-redirect-bot is a Webex bot that collects support requests:
//! - Answers any message with a greeting and a request form card
//! - Acknowledges submitted forms in the user's space
//! - Forwards each request to a fixed triage space
//!
//! The bot registers its own webhooks on startup and removes them on exit.
//! The platform integration sits behind the `GenericChatClient` trait so the
//! handlers can run against a fake in tests.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod lifecycle;
pub mod runtime;
pub mod server;
pub mod service;

use anyhow::anyhow;
use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the bot runtime:
/// - Initializes the crypto provider
/// - Creates the runtime context with the chat client and the bot identity
/// - Registers webhooks, serves callbacks, and cleans up on exit
pub async fn start(config: Config) -> Void {
    info!("Starting support-redirect-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install the default crypto provider."))?;

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
