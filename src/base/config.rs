//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, path::Path, sync::Arc};

use reqwest::Url;
use serde::Deserialize;

use super::{error::BotError, types::Res};

/// Printed alongside any configuration failure.
const REQUIRED_SETTINGS: &str = "You must set:
    * ACCESS_TOKEN -- access token for a Webex bot (WEBEX_TEAMS_ACCESS_TOKEN is also accepted)
    * WEBHOOK_URL -- externally reachable base URL for Webex webhooks (ie: https://2fXX9c.ngrok.io)
    * PORT -- port to listen on (ie: the port passed to ngrok)
    * DESTINATION_SPACE_ID -- id of the space that receives forwarded requests";

/// Default name shared by every webhook this bot registers.
fn default_webhook_name() -> String {
    "botWithCardExampleWebhook".to_string()
}

/// Default interface to listen on.
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

/// Default Webex REST API root.
fn default_api_base_url() -> String {
    "https://webexapis.com/v1".to_string()
}

/// Default per-request timeout for platform calls.
fn default_request_timeout_secs() -> u64 {
    30
}

/// Configuration for the bot.
#[derive(Debug, Clone)]
pub struct Config {
    /// The shared settings.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// The settings themselves.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Bot access token (`ACCESS_TOKEN`).
    #[serde(alias = "webex_teams_access_token")]
    pub access_token: String,
    /// Externally reachable base URL that webhooks target (`WEBHOOK_URL`).
    pub webhook_url: String,
    /// Port to listen on (`PORT`).
    pub port: u16,
    /// Room that receives forwarded requests (`DESTINATION_SPACE_ID`).
    pub destination_space_id: String,
    /// Name shared by this bot's webhooks (`WEBHOOK_NAME`).
    #[serde(default = "default_webhook_name")]
    pub webhook_name: String,
    /// Interface to listen on (`BIND_ADDRESS`).
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Webex REST API root (`API_BASE_URL`).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Timeout in seconds for each platform call (`REQUEST_TIMEOUT_SECS`).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load from the environment, then an optional TOML file, and validate.
    pub fn load(explicit_path: Option<&Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default());

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let inner: ConfigInner = cfg
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| BotError::Configuration(format!("{e}\n\n{REQUIRED_SETTINGS}")))?;

        let result = Config { inner: Arc::new(inner) };
        result.validate()?;

        Ok(result)
    }

    /// Check the loaded values for the problems deserialization cannot catch.
    pub fn validate(&self) -> Result<(), BotError> {
        let missing = |name: &str| BotError::Configuration(format!("{name} is empty.\n\n{REQUIRED_SETTINGS}"));

        if self.access_token.trim().is_empty() {
            return Err(missing("ACCESS_TOKEN"));
        }

        if self.destination_space_id.trim().is_empty() {
            return Err(missing("DESTINATION_SPACE_ID"));
        }

        if self.webhook_name.trim().is_empty() {
            return Err(missing("WEBHOOK_NAME"));
        }

        if self.port == 0 {
            return Err(BotError::Configuration("PORT must be between 1 and 65535.".to_string()));
        }

        if self.request_timeout_secs == 0 {
            return Err(BotError::Configuration("REQUEST_TIMEOUT_SECS must be at least 1.".to_string()));
        }

        parse_http_url("WEBHOOK_URL", &self.webhook_url)?;
        parse_http_url("API_BASE_URL", &self.api_base_url)?;

        Ok(())
    }

    /// The parsed webhook base URL.
    pub fn webhook_base_url(&self) -> Result<Url, BotError> {
        parse_http_url("WEBHOOK_URL", &self.webhook_url)
    }
}

/// Parse an absolute `http` or `https` URL.
fn parse_http_url(name: &str, value: &str) -> Result<Url, BotError> {
    let url = Url::parse(value).map_err(|e| BotError::Configuration(format!("{name} `{value}` is not a valid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(BotError::Configuration(format!("{name} must use http or https, not `{scheme}`."))),
    }
}
