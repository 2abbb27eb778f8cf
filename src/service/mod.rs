//! Service integrations for external APIs and clients.
//!
//! The chat service defines a generic trait and a concrete Webex
//! implementation, allowing for extensibility and easy testing.

pub mod chat;
