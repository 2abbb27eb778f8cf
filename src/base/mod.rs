//! Core components, types, and utilities for the bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The error taxonomy.
//! - The request form card and the scripted reply texts.
//! - Common types and result handling.

pub mod card;
pub mod config;
pub mod error;
pub mod replies;
pub mod types;
