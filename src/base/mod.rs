//! Core components, types, and utilities for tgstarter.
//!
//! This module contains fundamental building blocks used throughout the library:
//! - Configuration handling and environment variables.
//! - The default alert template.
//! - Telegram Bot API objects.
//! - Common types and result handling.

pub mod config;
pub mod telegram;
pub mod templates;
pub mod types;
