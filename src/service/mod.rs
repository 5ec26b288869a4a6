//! Service integrations for external APIs and clients.
//!
//! This module contains the collaborators used by tgstarter:
//! - Chat services (e.g., the Telegram Bot API)
//! - Log stores (e.g., SurrealDB)
//! - Alert renderers (e.g., `strfmt` templates)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod chat;
pub mod db;
pub mod render;
