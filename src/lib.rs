//! Library root for `tgstarter`.
//!
//! Tgstarter extends a Telegram bot client with:
//! - Delivery of texts longer than one message, slice by slice
//! - A repeating chat action ("typing") while a slow operation runs
//! - Structured event and error logging to a document store, with rendered alert texts
//!
//! The library talks to Telegram through the Bot API, stores logs in SurrealDB,
//! and renders alerts with `strfmt` templates. Each collaborator sits behind a
//! trait so that other implementations can be swapped in.

pub mod base;
pub mod logger;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Res};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Connects every service named in the configuration and returns the runtime.
pub async fn start(config: Config) -> Res<runtime::Runtime> {
    info!("Starting tgstarter ...");

    runtime::Runtime::new(config).await
}
