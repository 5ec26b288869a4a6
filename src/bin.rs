//! Binary entry point for `tgstarter`.
//!
//! This module provides the command-line interface for tgstarter with options
//! for configuration file paths and logging verbosity, and two commands: one
//! that delivers a text file to a chat, and one that raises a test alert.

use clap::{Parser, Subcommand};
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};
use tgstarter::base::{
    config::Config,
    types::{ChatAction, ChatId, Void},
};

/// Tgstarter – long-message delivery and event logging for Telegram bots.
///
/// Configuration can come from `config.toml` or environment variables
/// prefixed with `TGSTARTER_`.
#[derive(Parser, Debug)]
#[command(version, author, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the bot will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send the contents of a file to a chat, split into as many messages as needed.
    Send {
        /// Numeric chat id or `@username`.
        #[arg(long)]
        chat_id: ChatId,
        /// File whose text is sent.
        #[arg(long)]
        file: std::path::PathBuf,
        /// Chat action shown while sending.
        #[arg(long, value_enum, default_value_t = ChatAction::Typing)]
        action: ChatAction,
    },
    /// Log a test error and forward its alert to the admin chat.
    Alert {
        /// Error message of the test alert.
        #[arg(long, default_value = "test alert")]
        message: String,
    },
}

/// Main entry point for the tgstarter binary.
///
/// Sets up logging based on verbosity, loads configuration, and runs the command.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer.

    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    // Prepare the otlp layer.

    let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
    let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build().tracer("tgstarter");
    let otel = tracing_opentelemetry::layer().with_tracer(tracer);

    tracing_subscriber::registry().with(otel).with(level_filter).with(stdout).init();

    let config = Config::load(args.config.as_deref())?;
    let runtime = tgstarter::start(config).await?;

    match args.command {
        Command::Send { chat_id, file, action } => {
            let text = tokio::fs::read_to_string(&file).await?;
            let options = runtime.send_options();
            let delay = runtime.config.chat_action_interval();

            let result = runtime
                .chat
                .send_with_action(&chat_id, runtime.chat.send_large_message(&chat_id, &text, &options), action, delay)
                .await;

            match result {
                Ok(messages) => info!("Delivered `{}` as {} message(s).", file.display(), messages.len()),
                Err(err) => {
                    error!("Delivery failed: {}", err);

                    if let Err(report_err) = runtime.report(None, &err).await {
                        error!("Failed to report delivery failure: {}", report_err);
                    }

                    return Err(err);
                }
            }
        }
        Command::Alert { message } => {
            let err = anyhow::anyhow!(message).context("Manual alert raised from the command line");

            match runtime.report(None, &err).await? {
                Some(messages) => info!("Alert forwarded as {} message(s).", messages.len()),
                None => info!("Alert logged; it was not forwarded."),
            }
        }
    }

    Ok(())
}
