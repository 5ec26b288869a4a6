//! Structured event logging.
//!
//! Every call writes one `LogRecord` to the log store. When the call carries
//! a captured error, the logger also renders an alert text that the caller
//! can forward to administrators.

pub mod exception;
pub mod extract;
pub mod record;

use chrono::{FixedOffset, Utc};
use tracing::{debug, instrument};

use crate::{
    base::{config::Config, telegram::Update, types::Res},
    service::{
        db::LogStore,
        render::{AlertVars, Renderer},
    },
};

use exception::ExcInfo;
use record::{JobDescriptor, LogCategory, LogException, LogLevel, LogOrigin, LogRecord, LogTask, LogUserInfo};

/// Arguments of a single log call.
#[derive(Debug, Clone, Default)]
pub struct LogRequest<'a> {
    pub update: Option<&'a Update>,
    pub job: Option<JobDescriptor>,
    pub level: Option<LogLevel>,
    pub category: Option<LogCategory>,
    pub from_bot: bool,
    pub exception: Option<ExcInfo>,
}

impl<'a> LogRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(mut self, update: &'a Update) -> Self {
        self.update = Some(update);
        self
    }

    pub fn job(mut self, job: JobDescriptor) -> Self {
        self.job = Some(job);
        self
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn category(mut self, category: LogCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn from_bot(mut self) -> Self {
        self.from_bot = true;
        self
    }

    pub fn exception(mut self, exception: ExcInfo) -> Self {
        self.exception = Some(exception);
        self
    }
}

/// Writes log records and renders alerts.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct EventLogger {
    store: LogStore,
    renderer: Renderer,
    timezone: FixedOffset,
    collection: String,
    default_level: LogLevel,
    default_category: LogCategory,
}

impl EventLogger {
    pub fn new(store: LogStore, renderer: Renderer, timezone: FixedOffset) -> Self {
        Self {
            store,
            renderer,
            timezone,
            collection: "logs".to_string(),
            default_level: LogLevel::default(),
            default_category: LogCategory::default(),
        }
    }

    /// Builds a logger with the collection, timezone and defaults from `config`.
    pub fn from_config(config: &Config, store: LogStore, renderer: Renderer) -> Res<Self> {
        Ok(Self::new(store, renderer, config.timezone()?)
            .with_collection(&config.log_collection)
            .with_default_level(config.log_default_level)
            .with_default_category(config.log_default_category))
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn with_default_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    pub fn with_default_category(mut self, category: LogCategory) -> Self {
        self.default_category = category;
        self
    }

    /// Writes one record; returns the rendered alert when an error was captured.
    #[instrument(name = "EventLogger::log", skip_all, fields(collection = %self.collection))]
    pub async fn log(&self, request: LogRequest<'_>) -> Res<Option<String>> {
        let datetime = Utc::now();

        let record = LogRecord {
            datetime,
            level: request.level.unwrap_or(self.default_level),
            category: request.category.unwrap_or(self.default_category),
            came_from: LogOrigin::from_bot(request.from_bot),
            user_info: LogUserInfo::from_update(request.update)?,
            update: request.update.map(serde_json::to_value).transpose()?,
            task: request.job.map(LogTask::from),
            exception: request.exception.map(LogException::from),
        };

        let document = serde_json::to_value(&record)?;
        let record_id = self.store.insert_one(&self.collection, document).await?;

        debug!("Stored {} log record `{}`.", record.level, record_id);

        match record.exception {
            Some(exception) if exception.is_raised() => {
                let vars = AlertVars {
                    error_type: exception.kind.unwrap_or_default(),
                    error_value: exception.value.unwrap_or_default(),
                    datetime: datetime.with_timezone(&self.timezone).to_rfc3339(),
                    record_id,
                    traceback: exception.traceback.unwrap_or_default(),
                };

                Ok(Some(self.renderer.render(&vars)?))
            }
            _ => Ok(None),
        }
    }

    pub async fn debug(&self, request: LogRequest<'_>) -> Res<Option<String>> {
        self.log(request.level(LogLevel::Debug)).await
    }

    pub async fn info(&self, request: LogRequest<'_>) -> Res<Option<String>> {
        self.log(request.level(LogLevel::Info)).await
    }

    pub async fn warning(&self, request: LogRequest<'_>) -> Res<Option<String>> {
        self.log(request.level(LogLevel::Warning)).await
    }

    pub async fn error(&self, request: LogRequest<'_>) -> Res<Option<String>> {
        self.log(request.level(LogLevel::Error)).await
    }

    pub async fn critical(&self, request: LogRequest<'_>) -> Res<Option<String>> {
        self.log(request.level(LogLevel::Critical)).await
    }
}
