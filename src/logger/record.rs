//! The shape of a persisted log record.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::base::{
    telegram::{Chat, Update, User},
    types::Res,
};

use super::{exception::ExcInfo, extract};

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        };

        f.write_str(name)
    }
}

/// What a log record is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogCategory {
    /// An incoming update or a reaction to one.
    #[default]
    Event,
    /// A background job.
    Task,
    /// The bot process itself.
    System,
}

/// Who produced the logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogOrigin {
    User,
    Bot,
}

impl LogOrigin {
    pub fn from_bot(from_bot: bool) -> Self {
        if from_bot { LogOrigin::Bot } else { LogOrigin::User }
    }
}

/// Snapshots of the user and chat an update belongs to.
///
/// Both are empty objects when the update carries no such data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogUserInfo {
    pub user: Map<String, Value>,
    pub chat: Map<String, Value>,
}

impl LogUserInfo {
    pub fn from_update(update: Option<&Update>) -> Res<Self> {
        let (user, chat) = extract::user_and_chat(update);

        Ok(Self {
            user: snapshot::<User>(user)?,
            chat: snapshot::<Chat>(chat)?,
        })
    }
}

fn snapshot<T: Serialize>(value: Option<&T>) -> Res<Map<String, Value>> {
    match value.map(serde_json::to_value).transpose()? {
        Some(Value::Object(map)) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// A background job, as handed to the logger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobDescriptor {
    pub name: Option<String>,
    pub args: Vec<Value>,
    pub kwargs: Map<String, Value>,
}

impl JobDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }
}

/// A job with every argument stringified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogTask {
    pub name: Option<String>,
    pub args: Vec<String>,
    pub kwargs: BTreeMap<String, String>,
}

impl From<JobDescriptor> for LogTask {
    fn from(job: JobDescriptor) -> Self {
        Self {
            name: job.name,
            args: job.args.iter().map(stringify).collect(),
            kwargs: job.kwargs.iter().map(|(k, v)| (k.clone(), stringify(v))).collect(),
        }
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Error details of a record.
///
/// All three fields are null for an explicit "no error" context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogException {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<String>,
    pub traceback: Option<String>,
}

impl LogException {
    pub fn is_raised(&self) -> bool {
        self.kind.is_some()
    }
}

impl From<ExcInfo> for LogException {
    fn from(info: ExcInfo) -> Self {
        match info {
            ExcInfo::Clear => LogException::default(),
            ExcInfo::Raised { type_name, value, traceback } => LogException {
                kind: Some(type_name),
                value: Some(value),
                traceback: Some(traceback),
            },
        }
    }
}

/// A log record as written to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub datetime: DateTime<Utc>,
    pub level: LogLevel,
    #[serde(rename = "type")]
    pub category: LogCategory,
    pub came_from: LogOrigin,
    pub user_info: LogUserInfo,
    pub update: Option<Value>,
    pub task: Option<LogTask>,
    pub exception: Option<LogException>,
}
