//! SurrealDB implementation of the log store.

use std::{collections::BTreeMap, ops::Deref, sync::Arc};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use surrealdb::{
    RecordId, Surreal,
    engine::any::{self, Any},
    opt::auth::Root,
    sql,
};
use tracing::{info, instrument};

use crate::base::{config::Config, types::Res};

use super::{GenericLogStore, LogStore};

// Extra methods on `LogStore` applied by the surreal implementation.

impl LogStore {
    /// Connects to the SurrealDB instance named in `config`.
    pub async fn surreal(config: &Config) -> Res<Self> {
        Ok(SurrealLogStore::new(config).await?.into())
    }

    /// Creates a store backed by an in-memory SurrealDB instance.
    pub async fn surreal_memory() -> Res<Self> {
        Ok(SurrealLogStore::memory().await?.into())
    }
}

impl From<SurrealLogStore> for LogStore {
    fn from(client: SurrealLogStore) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// The part of a created record the store reads back.
#[derive(Debug, Deserialize)]
struct Created {
    id: RecordId,
}

/// SurrealDB log store.
#[derive(Clone)]
pub struct SurrealLogStore {
    db: Surreal<Any>,
}

impl Deref for SurrealLogStore {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.db
    }
}

impl SurrealLogStore {
    /// Connect to the configured endpoint; `memory` selects the in-memory engine.
    #[instrument(name = "SurrealLogStore::new", skip_all)]
    pub async fn new(config: &Config) -> Res<Self> {
        if config.db_endpoint == "memory" {
            let db = any::connect("mem://").await?;
            db.use_ns(&config.db_namespace).use_db(&config.db_database).await?;

            info!("In-memory log store initialized.");

            return Ok(Self { db });
        }

        let db = any::connect(&config.db_endpoint).await?;

        // Authenticate with the database using the provided username and password.
        db.signin(Root {
            username: &config.db_username,
            password: &config.db_password,
        })
        .await?;

        db.use_ns(&config.db_namespace).use_db(&config.db_database).await?;

        info!("Log store connected to `{}`.", config.db_endpoint);

        Ok(Self { db })
    }

    /// Creates an in-memory store with the default namespace and database.
    pub async fn memory() -> Res<Self> {
        let db = any::connect("mem://").await?;
        db.use_ns("tgstarter").use_db("bot").await?;

        Ok(Self { db })
    }
}

#[async_trait]
impl GenericLogStore for SurrealLogStore {
    #[instrument(skip(self, document))]
    async fn insert_one(&self, collection: &str, document: Value) -> Res<String> {
        let created: Option<Created> = self.db.create(collection).content(into_document(document)).await?;
        let created = created.ok_or_else(|| anyhow!("No record was returned for collection `{}`.", collection))?;

        Ok(created.id.to_string())
    }
}

// Helpers.

/// Converts a JSON document into a SurrealDB value.
///
/// JSON `null` maps to `NULL`, never `NONE`, so null fields are kept. A top-level RFC 3339
/// `datetime` string becomes a native datetime.
fn into_document(document: Value) -> sql::Value {
    match document {
        Value::Object(map) => {
            let object: BTreeMap<String, sql::Value> = map
                .into_iter()
                .map(|(key, value)| {
                    let value = match (key.as_str(), value) {
                        ("datetime", Value::String(text)) => match DateTime::parse_from_rfc3339(&text) {
                            Ok(datetime) => sql::Value::Datetime(sql::Datetime::from(datetime.with_timezone(&Utc))),
                            Err(_) => sql::Value::Strand(text.into()),
                        },
                        (_, value) => into_value(value),
                    };

                    (key, value)
                })
                .collect();

            sql::Value::Object(object.into())
        }
        other => into_value(other),
    }
}

fn into_value(value: Value) -> sql::Value {
    match value {
        Value::Null => sql::Value::Null,
        Value::Bool(b) => sql::Value::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => sql::Value::Number(sql::Number::Int(i)),
            None => sql::Value::Number(sql::Number::Float(n.as_f64().unwrap_or_default())),
        },
        Value::String(s) => sql::Value::Strand(s.into()),
        Value::Array(items) => sql::Value::Array(items.into_iter().map(into_value).collect::<Vec<_>>().into()),
        Value::Object(map) => sql::Value::Object(map.into_iter().map(|(k, v)| (k, into_value(v))).collect::<BTreeMap<_, _>>().into()),
    }
}
