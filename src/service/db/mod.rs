use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;

use crate::base::types::Res;

pub mod surreal;

// Traits.

/// Generic document store trait that clients must implement.
///
/// The logger only ever appends, so a single insert operation is all a
/// backend has to provide.
#[async_trait]
pub trait GenericLogStore: Send + Sync + 'static {
    /// Inserts one document into `collection` and returns the id the store assigned to it.
    async fn insert_one(&self, collection: &str, document: Value) -> Res<String>;
}

// Structs.

/// Log store client for tgstarter.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct LogStore {
    inner: Arc<dyn GenericLogStore>,
}

impl Deref for LogStore {
    type Target = dyn GenericLogStore;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl LogStore {
    pub fn new(inner: Arc<dyn GenericLogStore>) -> Self {
        Self { inner }
    }
}
