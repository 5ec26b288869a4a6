pub mod strfmt;

use std::{collections::HashMap, ops::Deref, sync::Arc};

use crate::base::types::Res;

// Types.

/// Variables available to an alert template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertVars {
    pub error_type: String,
    pub error_value: String,
    pub datetime: String,
    pub record_id: String,
    pub traceback: String,
}

impl AlertVars {
    /// The variables keyed by their placeholder names.
    pub fn to_map(&self) -> HashMap<String, String> {
        HashMap::from([
            ("error_type".to_string(), self.error_type.clone()),
            ("error_value".to_string(), self.error_value.clone()),
            ("datetime".to_string(), self.datetime.clone()),
            ("record_id".to_string(), self.record_id.clone()),
            ("traceback".to_string(), self.traceback.clone()),
        ])
    }
}

// Traits.

/// Generic alert renderer trait that renderers must implement.
pub trait GenericRenderer: Send + Sync + 'static {
    /// Render the alert text for the given variables.
    fn render(&self, vars: &AlertVars) -> Res<String>;
}

// Structs.

/// Alert renderer for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Renderer {
    inner: Arc<dyn GenericRenderer>,
}

impl Deref for Renderer {
    type Target = dyn GenericRenderer;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl Renderer {
    pub fn new(inner: Arc<dyn GenericRenderer>) -> Self {
        Self { inner }
    }
}
