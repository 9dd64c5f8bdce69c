//! Visual style side effect.

use std::collections::BTreeMap;
use std::sync::Arc;
use parking_lot::Mutex;

/// Receives style writes for the host element.
///
/// Called while the resolver holds its state lock, so implementations must
/// not call back into the resolver.
pub trait StyleSink: Send + Sync {
    fn set_property(&self, property: &str, value: &str);
}

/// CSS `url()` value for a resolved source.
pub fn css_url(url: &str) -> String {
    format!("url({url})")
}

/// In-memory inline style of a host element.
#[derive(Debug, Clone, Default)]
pub struct InlineStyle {
    properties: Arc<Mutex<BTreeMap<String, String>>>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<String> {
        self.properties.lock().get(property).cloned()
    }

    /// Render as a `style` attribute value.
    pub fn to_css(&self) -> String {
        self.properties
            .lock()
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl StyleSink for InlineStyle {
    fn set_property(&self, property: &str, value: &str) {
        self.properties
            .lock()
            .insert(property.to_string(), value.to_string());
    }
}
