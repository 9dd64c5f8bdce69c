//! Shared utilities for pipeline integration tests.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::timeout;

use background_srcset::probe::ScriptedHost;
use background_srcset::{BackgroundSrcset, InlineStyle, InputName, Settings};

/// A component wired to `host` and an inspectable inline style.
pub fn component(host: &ScriptedHost) -> (BackgroundSrcset<ScriptedHost>, InlineStyle) {
    let style = InlineStyle::new();
    let component = BackgroundSrcset::new(host.clone(), Arc::new(style.clone()), &Settings::default());
    (component, style)
}

/// Submit a complete configuration as separate input changes.
#[allow(dead_code)]
pub fn submit_all(component: &mut BackgroundSrcset<ScriptedHost>, src: &str, srcset: &str) {
    component.apply_input_change(InputName::Src, Some(src.to_string()));
    component.apply_input_change(InputName::SrcSet, Some(srcset.to_string()));
}

/// Wait for the next change notification.
pub async fn next_change(changes: &mut broadcast::Receiver<()>) -> bool {
    matches!(timeout(Duration::from_secs(1), changes.recv()).await, Ok(Ok(())))
}

/// True if no change notification arrives within a short grace period.
pub async fn no_change(changes: &mut broadcast::Receiver<()>) -> bool {
    timeout(Duration::from_millis(50), changes.recv()).await.is_err()
}
