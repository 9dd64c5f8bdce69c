//! Scripted replay of host activity.
//!
//! A script lists what a host would do to one component: input changes,
//! lifecycle calls, and probe settlements. Replaying it reports every change
//! notification together with the CSS value applied at that point.
//!
//! ```toml
//! [host]
//! mode = "deferred"      # probes settle only through `settle` steps
//!
//! [[steps]]
//! action = "input"
//! name = "src"
//! value = "a.jpg"
//!
//! [[steps]]
//! action = "settle"
//! probe = 0
//! current_src = "b.jpg"
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast::error::TryRecvError;

use crate::binding::BackgroundSrcset;
use crate::config::Settings;
use crate::probe::{ProbeFactory, ScriptedHost};
use crate::resolver::{InlineStyle, ResolverState};
use crate::source::InputName;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("step {step}: no pending probe #{probe}")]
    UnknownProbe { step: usize, probe: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMode {
    #[default]
    Deferred,
    Immediate,
}

/// How the simulated host settles probes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HostScript {
    pub mode: HostMode,
    /// Negotiated source for probes settled on creation; empty for none.
    pub current_src: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    Initialize,
    Input {
        name: InputName,
        #[serde(default)]
        value: Option<String>,
    },
    Settle {
        probe: usize,
        #[serde(default)]
        current_src: String,
    },
    Dispose,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Script {
    pub host: HostScript,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(content: &str) -> Result<Self, ReplayError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

/// One change notification observed during replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayEvent {
    /// Zero-based index of the step after which the change was observed.
    pub step: usize,
    pub background_image: String,
}

/// Upper bound on waiting for a watcher to handle a settlement.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Wait until the settlement bound at `generation` has been handled.
///
/// A superseded generation, or a disposed component, needs no wait. The resolver leaves `Probing` under the same lock that raises the
/// change, so once it has left, the change is already in the channel.
async fn await_settlement<F: ProbeFactory>(
    component: &BackgroundSrcset<F>,
    generation: u64,
) {
    let handled = async {
        while component.generation() == generation
            && component.resolver_state() == ResolverState::Probing
        {
            tokio::task::yield_now().await;
        }
    };
    if tokio::time::timeout(SETTLE_TIMEOUT, handled).await.is_err() {
        tracing::warn!(generation, "Settlement not handled in time");
    }
}

/// Replay `script` against a fresh component.
///
/// Works on any runtime flavour: every change is attributed to the step
/// that caused it.
pub async fn run(script: &Script, settings: &Settings) -> Result<Vec<ReplayEvent>, ReplayError> {
    let host = match script.host.mode {
        HostMode::Deferred => ScriptedHost::deferred(),
        HostMode::Immediate => {
            let current_src = script.host.current_src.clone();
            ScriptedHost::immediate(move |_| current_src.clone())
        }
    };

    let style = InlineStyle::new();
    let mut component = BackgroundSrcset::new(host.clone(), Arc::new(style.clone()), settings);
    let mut changes = component.changes();
    let mut events = Vec::new();

    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!(index, ?step, "Replaying step");
        match step {
            Step::Initialize => component.initialize(),
            Step::Input { name, value } => component.apply_input_change(*name, value.clone()),
            Step::Settle { probe, current_src } => {
                if !host.settle(*probe, current_src) {
                    return Err(ReplayError::UnknownProbe {
                        step: index,
                        probe: *probe,
                    });
                }
                // Only settlements are delivered asynchronously.
                await_settlement(&component, *probe as u64 + 1).await;
            }
            Step::Dispose => component.dispose(),
        }

        loop {
            match changes.try_recv() {
                Ok(()) | Err(TryRecvError::Lagged(_)) => {
                    let background_image = style
                        .get(&settings.style.property)
                        .unwrap_or_default();
                    events.push(ReplayEvent {
                        step: index,
                        background_image,
                    });
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    Ok(events)
}
