//! Probe contract.
//!
//! A probe is the host environment resolving one source configuration: it
//! performs responsive source negotiation natively and reports when it has
//! settled. This crate never negotiates; it only decides when to probe and
//! what to report.
//!
//! # Lifecycle
//! ```text
//! ProbeFactory::create(request)
//!     → is_settled()?  yes → resolution() read immediately
//!                      no  → settled() one-shot signal awaited
//!     → resolution(): current_src (possibly empty) + src echo
//! ```

pub mod scripted;

use tokio::sync::oneshot;
use crate::source::ValidSourceConfig;

pub use scripted::{ScriptedHost, ScriptedProbe};

/// What a probe is seeded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub src: String,
    pub srcset: String,
    /// Empty when the host never supplied a sizing hint.
    pub sizes: String,
}

impl From<&ValidSourceConfig> for ProbeRequest {
    fn from(config: &ValidSourceConfig) -> Self {
        Self {
            src: config.src.clone(),
            srcset: config.srcset.clone(),
            sizes: config.sizes_or_empty().to_string(),
        }
    }
}

/// Fields readable once a probe has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Negotiated current source; empty when negotiation picked nothing.
    pub current_src: String,
    /// Echo of the primary source.
    pub src: String,
}

impl Resolution {
    /// The negotiated source, falling back to the primary source.
    pub fn effective_url(&self) -> &str {
        if self.current_src.is_empty() {
            &self.src
        } else {
            &self.current_src
        }
    }
}

/// One host-side resolution of a configuration.
pub trait Probe: Send + 'static {
    /// Whether the host already settled this probe. Checked once, right
    /// after creation.
    fn is_settled(&self) -> bool;

    /// One-shot settlement signal. A closed channel means the probe will
    /// never settle.
    fn settled(&mut self) -> oneshot::Receiver<()>;

    /// Settled fields. Only meaningful after settlement.
    fn resolution(&self) -> Resolution;
}

/// Creates probes bound to a configuration.
pub trait ProbeFactory: Send + Sync + 'static {
    type Probe: Probe;

    fn create(&self, request: ProbeRequest) -> Self::Probe;
}
