//! Host-driven probes.
//!
//! `ScriptedHost` stands in for an environment whose image loads complete
//! when the host says so. Probes either settle on creation with a fixed
//! negotiated source, or stay pending until `settle` names them by creation
//! index. Used by the replay binary and the test suite.

use std::sync::Arc;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use crate::probe::{Probe, ProbeFactory, ProbeRequest, Resolution};

type Negotiate = Box<dyn Fn(&ProbeRequest) -> String + Send + Sync>;

#[derive(Debug, Default)]
struct ProbeSlot {
    settled: bool,
    current_src: String,
}

struct ProbeRecord {
    request: ProbeRequest,
    slot: Arc<Mutex<ProbeSlot>>,
    signal: Option<oneshot::Sender<()>>,
}

struct HostState {
    immediate: Option<Negotiate>,
    probes: Vec<ProbeRecord>,
}

/// A probe factory controlled by the caller.
#[derive(Clone)]
pub struct ScriptedHost {
    inner: Arc<Mutex<HostState>>,
}

impl ScriptedHost {
    /// Every probe stays pending until `settle` is called for it.
    pub fn deferred() -> Self {
        Self::with_immediate(None)
    }

    /// Every probe settles on creation; `negotiate` picks its current source
    /// (empty for none).
    pub fn immediate<F>(negotiate: F) -> Self
    where
        F: Fn(&ProbeRequest) -> String + Send + Sync + 'static,
    {
        Self::with_immediate(Some(Box::new(negotiate)))
    }

    fn with_immediate(immediate: Option<Negotiate>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HostState {
                immediate,
                probes: Vec::new(),
            })),
        }
    }

    /// Settle the probe created `index`-th (zero based).
    ///
    /// Returns `false` for an unknown or already settled probe.
    pub fn settle(&self, index: usize, current_src: &str) -> bool {
        let mut state = self.inner.lock();
        let Some(record) = state.probes.get_mut(index) else {
            return false;
        };

        {
            let mut slot = record.slot.lock();
            if slot.settled {
                return false;
            }
            slot.settled = true;
            slot.current_src = current_src.to_string();
        }

        if let Some(signal) = record.signal.take() {
            // Receiver gone means nobody observes this probe anymore.
            let _ = signal.send(());
        }
        tracing::debug!(probe = index, current_src, "Scripted probe settled");
        true
    }

    /// Requests of every probe created so far, in creation order.
    pub fn requests(&self) -> Vec<ProbeRequest> {
        self.inner
            .lock()
            .probes
            .iter()
            .map(|record| record.request.clone())
            .collect()
    }

    pub fn created(&self) -> usize {
        self.inner.lock().probes.len()
    }
}

impl ProbeFactory for ScriptedHost {
    type Probe = ScriptedProbe;

    fn create(&self, request: ProbeRequest) -> ScriptedProbe {
        let mut state = self.inner.lock();
        let (tx, rx) = oneshot::channel();

        let slot = match &state.immediate {
            Some(negotiate) => ProbeSlot {
                settled: true,
                current_src: negotiate(&request),
            },
            None => ProbeSlot::default(),
        };
        let settled = slot.settled;
        let slot = Arc::new(Mutex::new(slot));

        state.probes.push(ProbeRecord {
            request: request.clone(),
            slot: slot.clone(),
            signal: if settled { None } else { Some(tx) },
        });

        ScriptedProbe {
            src: request.src,
            slot,
            signal: Some(rx),
        }
    }
}

/// Probe handed out by `ScriptedHost`.
pub struct ScriptedProbe {
    src: String,
    slot: Arc<Mutex<ProbeSlot>>,
    signal: Option<oneshot::Receiver<()>>,
}

impl Probe for ScriptedProbe {
    fn is_settled(&self) -> bool {
        self.slot.lock().settled
    }

    fn settled(&mut self) -> oneshot::Receiver<()> {
        self.signal.take().unwrap_or_else(|| oneshot::channel().1)
    }

    fn resolution(&self) -> Resolution {
        Resolution {
            current_src: self.slot.lock().current_src.clone(),
            src: self.src.clone(),
        }
    }
}
