//! Source resolver.
//!
//! # Responsibilities
//! - Create a fresh probe for every validated configuration
//! - Observe at most one probe at a time
//! - Report the effective URL when it differs from the last reported one
//!
//! # Ordering
//! Each probe gets a generation number. A settlement is dispatched only if
//! its generation is still the live one and the resolver is `Probing`, both
//! checked under the state lock. Releasing a subscription aborts its watcher
//! task; the generation check covers a settlement already in flight.

use std::sync::Arc;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::probe::{Probe, ProbeFactory, ProbeRequest, Resolution};
use crate::resolver::state::ResolverState;
use crate::resolver::style::{css_url, StyleSink};
use crate::source::{CandidateList, GrammarMode, ValidSourceConfig};

#[derive(Debug, Default)]
struct Shared {
    state: ResolverState,
    generation: u64,
    last_reported: Option<String>,
}

struct Inner {
    shared: Mutex<Shared>,
    sink: Arc<dyn StyleSink>,
    property: String,
    changes: broadcast::Sender<()>,
}

impl Inner {
    /// Report a settled probe. Returns `true` if a change was raised.
    fn settle(&self, generation: u64, resolution: Resolution) -> bool {
        let mut shared = self.shared.lock();
        if shared.generation != generation || !shared.state.settle() {
            tracing::trace!(generation, live = shared.generation, "Ignoring stale probe settlement");
            return false;
        }

        let url = resolution.effective_url();
        if shared.last_reported.as_deref() == Some(url) {
            tracing::trace!(generation, url, "Resolved source unchanged");
            return false;
        }

        shared.last_reported = Some(url.to_string());
        self.sink.set_property(&self.property, &css_url(url));
        metrics::record_change();
        tracing::debug!(generation, url, "Resolved source changed");

        // No subscribers is fine; the style write already happened.
        let _ = self.changes.send(());
        true
    }
}

/// Watcher task observing one pending probe.
struct Subscription {
    generation: u64,
    task: JoinHandle<()>,
}

/// Turns validated configurations into resolved source URLs.
pub struct SourceResolver<F: ProbeFactory> {
    factory: F,
    inner: Arc<Inner>,
    subscription: Option<Subscription>,
    shutdown: Shutdown,
    grammar: GrammarMode,
}

impl<F: ProbeFactory> SourceResolver<F> {
    pub fn new(
        factory: F,
        sink: Arc<dyn StyleSink>,
        property: impl Into<String>,
        shutdown: Shutdown,
    ) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            factory,
            inner: Arc::new(Inner {
                shared: Mutex::new(Shared::default()),
                sink,
                property: property.into(),
                changes,
            }),
            subscription: None,
            shutdown,
            grammar: GrammarMode::default(),
        }
    }

    /// Grammar used when splitting candidate lists for diagnostics.
    pub fn with_grammar(mut self, grammar: GrammarMode) -> Self {
        self.grammar = grammar;
        self
    }

    /// Resolve a validated configuration with a fresh probe.
    pub fn on_config(&mut self, config: &ValidSourceConfig) {
        if self.state().is_disposed() {
            return;
        }

        let candidates = CandidateList::parse(&config.srcset, self.grammar)
            .map(|list| list.len())
            .unwrap_or_default();
        tracing::debug!(src = %config.src, candidates, "Creating probe");

        let probe = self.factory.create(ProbeRequest::from(config));
        metrics::record_probe_created();
        self.replace_probe(probe);
    }

    /// Unsubscribe the old probe, bind `probe`, and report it right away if
    /// the host already settled it.
    pub fn replace_probe(&mut self, mut probe: F::Probe) {
        self.release();

        let generation = {
            let mut shared = self.inner.shared.lock();
            if !shared.state.begin_probe() {
                return;
            }
            shared.generation += 1;
            shared.generation
        };

        if probe.is_settled() {
            self.inner.settle(generation, probe.resolution());
            return;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(generation, error = %e, "No runtime to observe probe; it stays pending");
                return;
            }
        };

        let signal = probe.settled();
        let mut shutdown = self.shutdown.subscribe();
        let inner = self.inner.clone();
        let task = handle.spawn(async move {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::trace!(generation, "Probe watcher stopped by teardown");
                }
                result = signal => match result {
                    Ok(()) => {
                        inner.settle(generation, probe.resolution());
                    }
                    Err(_) => {
                        tracing::trace!(generation, "Probe dropped its settlement signal");
                    }
                },
            }
        });

        self.subscription = Some(Subscription { generation, task });
    }

    /// Drop the current probe subscription, if any.
    pub fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            if !subscription.task.is_finished() {
                metrics::record_probe_superseded();
                tracing::trace!(generation = subscription.generation, "Releasing pending probe");
            }
            subscription.task.abort();
        }
    }

    /// Teardown: release the subscription and never report again.
    pub fn dispose(&mut self) {
        self.inner.shared.lock().state.dispose();
        self.release();
    }

    /// Subscribe to change notifications.
    pub fn changes(&self) -> broadcast::Receiver<()> {
        self.inner.changes.subscribe()
    }

    /// Last reported URL.
    pub fn current_url(&self) -> Option<String> {
        self.inner.shared.lock().last_reported.clone()
    }

    pub fn state(&self) -> ResolverState {
        self.inner.shared.lock().state
    }

    /// Generation of the most recently bound probe.
    pub fn generation(&self) -> u64 {
        self.inner.shared.lock().generation
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<F: ProbeFactory> Drop for SourceResolver<F> {
    fn drop(&mut self) {
        self.release();
    }
}
