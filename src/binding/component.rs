//! The background-srcset component.

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::config::Settings;
use crate::lifecycle::Shutdown;
use crate::probe::ProbeFactory;
use crate::resolver::{css_url, ResolverState, SourceResolver, StyleSink};
use crate::source::{ConfigMerger, InputName, PartialSourceConfig, SourceConfig};

/// Whether the merger's output currently reaches the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Downstream {
    Pending,
    Attached,
    Released,
}

/// Resolves which source a background should show and keeps it current.
pub struct BackgroundSrcset<F: ProbeFactory> {
    merger: ConfigMerger,
    resolver: SourceResolver<F>,
    shutdown: Shutdown,
    downstream: Downstream,
}

impl<F: ProbeFactory> BackgroundSrcset<F> {
    pub fn new(factory: F, sink: Arc<dyn StyleSink>, settings: &Settings) -> Self {
        let shutdown = Shutdown::new();
        let grammar = settings.grammar.mode;
        let resolver = SourceResolver::new(
            factory,
            sink,
            settings.style.property.clone(),
            shutdown.clone(),
        )
        .with_grammar(grammar);

        Self {
            merger: ConfigMerger::new(grammar),
            resolver,
            shutdown,
            downstream: Downstream::Pending,
        }
    }

    /// Attach the resolver to the merger. Later calls are no-ops.
    pub fn initialize(&mut self) {
        if self.downstream != Downstream::Pending {
            return;
        }
        self.downstream = Downstream::Attached;
        tracing::debug!(submissions = self.merger.submissions(), "Background srcset initialized");

        if let Some(config) = self.merger.validated() {
            self.resolver.on_config(&config);
        }
    }

    /// One input changed. `None` resets it to absent.
    pub fn apply_input_change(&mut self, name: InputName, value: Option<String>) {
        self.apply_input_changes([(name, value)]);
    }

    /// Several inputs changed in the same host pass; submitted as one partial.
    pub fn apply_input_changes<I>(&mut self, changes: I)
    where
        I: IntoIterator<Item = (InputName, Option<String>)>,
    {
        let partial: PartialSourceConfig = changes.into_iter().collect();
        self.submit(&partial);
    }

    /// Submit a partial configuration.
    pub fn submit(&mut self, partial: &PartialSourceConfig) {
        if partial.is_empty() {
            return;
        }

        let Some(config) = self.merger.submit(partial) else {
            return;
        };
        if self.downstream == Downstream::Attached {
            self.resolver.on_config(&config);
        }
    }

    /// End of life: stop observing probes and detach the merger.
    /// Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.shutdown.trigger() {
            tracing::debug!("Background srcset disposed");
        }
        self.downstream = Downstream::Released;
        self.resolver.dispose();
    }

    /// Change notifications, one per newly reported URL.
    pub fn changes(&self) -> broadcast::Receiver<()> {
        self.resolver.changes()
    }

    /// Last reported URL.
    pub fn current_url(&self) -> Option<String> {
        self.resolver.current_url()
    }

    /// CSS value currently applied, e.g. `url(b.jpg)`.
    pub fn background_image(&self) -> Option<String> {
        self.current_url().map(|url| css_url(&url))
    }

    pub fn accumulated(&self) -> &SourceConfig {
        self.merger.accumulated()
    }

    pub fn resolver_state(&self) -> ResolverState {
        self.resolver.state()
    }

    /// Generation of the most recently bound probe; the n-th probe the
    /// factory created carries generation n (one based).
    pub fn generation(&self) -> u64 {
        self.resolver.generation()
    }

    pub fn factory(&self) -> &F {
        self.resolver.factory()
    }

    pub fn is_disposed(&self) -> bool {
        self.shutdown.is_triggered()
    }
}

impl<F: ProbeFactory> Drop for BackgroundSrcset<F> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ScriptedHost;
    use crate::resolver::InlineStyle;

    fn component(host: ScriptedHost) -> (BackgroundSrcset<ScriptedHost>, InlineStyle) {
        let style = InlineStyle::new();
        let component = BackgroundSrcset::new(host, Arc::new(style.clone()), &Settings::default());
        (component, style)
    }

    #[test]
    fn inputs_before_initialize_are_resolved_on_initialize() {
        let host = ScriptedHost::immediate(|_| String::new());
        let (mut component, style) = component(host.clone());

        component.apply_input_change(InputName::Src, Some("a.jpg".into()));
        component.apply_input_change(InputName::SrcSet, Some("a.jpg 1x".into()));
        assert_eq!(host.created(), 0);

        component.initialize();
        component.initialize();
        assert_eq!(host.created(), 1);
        assert_eq!(component.current_url().as_deref(), Some("a.jpg"));
        assert_eq!(style.get("background-image").as_deref(), Some("url(a.jpg)"));
    }

    #[test]
    fn batched_changes_are_one_submission() {
        let host = ScriptedHost::immediate(|_| "b.jpg".into());
        let (mut component, _style) = component(host.clone());
        component.initialize();

        component.apply_input_changes([
            (InputName::Src, Some("a.jpg".to_string())),
            (InputName::SrcSet, Some("a.jpg 1x, b.jpg 2x".to_string())),
            (InputName::Sizes, Some("100vw".to_string())),
        ]);

        let requests = host.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].sizes, "100vw");
        assert_eq!(component.background_image().as_deref(), Some("url(b.jpg)"));
    }

    #[test]
    fn inputs_after_dispose_are_not_forwarded() {
        let host = ScriptedHost::immediate(|_| String::new());
        let (mut component, _style) = component(host.clone());
        component.initialize();
        component.dispose();
        component.dispose();

        component.apply_input_changes([
            (InputName::Src, Some("a.jpg".to_string())),
            (InputName::SrcSet, Some("a.jpg 1x".to_string())),
        ]);

        assert_eq!(host.created(), 0);
        assert_eq!(component.accumulated().src.as_deref(), Some("a.jpg"));
        assert!(component.is_disposed());
        assert_eq!(component.resolver_state(), ResolverState::Disposed);
    }
}
