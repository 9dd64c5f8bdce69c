//! Configuration merger.
//!
//! Folds every submitted partial onto the running accumulation and lets the
//! result through only while it is complete and well formed. Invalid
//! intermediate states are dropped, not buffered.

use crate::observability::metrics;
use crate::source::descriptor::{PartialSourceConfig, SourceConfig, ValidSourceConfig};
use crate::source::grammar::GrammarMode;

#[derive(Debug, Default)]
pub struct ConfigMerger {
    accumulated: SourceConfig,
    grammar: GrammarMode,
    submissions: u64,
}

impl ConfigMerger {
    pub fn new(grammar: GrammarMode) -> Self {
        Self {
            accumulated: SourceConfig::default(),
            grammar,
            submissions: 0,
        }
    }

    /// Merge `partial` and return the accumulation if it is now valid.
    pub fn submit(&mut self, partial: &PartialSourceConfig) -> Option<ValidSourceConfig> {
        self.accumulated = self.accumulated.merge(partial);
        self.submissions += 1;

        let valid = self.validated();
        match &valid {
            Some(config) => {
                metrics::record_config_forwarded();
                tracing::debug!(
                    submission = self.submissions,
                    src = %config.src,
                    srcset = %config.srcset,
                    "Source configuration accepted"
                );
            }
            None => {
                metrics::record_config_dropped();
                tracing::trace!(submission = self.submissions, "Incomplete source configuration dropped");
            }
        }
        valid
    }

    /// Validate the current accumulation without merging anything.
    pub fn validated(&self) -> Option<ValidSourceConfig> {
        validate(&self.accumulated, self.grammar)
    }

    pub fn accumulated(&self) -> &SourceConfig {
        &self.accumulated
    }

    pub fn grammar(&self) -> GrammarMode {
        self.grammar
    }

    /// Number of partials folded so far.
    pub fn submissions(&self) -> u64 {
        self.submissions
    }
}

/// Pure validity check: `src` present and `srcset` accepted by `grammar`.
pub fn validate(config: &SourceConfig, grammar: GrammarMode) -> Option<ValidSourceConfig> {
    let src = config.src.as_ref()?;
    if !grammar.accepts(config.srcset.as_deref()) {
        return None;
    }

    Some(ValidSourceConfig {
        src: src.clone(),
        srcset: config.srcset.clone().unwrap_or_default(),
        sizes: config.sizes.clone(),
    })
}
