//! Resolver state machine.
//!
//! # States
//! - Idle: no configuration resolved yet
//! - Probing: waiting for the live probe to settle
//! - Settled: live probe settled, awaiting the next configuration
//! - Disposed: teardown raised, nothing is ever reported again
//!
//! # State Transitions
//! ```text
//! Idle | Probing | Settled → Probing: new valid configuration
//! Probing → Settled: live probe settles
//! any → Disposed: teardown
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverState {
    #[default]
    Idle,
    Probing,
    Settled,
    Disposed,
}

impl ResolverState {
    /// Enter `Probing` for a fresh probe. Refused once disposed.
    pub fn begin_probe(&mut self) -> bool {
        if *self == ResolverState::Disposed {
            return false;
        }
        *self = ResolverState::Probing;
        true
    }

    /// Leave `Probing`. Any other state means the settlement is not ours.
    pub fn settle(&mut self) -> bool {
        if *self != ResolverState::Probing {
            return false;
        }
        *self = ResolverState::Settled;
        true
    }

    pub fn dispose(&mut self) {
        *self = ResolverState::Disposed;
    }

    pub fn is_disposed(&self) -> bool {
        *self == ResolverState::Disposed
    }
}
