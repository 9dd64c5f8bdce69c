//! Source resolution subsystem.
//!
//! # Data Flow
//! ```text
//! ValidSourceConfig
//!     → engine.rs (release old subscription, create probe)
//!     → probe settled already?  → report now
//!       otherwise               → watcher task awaits the one-shot signal
//!     → effective URL = negotiated current source OR primary source
//!     → differs from last reported?
//!         → style.rs (write `url(...)`)
//!         → change notification
//! ```
//!
//! # Design Decisions
//! - At most one live probe; a newer configuration abandons the older probe
//! - No timeouts: a probe that never settles leaves the style untouched
//! - Notifications carry no payload; the host reads the current URL

pub mod engine;
pub mod state;
pub mod style;

pub use engine::SourceResolver;
pub use state::ResolverState;
pub use style::{css_url, InlineStyle, StyleSink};
