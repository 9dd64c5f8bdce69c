//! Responsive background source resolution.
//!
//! Merges independently arriving `src`, `srcset` and `sizes` inputs into a
//! valid configuration, asks the host environment to negotiate a source for
//! it through a [`probe::Probe`], and reports a change whenever the resolved
//! URL differs from the last one reported.

pub mod binding;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod replay;
pub mod resolver;
pub mod source;

pub use binding::BackgroundSrcset;
pub use config::Settings;
pub use lifecycle::Shutdown;
pub use probe::{Probe, ProbeFactory, ProbeRequest, Resolution};
pub use resolver::{InlineStyle, SourceResolver, StyleSink};
pub use source::{InputName, PartialSourceConfig};
