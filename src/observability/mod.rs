//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! merger, resolver, probe host produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//! ```
//!
//! # Design Decisions
//! - Dropped configurations are logged at trace level only
//! - Probe generation flows through resolver log events
//! - Metrics are cheap (facade calls, no-op without a recorder)

pub mod logging;
pub mod metrics;
