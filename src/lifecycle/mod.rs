//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! initialize():
//!     Attach merger downstream → forward current accumulation if valid
//!
//! dispose() (shutdown.rs):
//!     Teardown raised once → watcher tasks stop
//!     → resolver subscription released → merger downstream detached
//! ```
//!
//! # Design Decisions
//! - One external cancellation point per component instance
//! - Every release is idempotent; teardown without subscriptions is a no-op
//! - No deadlines: nothing is cancelled by time

pub mod shutdown;

pub use shutdown::Shutdown;
