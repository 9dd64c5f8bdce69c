//! Host binding.
//!
//! # Data Flow
//! ```text
//! host:  initialize() | apply_input_change(name, value) | dispose()
//!     → component.rs
//!         → ConfigMerger::submit
//!         → (downstream attached?) SourceResolver::on_config
//!     → changes() notifications, current_url(), background_image()
//! ```
//!
//! # Design Decisions
//! - The host calls the three entry points at the right moments; no hooks
//! - Inputs submitted before initialize() accumulate and are evaluated once
//!   on initialize()
//! - Teardown is raised exactly once, also on drop

pub mod component;

pub use component::BackgroundSrcset;
