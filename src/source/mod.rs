//! Source configuration subsystem.
//!
//! # Data Flow
//! ```text
//! host input change (src | srcset | sizes)
//!     → descriptor.rs (PartialSourceConfig)
//!     → merger.rs (shallow-merge fold onto the accumulation)
//!     → grammar.rs (candidate-list check)
//!     → ValidSourceConfig handed to the resolver
//! ```
//!
//! # Design Decisions
//! - The three inputs arrive independently and in any order
//! - Invalid accumulations are dropped silently; the next fact re-evaluates
//! - Validation is a pure function of the accumulation

pub mod descriptor;
pub mod grammar;
pub mod merger;

pub use descriptor::{InputError, InputName, PartialSourceConfig, SourceConfig, ValidSourceConfig};
pub use grammar::{CandidateList, GrammarMode};
pub use merger::ConfigMerger;
