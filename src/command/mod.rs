//! Command pipeline
//!
//! Turns an interpreted kill directive into terminated processes:
//! KillDirective -> safety filter -> ApprovedNames -> resolver ->
//! Vec<TerminationTarget> -> confirm -> executor -> TerminationOutcome

pub mod executor;
pub mod pipeline;
pub mod resolver;
pub mod safety;

pub use executor::{TerminationExecutor, TerminationFailure, TerminationOutcome};
pub use pipeline::{Assistant, RunReport};
pub use resolver::{MatchReason, TerminationTarget};
pub use safety::ApprovedNames;
