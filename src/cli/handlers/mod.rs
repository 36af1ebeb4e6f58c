//! Command handlers for CLI operations

pub mod check;
pub mod run;

pub use check::CheckCommandHandler;
pub use run::{RunCommandHandler, RunSummary};
