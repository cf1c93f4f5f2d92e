//! Check orchestration.

pub mod checker;

pub use checker::{CheckProgress, Checker, RunOptions};
