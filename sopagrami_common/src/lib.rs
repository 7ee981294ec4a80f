//! Common configuration and shared types for the SoPaGraMi workspace.
//!
//! This crate provides the mining parameters and the small fixture graphs
//! used by tests across the workspace.

mod config;
mod test_cases;

pub use crate::config::*;
pub use crate::test_cases::*;
