//! E2E test harness for grit.
//!
//! This module contains test infrastructure with intentionally unused
//! builders and assertions that will be used as more e2e scenarios are
//! written.

#![allow(dead_code)]

pub mod runner;

// Re-export commonly used types
pub use assertions::Assertion;
pub use scenario::Scenario;
pub use workspace::TestWorkspace;
