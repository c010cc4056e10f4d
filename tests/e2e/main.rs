//! End-to-end tests for grit, driven through the scenario harness.

mod harness;
