//! pod-xcconfig - Aggregate build settings for pod-based native projects
//!
//! This crate computes the `.xcconfig` build settings a consuming target
//! needs to compile against, link and embed the pod targets it depends on.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides fixtures for target facts and mock collaborators.
#[cfg(test)]
pub mod test_support;

pub use builder::{Aggregator, DefaultTargetRules, HeadersStore, Sandbox, TargetSettingsRules};
pub use core::{FactsManifest, Platform, PodTarget, SettingsTable, TargetFacts};
pub use util::context::GlobalContext;
