//! Test utilities and mocks for unit tests.
//!
//! Provides recording implementations of the generator's collaborators so
//! tests can control their output and assert how they were called.
//!
//! # Example
//!
//! ```rust,ignore
//! use pod_xcconfig::test_support::{MockSandbox, StaticRules};
//!
//! let sandbox = MockSandbox::new(vec!["${PODS_ROOT}/Headers/Public"]);
//! let rules = StaticRules::new(SettingsTable::new().with("A", "1"));
//! let table = Aggregator::new(&sandbox, &rules).generate(&target);
//! ```

pub mod fixtures;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::builder::sandbox::Sandbox;
use crate::builder::target_rules::TargetSettingsRules;
use crate::core::{Platform, SettingsTable, TargetFacts};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Sandbox returning a fixed list of header search paths.
#[derive(Debug, Default)]
pub struct MockSandbox {
    paths: Vec<String>,
    requests: Mutex<Vec<Platform>>,
}

impl MockSandbox {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockSandbox {
            paths: paths.into_iter().map(Into::into).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Platforms the generator asked for, in call order.
    pub fn requested_platforms(&self) -> Vec<Platform> {
        self.requests.lock().unwrap().clone()
    }
}

impl Sandbox for MockSandbox {
    fn public_header_search_paths(&self, platform: Platform) -> Vec<String> {
        self.requests.lock().unwrap().push(platform);
        self.paths.clone()
    }
}

/// Target rules returning the same table for every target.
#[derive(Debug, Default)]
pub struct StaticRules {
    settings: SettingsTable,
    calls: AtomicUsize,
}

impl StaticRules {
    pub fn new(settings: SettingsTable) -> Self {
        StaticRules {
            settings,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TargetSettingsRules for StaticRules {
    fn settings_for(&self, _target: &TargetFacts) -> SettingsTable {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.settings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_sandbox_records_requests() {
        let sandbox = MockSandbox::new(vec!["a", "b"]);
        assert_eq!(sandbox.public_header_search_paths(Platform::Tvos), vec!["a", "b"]);
        assert_eq!(sandbox.requested_platforms(), vec![Platform::Tvos]);
    }

    #[test]
    fn test_static_rules_counts_calls() {
        let rules = StaticRules::new(SettingsTable::new().with("A", "1"));
        let target = static_target(Platform::Ios, vec![]);

        assert_eq!(rules.settings_for(&target).get("A"), Some("1"));
        assert_eq!(rules.calls(), 1);
    }
}
