//! Target-specific settings merged verbatim into the aggregate table.

use crate::core::settings::{join_flags, keys, quote, SettingsTable, INHERITED};
use crate::core::{Packaging, TargetFacts};

/// Source of settings that depend on the consuming target itself.
pub trait TargetSettingsRules: Send + Sync {
    fn settings_for(&self, target: &TargetFacts) -> SettingsTable;
}

/// Contributes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargetRules;

impl TargetSettingsRules for NoTargetRules {
    fn settings_for(&self, _target: &TargetFacts) -> SettingsTable {
        SettingsTable::new()
    }
}

/// Language rules for targets integrating Swift pods.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTargetRules;

impl TargetSettingsRules for DefaultTargetRules {
    fn settings_for(&self, target: &TargetFacts) -> SettingsTable {
        let mut settings = SettingsTable::new();
        if !target.uses_swift() {
            return settings;
        }

        settings = settings.with(
            keys::OTHER_SWIFT_FLAGS,
            join_flags(&[INHERITED.to_string(), quote(&["-D", "COCOAPODS"], None)]),
        );

        if target.packaging() == Packaging::Framework && !target.native_target_kind.is_test_bundle()
        {
            settings = settings.with(keys::EMBEDDED_CONTENT_CONTAINS_SWIFT, "YES");
        }

        settings
    }
}
