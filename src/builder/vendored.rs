//! Link settings for vendored (pre-built) artifacts of pod targets.
//!
//! A pod that builds its own framework already links its vendored artifacts
//! into that framework's binary, so those pods are skipped here.

use crate::core::settings::SettingsTable;
use crate::core::{PodTarget, TargetFacts};

pub struct VendoredArtifacts<'a> {
    target: &'a TargetFacts,
}

impl<'a> VendoredArtifacts<'a> {
    pub fn new(target: &'a TargetFacts) -> Self {
        VendoredArtifacts { target }
    }

    /// Pods whose vendored artifacts must be linked by the consuming target.
    pub fn contributing_pods(&self) -> impl Iterator<Item = &'a PodTarget> {
        self.target
            .pod_targets
            .iter()
            .filter(|pod| !(pod.should_build && pod.requires_frameworks))
    }

    pub fn settings(&self) -> SettingsTable {
        let mut settings = SettingsTable::new();
        for pod in self.contributing_pods() {
            for accessor in &pod.file_accessors {
                settings.merge(accessor.build_settings(&self.target.sandbox_root));
            }
        }
        settings
    }
}
