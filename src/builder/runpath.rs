//! Dynamic loader search paths for embedded frameworks.

use crate::core::settings::{keys, SettingsTable, INHERITED};
use crate::core::{NativeTargetKind, RunpathConvention, TargetFacts};

pub struct Runpath<'a> {
    target: &'a TargetFacts,
}

impl<'a> Runpath<'a> {
    pub fn new(target: &'a TargetFacts) -> Self {
        Runpath { target }
    }

    pub fn search_paths(&self) -> Vec<&'static str> {
        runpath_search_paths(
            self.target.platform.runpath_convention(),
            self.target.native_target_kind,
        )
    }

    pub fn settings(&self) -> SettingsTable {
        SettingsTable::new().with(keys::LD_RUNPATH_SEARCH_PATHS, self.search_paths().join(" "))
    }
}

/// Unit test bundles on the desktop load from `Contents/PlugIns/<bundle>`,
/// one directory deeper than ordinary binaries.
fn runpath_search_paths(
    convention: RunpathConvention,
    kind: NativeTargetKind,
) -> Vec<&'static str> {
    match convention {
        RunpathConvention::Desktop => {
            let loader = match kind {
                NativeTargetKind::UnitTestBundle => "'@loader_path/../Frameworks'",
                _ => "'@loader_path/Frameworks'",
            };
            vec![INHERITED, "'@executable_path/../Frameworks'", loader]
        }
        RunpathConvention::Embedded => vec![
            INHERITED,
            "'@executable_path/Frameworks'",
            "'@loader_path/Frameworks'",
        ],
    }
}
