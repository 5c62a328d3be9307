//! Header discoverability for pod targets.
//!
//! Both `#import "…"` and `#import <…>` must resolve to pod headers:
//! - Framework mode: quote-style includes go through `-iquote` on every
//!   framework's `Headers` directory; angle-bracket and `@import` forms are
//!   served by the framework search path.
//! - Static mode: the flattened public headers of the sandbox are added to
//!   `HEADER_SEARCH_PATHS` (quoted) and as `-isystem` flags (angle brackets).

use crate::builder::sandbox::Sandbox;
use crate::core::settings::{join_flags, keys, quote, SettingsTable, INHERITED};
use crate::core::{Packaging, PodTarget, TargetFacts};

/// Computes the header search settings for a consuming target.
pub struct ImportVisibility<'a> {
    target: &'a TargetFacts,
    sandbox: &'a dyn Sandbox,
}

impl<'a> ImportVisibility<'a> {
    pub fn new(target: &'a TargetFacts, sandbox: &'a dyn Sandbox) -> Self {
        ImportVisibility { target, sandbox }
    }

    pub fn settings(&self, packaging: Packaging) -> SettingsTable {
        match packaging {
            Packaging::Framework => self.framework_settings(),
            Packaging::StaticLibrary => self.static_settings(),
        }
    }

    fn framework_settings(&self) -> SettingsTable {
        let build_dir = &self.target.configuration_build_dir;

        let header_dirs: Vec<String> = self
            .target
            .pod_targets
            .iter()
            .map(|pod| framework_headers_dir(pod, build_dir))
            .collect();

        let mut settings = SettingsTable::new()
            .with(keys::PODS_FRAMEWORK_BUILD_PATH, build_dir.as_str())
            .with(
                keys::OTHER_CFLAGS,
                join_flags(&[INHERITED.to_string(), quote(&header_dirs, Some("-iquote"))]),
            );

        if self
            .target
            .pod_targets
            .iter()
            .any(|pod| pod.should_build && pod.scoped)
        {
            settings = settings.with(
                keys::FRAMEWORK_SEARCH_PATHS,
                join_flags(&[INHERITED.to_string(), quote(&[build_dir], None)]),
            );
        }

        settings
    }

    fn static_settings(&self) -> SettingsTable {
        let paths = self
            .sandbox
            .public_header_search_paths(self.target.platform);

        SettingsTable::new()
            .with(keys::HEADER_SEARCH_PATHS, quote(&paths, None))
            .with(
                keys::OTHER_CFLAGS,
                join_flags(&[INHERITED.to_string(), quote(&paths, Some("-isystem"))]),
            )
    }
}

/// `<build dir>/<product>/Headers` for scoped pods, `<product>/Headers` otherwise.
fn framework_headers_dir(pod: &PodTarget, build_dir: &str) -> String {
    if pod.scoped {
        format!(
            "{}/{}/Headers",
            build_dir.trim_end_matches('/'),
            pod.product_name
        )
    } else {
        format!("{}/Headers", pod.product_name)
    }
}
