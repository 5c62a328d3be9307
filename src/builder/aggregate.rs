//! Aggregate settings generation.
//!
//! The `Aggregator` seeds a table with baseline defaults, asks each builder for
//! a partial table in a fixed order, and merges every partial table itself.
//! Builders never see each other's output; the order below matters because
//! `OTHER_LDFLAGS` is contributed by several steps and must accumulate.
//!
//! 1. Baseline (`OTHER_LDFLAGS`, `OTHER_LIBTOOLFLAGS`, `PODS_ROOT`, definitions)
//! 2. Pods' `user_target_xcconfig`
//! 3. Import visibility
//! 4. Target-specific rules
//! 5. Vendored artifacts
//! 6. Pod link flags
//! 7. `USE_HEADERMAP` removal
//! 8. Runpath search paths (frameworks only)

use tracing::debug;

use crate::builder::import_visibility::ImportVisibility;
use crate::builder::link_flags::LinkFlags;
use crate::builder::runpath::Runpath;
use crate::builder::sandbox::Sandbox;
use crate::builder::target_rules::TargetSettingsRules;
use crate::builder::vendored::VendoredArtifacts;
use crate::core::settings::{join_flags, keys, SettingsTable, INHERITED};
use crate::core::{FactsError, Packaging, TargetFacts};

/// Preprocessor definition marking a dependency-managed build.
pub const COCOAPODS_DEFINITION: &str = "COCOAPODS=1";

/// Orchestrates settings generation for consuming targets.
///
/// Holds only borrowed collaborators, so one aggregator can serve many
/// targets concurrently.
pub struct Aggregator<'a> {
    sandbox: &'a dyn Sandbox,
    rules: &'a dyn TargetSettingsRules,
}

impl<'a> Aggregator<'a> {
    pub fn new(sandbox: &'a dyn Sandbox, rules: &'a dyn TargetSettingsRules) -> Self {
        Aggregator { sandbox, rules }
    }

    /// Validate the facts, then generate.
    pub fn generate_checked(&self, target: &TargetFacts) -> Result<SettingsTable, FactsError> {
        target.validate()?;
        Ok(self.generate(target))
    }

    /// Generate the aggregate settings table for `target`.
    ///
    /// The facts are assumed valid; see [`TargetFacts::validate`].
    pub fn generate(&self, target: &TargetFacts) -> SettingsTable {
        let packaging = target.packaging();
        debug!(
            "generating settings for `{}` ({}, {}, {:?}, {} pods)",
            target.name,
            target.configuration,
            target.platform,
            packaging,
            target.pod_targets.len()
        );

        let mut table = baseline_settings(target);

        for pod in &target.pod_targets {
            table.merge(pod.user_target_xcconfig.clone());
        }

        let import = ImportVisibility::new(target, self.sandbox).settings(packaging);
        debug!("import visibility: {} keys", import.len());
        table.merge(import);

        table.merge(self.rules.settings_for(target));

        let vendored = VendoredArtifacts::new(target).settings();
        debug!("vendored artifacts: {} keys", vendored.len());
        table.merge(vendored);

        table.merge(LinkFlags::new(target).settings());

        // Header maps of the user project would shadow pod headers.
        table.remove(keys::USE_HEADERMAP);

        if packaging == Packaging::Framework {
            table.merge(Runpath::new(target).settings());
        }

        debug!("generated {} settings for `{}`", table.len(), target.name);
        table
    }
}

/// The settings every aggregate table starts from.
pub fn baseline_settings(target: &TargetFacts) -> SettingsTable {
    SettingsTable::new()
        .with(
            keys::OTHER_LDFLAGS,
            join_flags(&[INHERITED, default_ld_flags(target)]),
        )
        .with(keys::OTHER_LIBTOOLFLAGS, "$(OTHER_LDFLAGS)")
        .with(keys::PODS_ROOT, target.pods_root.as_str())
        .with(
            keys::GCC_PREPROCESSOR_DEFINITIONS,
            join_flags(&[INHERITED, COCOAPODS_DEFINITION]),
        )
}

/// `-ObjC` forces categories in static archives to be loaded.
pub fn default_ld_flags(target: &TargetFacts) -> &'static str {
    if target.includes_static_libraries() {
        "-ObjC"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::builder::sandbox::HeadersStore;
    use crate::builder::target_rules::{DefaultTargetRules, NoTargetRules};
    use crate::core::{FileAccessor, NativeTargetKind, Platform, PodTarget};
    use crate::test_support::fixtures::{framework_pod, framework_target, pod, static_target};
    use crate::test_support::{MockSandbox, StaticRules};

    fn generate(target: &TargetFacts) -> SettingsTable {
        let sandbox = HeadersStore::new();
        Aggregator::new(&sandbox, &NoTargetRules).generate(target)
    }

    #[test]
    fn test_alamofire_on_desktop() {
        let target = framework_target(Platform::Osx, vec![framework_pod("Alamofire")]);
        let table = generate(&target);

        let ld_flags = table.get(keys::OTHER_LDFLAGS).unwrap();
        assert!(ld_flags.contains("-framework \"Alamofire\""));
        assert_eq!(ld_flags, "$(inherited) -framework \"Alamofire\"");
        assert_eq!(
            table.get(keys::LD_RUNPATH_SEARCH_PATHS),
            Some("$(inherited) '@executable_path/../Frameworks' '@loader_path/Frameworks'")
        );
    }

    #[test]
    fn test_baseline_keys() {
        let target = static_target(Platform::Ios, vec![pod("A")]);
        let table = generate(&target);

        assert_eq!(table.get(keys::OTHER_LIBTOOLFLAGS), Some("$(OTHER_LDFLAGS)"));
        assert_eq!(table.get(keys::PODS_ROOT), Some(target.pods_root.as_str()));
        assert_eq!(
            table.get(keys::GCC_PREPROCESSOR_DEFINITIONS),
            Some("$(inherited) COCOAPODS=1")
        );
        assert_eq!(
            table.keys().take(4).collect::<Vec<_>>(),
            vec![
                keys::OTHER_LDFLAGS,
                keys::OTHER_LIBTOOLFLAGS,
                keys::PODS_ROOT,
                keys::GCC_PREPROCESSOR_DEFINITIONS
            ]
        );
    }

    #[test]
    fn test_static_target_keeps_default_and_pod_flags() {
        let target = static_target(Platform::Ios, vec![pod("A"), pod("B")]);
        let table = generate(&target);

        assert_eq!(
            table.get(keys::OTHER_LDFLAGS),
            Some("$(inherited) -ObjC -l \"A\" -l \"B\"")
        );
    }

    #[test]
    fn test_static_target_has_header_paths_and_no_framework_keys() {
        let target = static_target(Platform::Ios, vec![pod("A")]);
        let sandbox = MockSandbox::new(vec!["${PODS_ROOT}/Headers/Public"]);
        let table = Aggregator::new(&sandbox, &NoTargetRules).generate(&target);

        assert_eq!(
            table.get(keys::HEADER_SEARCH_PATHS),
            Some("\"${PODS_ROOT}/Headers/Public\"")
        );
        assert_eq!(
            table.get(keys::OTHER_CFLAGS),
            Some("$(inherited) -isystem \"${PODS_ROOT}/Headers/Public\"")
        );
        assert!(!table.contains_key(keys::PODS_FRAMEWORK_BUILD_PATH));
        assert!(!table.contains_key(keys::LD_RUNPATH_SEARCH_PATHS));
    }

    #[test]
    fn test_framework_target_has_build_path() {
        let mut scoped = framework_pod("Scoped");
        scoped.scoped = true;
        let target = framework_target(Platform::Ios, vec![scoped, framework_pod("Flat")]);
        let table = generate(&target);

        let build_dir = target.configuration_build_dir.as_str();
        assert_eq!(table.get(keys::PODS_FRAMEWORK_BUILD_PATH), Some(build_dir));

        let cflags = table.get(keys::OTHER_CFLAGS).unwrap();
        assert!(cflags.contains(&format!("-iquote \"{}/Scoped.framework/Headers\"", build_dir)));
        assert!(cflags.contains("-iquote \"Flat.framework/Headers\""));
        assert!(table.contains_key(keys::FRAMEWORK_SEARCH_PATHS));
        assert!(!table.contains_key(keys::HEADER_SEARCH_PATHS));
    }

    #[test]
    fn test_header_map_is_removed() {
        let target = static_target(Platform::Ios, vec![pod("A")]);
        let rules = StaticRules::new(SettingsTable::new().with(keys::USE_HEADERMAP, "YES"));
        let table = Aggregator::new(&HeadersStore::new(), &rules).generate(&target);

        assert!(!table.contains_key(keys::USE_HEADERMAP));
    }

    #[test]
    fn test_user_target_xcconfig_header_map_is_removed() {
        let mut a = pod("A");
        a.user_target_xcconfig = SettingsTable::new().with(keys::USE_HEADERMAP, "YES");
        let table = generate(&static_target(Platform::Ios, vec![a]));

        assert!(!table.contains_key(keys::USE_HEADERMAP));
    }

    #[test]
    fn test_target_rules_pass_through() {
        let target = static_target(Platform::Ios, vec![pod("A")]);
        let rules = StaticRules::new(
            SettingsTable::new()
                .with("CUSTOM_SETTING", "value")
                .with(keys::OTHER_LDFLAGS, "-lc++"),
        );
        let table = Aggregator::new(&HeadersStore::new(), &rules).generate(&target);

        assert_eq!(table.get("CUSTOM_SETTING"), Some("value"));
        assert_eq!(
            table.get(keys::OTHER_LDFLAGS),
            Some("$(inherited) -ObjC -lc++ -l \"A\"")
        );
        assert_eq!(rules.calls(), 1);
    }

    #[test]
    fn test_user_target_xcconfig_accumulates() {
        let mut a = pod("A");
        a.user_target_xcconfig = SettingsTable::new()
            .with(keys::OTHER_LDFLAGS, "$(inherited) -lz")
            .with(keys::GCC_PREPROCESSOR_DEFINITIONS, "A_ENABLED=1");
        let table = generate(&static_target(Platform::Ios, vec![a]));

        assert_eq!(
            table.get(keys::OTHER_LDFLAGS),
            Some("$(inherited) -ObjC -lz -l \"A\"")
        );
        assert_eq!(
            table.get(keys::GCC_PREPROCESSOR_DEFINITIONS),
            Some("$(inherited) COCOAPODS=1 A_ENABLED=1")
        );
    }

    #[test]
    fn test_vendored_static_library_in_framework_mode() {
        let mut prebuilt = pod("Vendored");
        prebuilt.should_build = false;
        prebuilt.file_accessors.push(FileAccessor {
            vendored_libraries: vec![PathBuf::from("Vendored/libVendored.a")],
            ..Default::default()
        });
        let target = framework_target(Platform::Ios, vec![prebuilt, framework_pod("A")]);
        let table = generate(&target);

        assert_eq!(
            table.get(keys::OTHER_LDFLAGS),
            Some("$(inherited) -ObjC -l \"Vendored\" -framework \"A\"")
        );
        assert_eq!(
            table.get(keys::LIBRARY_SEARCH_PATHS),
            Some("$(inherited) \"$(PODS_ROOT)/Vendored\"")
        );
    }

    #[test]
    fn test_ld_flags_superset_of_contributions() {
        let mut prebuilt = pod("Prebuilt");
        prebuilt.should_build = false;
        let target = static_target(
            Platform::Ios,
            vec![pod("A"), framework_pod("B"), prebuilt],
        );
        let table = generate(&target);
        let tokens = table.tokens(keys::OTHER_LDFLAGS);

        for expected in ["$(inherited)", "-ObjC", "-l", "\"A\"", "-framework", "\"B\""] {
            assert!(tokens.contains(&expected), "missing {}", expected);
        }
        assert!(!tokens.contains(&"\"Prebuilt\""));
    }

    #[test]
    fn test_unit_test_bundle_on_desktop() {
        let mut target = framework_target(Platform::Osx, vec![framework_pod("A")]);
        target.native_target_kind = NativeTargetKind::UnitTestBundle;
        let table = generate(&target);

        assert!(table
            .get(keys::LD_RUNPATH_SEARCH_PATHS)
            .unwrap()
            .ends_with("'@loader_path/../Frameworks'"));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let mut swift = framework_pod("Swifty");
        swift.uses_swift = true;
        let target = framework_target(Platform::Ios, vec![swift, framework_pod("B")]);
        let sandbox = HeadersStore::new();
        let aggregator = Aggregator::new(&sandbox, &DefaultTargetRules);

        let first = aggregator.generate(&target).to_string();
        let second = aggregator.generate(&target).to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_checked_rejects_invalid_facts() {
        let mut broken = PodTarget::new("A", Packaging::StaticLibrary);
        broken.product_basename = String::new();
        let target = static_target(Platform::Ios, vec![broken]);
        let sandbox = MockSandbox::new(Vec::<String>::new());

        let result = Aggregator::new(&sandbox, &NoTargetRules).generate_checked(&target);
        assert!(result.is_err());
        assert!(sandbox.requested_platforms().is_empty());
    }

    #[test]
    fn test_empty_framework_target() {
        let table = generate(&framework_target(Platform::Ios, vec![]));
        assert_eq!(table.get(keys::OTHER_LDFLAGS), Some("$(inherited)"));
        assert_eq!(table.get(keys::OTHER_CFLAGS), Some("$(inherited)"));
    }
}
