//! Test fixtures for common test scenarios.
//!
//! Builders for target facts and sample facts manifests.

use std::path::PathBuf;

use crate::core::{NativeTargetKind, Packaging, Platform, PodTarget, TargetFacts};

/// Build directory used by framework fixtures.
pub const BUILD_DIR: &str = "$PODS_CONFIGURATION_BUILD_DIR";

/// A buildable static-library pod.
pub fn pod(name: &str) -> PodTarget {
    PodTarget::new(name, Packaging::StaticLibrary)
}

/// A buildable framework pod.
pub fn framework_pod(name: &str) -> PodTarget {
    PodTarget::new(name, Packaging::Framework)
}

fn target(platform: Platform, requires_frameworks: bool, pods: Vec<PodTarget>) -> TargetFacts {
    TargetFacts {
        name: "Pods-App".to_string(),
        configuration: "Debug".to_string(),
        platform,
        requires_frameworks,
        pods_root: "${SRCROOT}/Pods".to_string(),
        sandbox_root: PathBuf::from("/project/Pods"),
        configuration_build_dir: BUILD_DIR.to_string(),
        native_target_kind: NativeTargetKind::Application,
        pod_targets: pods,
    }
}

/// An application target integrating pods as static libraries.
pub fn static_target(platform: Platform, pods: Vec<PodTarget>) -> TargetFacts {
    target(platform, false, pods)
}

/// An application target integrating pods as frameworks.
pub fn framework_target(platform: Platform, pods: Vec<PodTarget>) -> TargetFacts {
    target(platform, true, pods)
}

/// A facts manifest with one framework target and one static target.
pub const SAMPLE_MANIFEST: &str = r#"
pods_root = "${SRCROOT}/Pods"

[headers]
Alamofire = []
Masonry = ["ios"]

[[target]]
name = "Pods-App"
platform = "osx"
requires_frameworks = true

[[target.pod]]
name = "Alamofire"

[[target.pod]]
name = "Reveal"
configurations = ["Debug"]

[[target]]
name = "Pods-Legacy"
platform = "ios"
configurations = ["Release"]

[[target.pod]]
name = "Masonry"

[[target.pod.file_accessor]]
vendored_libraries = ["Masonry/Vendor/libextra.a"]
frameworks = ["UIKit"]
"#;
