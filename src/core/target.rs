//! Facts about the consuming (aggregate) target and its pod targets.
//!
//! These types are populated by the dependency resolver and are read-only for
//! the settings generator. `TargetFacts::validate` is the single boundary check
//! run before generation.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::file_accessor::FileAccessor;
use crate::core::platform::Platform;
use crate::core::settings::SettingsTable;

/// Errors found while validating target facts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FactsError {
    #[error("aggregate target has an empty name")]
    EmptyTargetName,

    #[error("in target `{target}`: empty {field}")]
    EmptyTargetField { target: String, field: &'static str },

    #[error("in target `{target}`: `configuration_build_dir` is required when frameworks are used")]
    MissingConfigurationBuildDir { target: String },

    #[error("in target `{target}`: pod #{index} has an empty name")]
    EmptyPodName { target: String, index: usize },

    #[error("in target `{target}`: pod `{pod}` has an empty {field}")]
    EmptyPodField {
        target: String,
        pod: String,
        field: &'static str,
    },

    #[error("in target `{target}`: pod `{pod}` has product basename `{basename}` which cannot be quoted in linker flags\n\
             help: product basenames must not contain `\"` or line breaks")]
    UnquotableBasename {
        target: String,
        pod: String,
        basename: String,
    },

    #[error("in target `{target}`: pod `{pod}` sets {key:?}, which cannot be written to an xcconfig\n\
             help: setting names must not be empty or contain `=` or line breaks, values must not contain line breaks")]
    UnwritableSetting {
        target: String,
        pod: String,
        key: String,
    },

    #[error("in target `{target}`: pod `{pod}` links {name:?}, which cannot be quoted in linker flags")]
    UnquotableLinkName {
        target: String,
        pod: String,
        name: String,
    },

    #[error("in target `{target}`: pods `{first}` and `{second}` both build product `{basename}`")]
    DuplicateProduct {
        target: String,
        first: String,
        second: String,
        basename: String,
    },
}

/// Whether pod targets are integrated as static libraries or frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packaging {
    StaticLibrary,
    Framework,
}

impl Packaging {
    pub fn from_requires_frameworks(requires_frameworks: bool) -> Self {
        if requires_frameworks {
            Packaging::Framework
        } else {
            Packaging::StaticLibrary
        }
    }
}

/// Product type of the consuming target's native target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeTargetKind {
    #[default]
    Application,
    Framework,
    StaticLibrary,
    DynamicLibrary,
    Bundle,
    UnitTestBundle,
    UiTestBundle,
    AppExtension,
    WatchApp,
    WatchExtension,
}

impl NativeTargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeTargetKind::Application => "application",
            NativeTargetKind::Framework => "framework",
            NativeTargetKind::StaticLibrary => "static_library",
            NativeTargetKind::DynamicLibrary => "dynamic_library",
            NativeTargetKind::Bundle => "bundle",
            NativeTargetKind::UnitTestBundle => "unit_test_bundle",
            NativeTargetKind::UiTestBundle => "ui_test_bundle",
            NativeTargetKind::AppExtension => "app_extension",
            NativeTargetKind::WatchApp => "watch_app",
            NativeTargetKind::WatchExtension => "watch_extension",
        }
    }

    /// Test bundles of either flavour.
    pub fn is_test_bundle(&self) -> bool {
        matches!(
            self,
            NativeTargetKind::UnitTestBundle | NativeTargetKind::UiTestBundle
        )
    }
}

impl fmt::Display for NativeTargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NativeTargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "application" => NativeTargetKind::Application,
            "framework" => NativeTargetKind::Framework,
            "static_library" => NativeTargetKind::StaticLibrary,
            "dynamic_library" => NativeTargetKind::DynamicLibrary,
            "bundle" => NativeTargetKind::Bundle,
            "unit_test_bundle" => NativeTargetKind::UnitTestBundle,
            "ui_test_bundle" => NativeTargetKind::UiTestBundle,
            "app_extension" => NativeTargetKind::AppExtension,
            "watch_app" => NativeTargetKind::WatchApp,
            "watch_extension" => NativeTargetKind::WatchExtension,
            _ => return Err(format!("unknown native target kind '{}'", s)),
        };
        Ok(kind)
    }
}

/// A dependency's build target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodTarget {
    /// Pod name (e.g. `Alamofire`)
    pub name: String,

    /// Built product file name (e.g. `Alamofire.framework`, `libAlamofire.a`)
    pub product_name: String,

    /// Product name without prefix/extension, used in linker flags
    pub product_basename: String,

    /// False when the binary is supplied pre-built
    pub should_build: bool,

    pub requires_frameworks: bool,

    /// Outputs namespaced under a build-path subdirectory
    pub scoped: bool,

    pub uses_swift: bool,

    /// Settings the pod asks to apply to the consuming target
    pub user_target_xcconfig: SettingsTable,

    pub file_accessors: Vec<FileAccessor>,
}

impl PodTarget {
    /// A buildable, unscoped pod whose products follow the packaging mode.
    pub fn new(name: impl Into<String>, packaging: Packaging) -> Self {
        let name = name.into();
        let product_name = match packaging {
            Packaging::Framework => format!("{}.framework", name),
            Packaging::StaticLibrary => format!("lib{}.a", name),
        };
        PodTarget {
            product_basename: name.clone(),
            product_name,
            name,
            should_build: true,
            requires_frameworks: packaging == Packaging::Framework,
            scoped: false,
            uses_swift: false,
            user_target_xcconfig: SettingsTable::new(),
            file_accessors: Vec::new(),
        }
    }

    pub fn packaging(&self) -> Packaging {
        Packaging::from_requires_frameworks(self.requires_frameworks)
    }

    pub fn has_vendored_static_artifacts(&self) -> bool {
        self.file_accessors
            .iter()
            .any(FileAccessor::has_vendored_static_artifacts)
    }
}

/// The consuming target for one build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFacts {
    /// Aggregate target name (e.g. `Pods-App`)
    pub name: String,

    /// Build configuration (e.g. `Debug`)
    pub configuration: String,

    pub platform: Platform,

    pub requires_frameworks: bool,

    /// Value of `PODS_ROOT` as seen from the user project
    pub pods_root: String,

    /// Filesystem location of the sandbox
    pub sandbox_root: PathBuf,

    /// Output directory of the active configuration
    pub configuration_build_dir: String,

    pub native_target_kind: NativeTargetKind,

    pub pod_targets: Vec<PodTarget>,
}

impl TargetFacts {
    pub fn packaging(&self) -> Packaging {
        Packaging::from_requires_frameworks(self.requires_frameworks)
    }

    /// True when any statically linked code ends up in the consuming binary.
    pub fn includes_static_libraries(&self) -> bool {
        !self.requires_frameworks
            || self
                .pod_targets
                .iter()
                .any(PodTarget::has_vendored_static_artifacts)
    }

    pub fn uses_swift(&self) -> bool {
        self.pod_targets.iter().any(|p| p.uses_swift)
    }

    /// Check the facts before generation.
    pub fn validate(&self) -> Result<(), FactsError> {
        if self.name.trim().is_empty() {
            return Err(FactsError::EmptyTargetName);
        }

        let empty_field = |field: &'static str| FactsError::EmptyTargetField {
            target: self.name.clone(),
            field,
        };
        if self.configuration.trim().is_empty() {
            return Err(empty_field("configuration"));
        }
        if self.pods_root.trim().is_empty() {
            return Err(empty_field("pods_root"));
        }
        if self.requires_frameworks && self.configuration_build_dir.trim().is_empty() {
            return Err(FactsError::MissingConfigurationBuildDir {
                target: self.name.clone(),
            });
        }

        let mut products: HashMap<&str, &str> = HashMap::new();

        for (index, pod) in self.pod_targets.iter().enumerate() {
            if pod.name.trim().is_empty() {
                return Err(FactsError::EmptyPodName {
                    target: self.name.clone(),
                    index,
                });
            }

            let empty_pod_field = |field: &'static str| FactsError::EmptyPodField {
                target: self.name.clone(),
                pod: pod.name.clone(),
                field,
            };
            if pod.product_name.trim().is_empty() {
                return Err(empty_pod_field("product name"));
            }
            if pod.product_basename.trim().is_empty() {
                return Err(empty_pod_field("product basename"));
            }
            if pod
                .product_basename
                .chars()
                .any(|c| matches!(c, '"' | '\n' | '\r'))
            {
                return Err(FactsError::UnquotableBasename {
                    target: self.name.clone(),
                    pod: pod.name.clone(),
                    basename: pod.product_basename.clone(),
                });
            }

            if let Some((key, _)) = pod
                .user_target_xcconfig
                .iter()
                .find(|(key, value)| !is_writable_key(key) || has_line_break(value))
            {
                return Err(FactsError::UnwritableSetting {
                    target: self.name.clone(),
                    pod: pod.name.clone(),
                    key: key.to_string(),
                });
            }

            if let Some(name) = pod.file_accessors.iter().find_map(FileAccessor::unquotable_name) {
                return Err(FactsError::UnquotableLinkName {
                    target: self.name.clone(),
                    pod: pod.name.clone(),
                    name,
                });
            }

            if !pod.should_build {
                continue;
            }
            if let Some(first) = products.insert(&pod.product_basename, &pod.name) {
                return Err(FactsError::DuplicateProduct {
                    target: self.name.clone(),
                    first: first.to_string(),
                    second: pod.name.clone(),
                    basename: pod.product_basename.clone(),
                });
            }
        }

        Ok(())
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// Writable as the left side of a `KEY = value` line.
fn is_writable_key(key: &str) -> bool {
    !key.trim().is_empty() && !key.contains('=') && !has_line_break(key)
}
