//! Facts manifest parsing.
//!
//! The facts manifest is the TOML document through which a resolver hands
//! aggregate targets and their pod targets to the generator. Each
//! `[[target]]` expands into one `TargetFacts` per build configuration.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::sandbox::HeadersStore;
use crate::core::file_accessor::FileAccessor;
use crate::core::platform::Platform;
use crate::core::settings::SettingsTable;
use crate::core::target::{NativeTargetKind, Packaging, PodTarget, TargetFacts};

/// Errors that can occur while loading a facts manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read facts manifest `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse facts manifest `{}`", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("target `{target}` is declared more than once")]
    DuplicateTarget { target: String },

    #[error("target `{target}` lists configurations `{first}` and `{second}`, which differ only in case")]
    DuplicateConfiguration {
        target: String,
        first: String,
        second: String,
    },
}

fn default_sandbox_root() -> PathBuf {
    PathBuf::from("Pods")
}

fn default_pods_root() -> String {
    "${SRCROOT}/Pods".to_string()
}

fn default_configurations() -> Vec<String> {
    vec!["Debug".to_string(), "Release".to_string()]
}

fn default_configuration_build_dir() -> String {
    "$CONFIGURATION_BUILD_DIR".to_string()
}

fn default_true() -> bool {
    true
}

/// Top-level facts manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactsManifest {
    /// Sandbox directory, relative to the manifest
    #[serde(default = "default_sandbox_root")]
    pub sandbox_root: PathBuf,

    /// Value of `PODS_ROOT`
    #[serde(default = "default_pods_root")]
    pub pods_root: String,

    /// Pods installing public headers -> platforms (empty = all)
    #[serde(default)]
    pub headers: IndexMap<String, Vec<Platform>>,

    #[serde(default, rename = "target")]
    pub targets: Vec<TargetEntry>,
}

/// An aggregate target declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetEntry {
    pub name: String,

    pub platform: Platform,

    #[serde(default)]
    pub requires_frameworks: bool,

    #[serde(default)]
    pub native_target_kind: NativeTargetKind,

    #[serde(default = "default_configurations")]
    pub configurations: Vec<String>,

    #[serde(default = "default_configuration_build_dir")]
    pub configuration_build_dir: String,

    #[serde(default, rename = "pod")]
    pub pods: Vec<PodEntry>,
}

/// A pod target declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodEntry {
    pub name: String,

    /// Defaults to `<name>.framework` or `lib<name>.a`
    #[serde(default)]
    pub product_name: Option<String>,

    /// Defaults to the pod name
    #[serde(default)]
    pub product_basename: Option<String>,

    #[serde(default = "default_true")]
    pub should_build: bool,

    /// Defaults to the aggregate target's packaging
    #[serde(default)]
    pub requires_frameworks: Option<bool>,

    #[serde(default)]
    pub scoped: bool,

    #[serde(default)]
    pub uses_swift: bool,

    /// Restrict the pod to these build configurations
    #[serde(default)]
    pub configurations: Option<Vec<String>>,

    #[serde(default)]
    pub user_target_xcconfig: SettingsTable,

    #[serde(default, rename = "file_accessor")]
    pub file_accessors: Vec<FileAccessor>,
}

impl PodEntry {
    /// Whether the pod is integrated in `configuration`.
    pub fn included_in(&self, configuration: &str) -> bool {
        match &self.configurations {
            None => true,
            Some(list) => list.iter().any(|c| c.eq_ignore_ascii_case(configuration)),
        }
    }

    fn to_pod_target(&self, target_packaging: Packaging) -> PodTarget {
        let packaging = match self.requires_frameworks {
            Some(flag) => Packaging::from_requires_frameworks(flag),
            None => target_packaging,
        };

        let mut pod = PodTarget::new(self.name.clone(), packaging);
        if let Some(product_name) = &self.product_name {
            pod.product_name = product_name.clone();
        }
        if let Some(basename) = &self.product_basename {
            pod.product_basename = basename.clone();
        }
        pod.should_build = self.should_build;
        pod.scoped = self.scoped;
        pod.uses_swift = self.uses_swift;
        pod.user_target_xcconfig = self.user_target_xcconfig.clone();
        pod.file_accessors = self.file_accessors.clone();
        pod
    }
}

impl FactsManifest {
    /// Load a manifest from disk; relative sandbox paths resolve against its directory.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&contents, base).map_err(|err| match err {
            ManifestError::Parse { source, .. } => ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse manifest text; `base` is the directory the manifest lives in.
    pub fn parse(contents: &str, base: &Path) -> Result<Self, ManifestError> {
        let mut manifest: FactsManifest =
            toml::from_str(contents).map_err(|source| ManifestError::Parse {
                path: PathBuf::from("<memory>"),
                source,
            })?;

        if manifest.sandbox_root.is_relative() {
            manifest.sandbox_root = base.join(&manifest.sandbox_root);
        }

        let mut seen = HashSet::new();
        for target in &manifest.targets {
            if !seen.insert(target.name.as_str()) {
                return Err(ManifestError::DuplicateTarget {
                    target: target.name.clone(),
                });
            }

            // Configurations name output files, which may be lowercased
            let mut configurations: HashMap<String, &str> = HashMap::new();
            for configuration in &target.configurations {
                if let Some(first) =
                    configurations.insert(configuration.to_lowercase(), configuration.as_str())
                {
                    return Err(ManifestError::DuplicateConfiguration {
                        target: target.name.clone(),
                        first: first.to_string(),
                        second: configuration.clone(),
                    });
                }
            }
        }

        Ok(manifest)
    }

    /// Header registrations as a sandbox collaborator.
    pub fn headers_store(&self) -> HeadersStore {
        let mut store = HeadersStore::new();
        for (pod, platforms) in &self.headers {
            store.add_pod(pod.clone(), platforms.clone());
        }
        store
    }

    pub fn target(&self, name: &str) -> Option<&TargetEntry> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// All targets expanded per configuration, in manifest order.
    pub fn aggregate_targets(&self) -> Vec<TargetFacts> {
        self.targets
            .iter()
            .flat_map(|entry| self.expand(entry))
            .collect()
    }

    /// One `TargetFacts` per configuration of `entry`.
    pub fn expand(&self, entry: &TargetEntry) -> Vec<TargetFacts> {
        let packaging = Packaging::from_requires_frameworks(entry.requires_frameworks);

        entry
            .configurations
            .iter()
            .map(|configuration| TargetFacts {
                name: entry.name.clone(),
                configuration: configuration.clone(),
                platform: entry.platform,
                requires_frameworks: entry.requires_frameworks,
                pods_root: self.pods_root.clone(),
                sandbox_root: self.sandbox_root.clone(),
                configuration_build_dir: entry.configuration_build_dir.clone(),
                native_target_kind: entry.native_target_kind,
                pod_targets: entry
                    .pods
                    .iter()
                    .filter(|pod| pod.included_in(configuration))
                    .map(|pod| pod.to_pod_target(packaging))
                    .collect(),
            })
            .collect()
    }
}
