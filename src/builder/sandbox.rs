//! Public header layout of the sandbox.
//!
//! In static-library mode every pod's public headers are flattened into
//! `${PODS_ROOT}/Headers/Public/<Pod>`. The generator only needs the list of
//! search paths for a platform; the `Sandbox` trait is that seam.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::core::Platform;

/// Source of flattened public header search paths.
pub trait Sandbox: Send + Sync {
    /// Ordered search paths for headers of pods available on `platform`.
    fn public_header_search_paths(&self, platform: Platform) -> Vec<String>;
}

/// Registry of pods that install public headers into the sandbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadersStore {
    /// Root of the public headers directory, as an xcconfig value.
    root: String,

    /// Pod name -> platforms the pod's headers are installed for.
    /// An empty platform list means every platform.
    pods: IndexMap<String, Vec<Platform>>,
}

impl HeadersStore {
    pub const DEFAULT_ROOT: &'static str = "${PODS_ROOT}/Headers/Public";

    pub fn new() -> Self {
        HeadersStore::with_root(Self::DEFAULT_ROOT)
    }

    pub fn with_root(root: impl Into<String>) -> Self {
        HeadersStore {
            root: root.into(),
            pods: IndexMap::new(),
        }
    }

    /// Register the headers of a pod for the given platforms.
    ///
    /// Repeated registrations widen the platform list; once a pod is
    /// registered for every platform it stays that way.
    pub fn add_pod(&mut self, name: impl Into<String>, platforms: Vec<Platform>) {
        match self.pods.entry(name.into()) {
            Entry::Vacant(entry) => {
                entry.insert(platforms);
            }
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                if existing.is_empty() {
                    return;
                }
                if platforms.is_empty() {
                    existing.clear();
                    return;
                }
                for platform in platforms {
                    if !existing.contains(&platform) {
                        existing.push(platform);
                    }
                }
            }
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn pod_names(&self) -> impl Iterator<Item = &str> {
        self.pods.keys().map(String::as_str)
    }
}

impl Default for HeadersStore {
    fn default() -> Self {
        HeadersStore::new()
    }
}

impl Sandbox for HeadersStore {
    fn public_header_search_paths(&self, platform: Platform) -> Vec<String> {
        let mut paths = vec![self.root.clone()];
        paths.extend(
            self.pods
                .iter()
                .filter(|(_, platforms)| platforms.is_empty() || platforms.contains(&platform))
                .map(|(name, _)| format!("{}/{}", self.root.trim_end_matches('/'), name)),
        );
        paths
    }
}
