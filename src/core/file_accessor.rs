//! Vendored artifact descriptors of a pod target.
//!
//! A `FileAccessor` lists the pre-built frameworks and libraries a pod ships
//! with, plus the system frameworks and libraries it links against. It knows
//! how to express those as build settings for a consuming target.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::settings::{join_flags, keys, quote, SettingsTable, INHERITED};

/// Pre-built artifacts and link requirements of one pod specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAccessor {
    /// Paths to `.framework` bundles shipped pre-built.
    pub vendored_frameworks: Vec<PathBuf>,

    /// Paths to `lib*.a` / `lib*.dylib` files shipped pre-built.
    pub vendored_libraries: Vec<PathBuf>,

    /// System frameworks to link (e.g. `UIKit`)
    pub frameworks: Vec<String>,

    /// System frameworks to link weakly
    pub weak_frameworks: Vec<String>,

    /// System libraries to link (e.g. `z`, `sqlite3`)
    pub libraries: Vec<String>,
}

impl FileAccessor {
    /// Vendored artifacts that are linked statically.
    pub fn vendored_static_artifacts(&self) -> impl Iterator<Item = &PathBuf> {
        self.vendored_libraries
            .iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "a"))
    }

    pub fn has_vendored_static_artifacts(&self) -> bool {
        self.vendored_static_artifacts().next().is_some()
    }

    /// The first framework, library or vendored path that cannot be written
    /// inside double quotes.
    pub fn unquotable_name(&self) -> Option<String> {
        let vendored = self
            .vendored_frameworks
            .iter()
            .chain(&self.vendored_libraries)
            .map(|p| p.to_string_lossy().into_owned());
        let named = self
            .frameworks
            .iter()
            .chain(&self.weak_frameworks)
            .chain(&self.libraries)
            .cloned();

        vendored
            .chain(named)
            .find(|name| name.contains(['"', '\n', '\r']))
    }

    /// Build settings needed to link the vendored artifacts.
    ///
    /// Vendored paths are expressed relative to `$(PODS_ROOT)`; `sandbox_root`
    /// is the filesystem location that variable points at.
    pub fn build_settings(&self, sandbox_root: &Path) -> SettingsTable {
        let mut ld_flags = Vec::new();
        let mut framework_dirs = IndexSet::new();
        let mut library_dirs = IndexSet::new();

        for framework in &self.vendored_frameworks {
            framework_dirs.insert(pods_root_relative_dir(framework, sandbox_root));
            ld_flags.push(format!("-framework \"{}\"", file_stem(framework)));
        }

        for library in &self.vendored_libraries {
            library_dirs.insert(pods_root_relative_dir(library, sandbox_root));
            ld_flags.push(format!("-l \"{}\"", library_link_name(library)));
        }

        for name in &self.libraries {
            ld_flags.push(format!("-l \"{}\"", name));
        }
        for name in &self.frameworks {
            ld_flags.push(format!("-framework \"{}\"", name));
        }
        for name in &self.weak_frameworks {
            ld_flags.push(format!("-weak_framework \"{}\"", name));
        }

        let mut settings = SettingsTable::new();
        if !framework_dirs.is_empty() {
            let dirs: Vec<_> = framework_dirs.into_iter().collect();
            settings = settings.with(
                keys::FRAMEWORK_SEARCH_PATHS,
                join_flags(&[INHERITED.to_string(), quote(&dirs, None)]),
            );
        }
        if !library_dirs.is_empty() {
            let dirs: Vec<_> = library_dirs.into_iter().collect();
            settings = settings.with(
                keys::LIBRARY_SEARCH_PATHS,
                join_flags(&[INHERITED.to_string(), quote(&dirs, None)]),
            );
        }
        if !ld_flags.is_empty() {
            settings = settings.with(keys::OTHER_LDFLAGS, ld_flags.join(" "));
        }
        settings
    }
}

/// `$(PODS_ROOT)/<parent dir relative to the sandbox>` for a vendored path.
fn pods_root_relative_dir(path: &Path, sandbox_root: &Path) -> String {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let relative = if dir.is_absolute() {
        pathdiff::diff_paths(dir, sandbox_root).unwrap_or_else(|| dir.to_path_buf())
    } else {
        dir.to_path_buf()
    };

    let relative = relative.to_string_lossy().replace('\\', "/");
    let relative = relative.trim_matches('/');
    if relative.is_empty() || relative == "." {
        "$(PODS_ROOT)".to_string()
    } else {
        format!("$(PODS_ROOT)/{}", relative)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `libfoo.a` -> `foo`
fn library_link_name(path: &Path) -> String {
    let stem = file_stem(path);
    match stem.strip_prefix("lib") {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => stem,
    }
}
