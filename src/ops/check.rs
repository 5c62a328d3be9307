//! Compare xcconfig files on disk with freshly generated settings.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::xcconfig::{self, render};
use crate::core::{FactsManifest, SettingsTable};
use crate::ops::generate::{generate, GenerateOptions};
use crate::util::fs::read_to_string;

/// State of one expected xcconfig file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    UpToDate,
    /// Keys whose values differ, are missing, or are extra on disk.
    /// Empty when only ordering or formatting differs.
    Stale { keys: Vec<String> },
    Missing,
}

#[derive(Debug, Clone)]
pub struct CheckEntry {
    pub target: String,
    pub configuration: String,
    pub path: PathBuf,
    pub status: FileStatus,
}

#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub entries: Vec<CheckEntry>,
}

impl CheckReport {
    pub fn is_up_to_date(&self) -> bool {
        self.entries
            .iter()
            .all(|e| e.status == FileStatus::UpToDate)
    }

    pub fn outdated(&self) -> impl Iterator<Item = &CheckEntry> {
        self.entries
            .iter()
            .filter(|e| e.status != FileStatus::UpToDate)
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::UpToDate => write!(f, "up to date"),
            FileStatus::Missing => write!(f, "missing"),
            FileStatus::Stale { keys } if keys.is_empty() => write!(f, "stale (formatting)"),
            FileStatus::Stale { keys } => write!(f, "stale ({})", keys.join(", ")),
        }
    }
}

/// Check every expected file without writing anything.
pub fn check(manifest: &FactsManifest, opts: &GenerateOptions) -> Result<CheckReport> {
    let mut opts = opts.clone();
    opts.dry_run = true;

    let mut report = CheckReport::default();
    for file in generate(manifest, &opts)? {
        let status = if file.path.is_file() {
            let on_disk = read_to_string(&file.path)?;
            compare(&file.settings, &on_disk)
                .with_context(|| format!("failed to parse `{}`", file.path.display()))?
        } else {
            FileStatus::Missing
        };

        tracing::debug!("{}: {}", file.path.display(), status);
        report.entries.push(CheckEntry {
            target: file.target,
            configuration: file.configuration,
            path: file.path,
            status,
        });
    }

    Ok(report)
}

/// Compare a generated table with xcconfig text.
pub fn compare(expected: &SettingsTable, on_disk: &str) -> Result<FileStatus> {
    if render(expected) == on_disk {
        return Ok(FileStatus::UpToDate);
    }

    let actual = xcconfig::parse(on_disk)?.settings;
    let mut keys: Vec<String> = expected
        .iter()
        .filter(|(key, value)| actual.get(key) != Some(*value))
        .map(|(key, _)| key.to_string())
        .collect();
    keys.extend(
        actual
            .keys()
            .filter(|key| !expected.contains_key(key))
            .map(str::to_string),
    );

    Ok(FileStatus::Stale { keys })
}
