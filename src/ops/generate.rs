//! Generate aggregate xcconfig files for every target of a facts manifest.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;

use crate::builder::{Aggregator, DefaultTargetRules};
use crate::core::xcconfig::render;
use crate::core::{FactsManifest, SettingsTable, TargetFacts};
use crate::util::fs::write_if_changed;

/// Options for `generate`.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Directory receiving `<target>/<target>.<configuration>.xcconfig`
    pub out_dir: PathBuf,

    /// Only generate this aggregate target
    pub target: Option<String>,

    /// Generate without writing files
    pub dry_run: bool,

    /// Number of parallel jobs (None = rayon default)
    pub jobs: Option<usize>,

    /// Lowercase the configuration in file names
    pub lowercase_configuration: bool,
}

impl GenerateOptions {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        GenerateOptions {
            out_dir: out_dir.into(),
            target: None,
            dry_run: false,
            jobs: None,
            lowercase_configuration: true,
        }
    }
}

/// One generated xcconfig.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub target: String,
    pub configuration: String,
    pub path: PathBuf,
    pub settings: SettingsTable,
    /// False for dry runs and for files already up to date
    pub written: bool,
}

/// `<out_dir>/<target>/<target>.<configuration>.xcconfig`
pub fn output_path(
    out_dir: &Path,
    target: &str,
    configuration: &str,
    lowercase_configuration: bool,
) -> PathBuf {
    let configuration = if lowercase_configuration {
        configuration.to_lowercase()
    } else {
        configuration.to_string()
    };
    out_dir
        .join(target)
        .join(format!("{}.{}.xcconfig", target, configuration))
}

/// Expand, validate and select the targets to generate.
pub fn selected_targets(manifest: &FactsManifest, target: Option<&str>) -> Result<Vec<TargetFacts>> {
    if let Some(name) = target {
        if manifest.target(name).is_none() {
            let available: Vec<_> = manifest.targets.iter().map(|t| t.name.as_str()).collect();
            bail!(
                "target `{}` not found in facts manifest\navailable: {:?}",
                name,
                available
            );
        }
    }

    let targets: Vec<TargetFacts> = manifest
        .aggregate_targets()
        .into_iter()
        .filter(|t| target.map_or(true, |name| t.name == name))
        .collect();

    for facts in &targets {
        facts.validate().with_context(|| {
            format!(
                "invalid facts for `{}` ({})",
                facts.name, facts.configuration
            )
        })?;
    }

    Ok(targets)
}

/// Generate the settings table of one target and configuration.
pub fn generate_table(
    manifest: &FactsManifest,
    target: &str,
    configuration: Option<&str>,
) -> Result<SettingsTable> {
    let targets = selected_targets(manifest, Some(target))?;
    let facts = match configuration {
        Some(config) => targets
            .iter()
            .find(|t| t.configuration.eq_ignore_ascii_case(config))
            .with_context(|| {
                format!("target `{}` has no configuration `{}`", target, config)
            })?,
        None => targets
            .first()
            .with_context(|| format!("target `{}` has no configurations", target))?,
    };

    let sandbox = manifest.headers_store();
    Ok(Aggregator::new(&sandbox, &DefaultTargetRules).generate(facts))
}

/// Generate every selected target in parallel and write the results.
///
/// All targets are validated before anything is written. Output order
/// follows the manifest.
pub fn generate(manifest: &FactsManifest, opts: &GenerateOptions) -> Result<Vec<GeneratedFile>> {
    let targets = selected_targets(manifest, opts.target.as_deref())?;
    let sandbox = manifest.headers_store();
    let aggregator = Aggregator::new(&sandbox, &DefaultTargetRules);

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = opts.jobs {
        pool = pool.num_threads(jobs);
    }
    let pool = pool.build().context("failed to create thread pool")?;

    tracing::debug!("Generating {} xcconfig files", targets.len());
    let tables: Vec<SettingsTable> =
        pool.install(|| targets.par_iter().map(|t| aggregator.generate(t)).collect());

    let mut files = Vec::with_capacity(targets.len());
    for (facts, settings) in targets.into_iter().zip(tables) {
        let path = output_path(
            &opts.out_dir,
            &facts.name,
            &facts.configuration,
            opts.lowercase_configuration,
        );

        let written = if opts.dry_run {
            false
        } else {
            write_if_changed(&path, &render(&settings))?
        };

        if written {
            tracing::info!("Wrote {}", path.display());
        } else {
            tracing::debug!("Unchanged {}", path.display());
        }

        files.push(GeneratedFile {
            target: facts.name,
            configuration: facts.configuration,
            path,
            settings,
            written,
        });
    }

    Ok(files)
}
