//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::Result;

use pod_xcconfig::core::FactsManifest;
use pod_xcconfig::ops::GenerateOptions;
use pod_xcconfig::util::GlobalContext;

pub mod check;
pub mod completions;
pub mod generate;
pub mod show;

/// Locate and load the facts manifest.
pub fn load_manifest(ctx: &GlobalContext, facts: Option<&Path>) -> Result<(FactsManifest, PathBuf)> {
    let path = ctx.facts_path(facts)?;
    tracing::debug!("Loading facts from {}", path.display());
    let manifest = FactsManifest::load(&path)?;
    Ok((manifest, path))
}

/// Generation options: CLI > config > defaults.
pub fn generate_options(
    ctx: &GlobalContext,
    facts_path: &Path,
    out_dir: Option<PathBuf>,
) -> GenerateOptions {
    let config = ctx.config();
    let project_root = facts_path.parent().unwrap_or_else(|| ctx.cwd());

    let out_dir = match out_dir {
        Some(dir) => ctx.cwd().join(dir),
        None => config.output_dir(project_root),
    };

    let mut opts = GenerateOptions::new(out_dir);
    opts.jobs = config.generate.jobs;
    opts.lowercase_configuration = config.lowercase_configuration();
    opts
}
