//! `pod-xcconfig generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use crate::commands::{generate_options, load_manifest};
use pod_xcconfig::ops::generate;
use pod_xcconfig::util::GlobalContext;

pub fn execute(args: GenerateArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let (manifest, facts_path) = load_manifest(&ctx, args.facts.as_deref())?;

    let mut opts = generate_options(&ctx, &facts_path, args.out_dir);
    opts.target = args.target;
    opts.dry_run = args.dry_run;
    // Jobs: CLI > config > None (auto-detect)
    opts.jobs = args.jobs.or(opts.jobs);

    let files = generate(&manifest, &opts)?;

    for file in &files {
        let verb = if args.dry_run {
            "Would write"
        } else if file.written {
            "Generated"
        } else {
            "Fresh"
        };
        eprintln!("{:>12} {}", verb, file.path.display());
    }

    let written = files.iter().filter(|f| f.written).count();
    eprintln!(
        "    Finished {} xcconfig files ({} written)",
        files.len(),
        written
    );

    Ok(())
}
