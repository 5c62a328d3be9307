//! `pod-xcconfig check` command

use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use crate::commands::{generate_options, load_manifest};
use pod_xcconfig::ops::check;
use pod_xcconfig::util::GlobalContext;

pub fn execute(args: CheckArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let (manifest, facts_path) = load_manifest(&ctx, args.facts.as_deref())?;
    let opts = generate_options(&ctx, &facts_path, args.out_dir);

    let report = check(&manifest, &opts)?;

    for entry in report.outdated() {
        println!("{}: {}", entry.path.display(), entry.status);
    }

    let outdated = report.outdated().count();
    if outdated > 0 {
        bail!(
            "{} of {} xcconfig files are out of date\n\
             help: Run `pod-xcconfig generate` to update them",
            outdated,
            report.entries.len()
        );
    }

    println!("{} xcconfig files are up to date", report.entries.len());
    Ok(())
}
