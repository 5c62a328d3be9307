//! `pod-xcconfig show` command

use anyhow::{Context, Result};

use crate::cli::ShowArgs;
use crate::commands::load_manifest;
use pod_xcconfig::core::xcconfig::render;
use pod_xcconfig::ops::generate_table;
use pod_xcconfig::util::GlobalContext;

pub fn execute(args: ShowArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let (manifest, _) = load_manifest(&ctx, args.facts.as_deref())?;

    let table = generate_table(&manifest, &args.target, args.configuration.as_deref())?;

    if args.json {
        let json = serde_json::to_string_pretty(&table).context("failed to serialize settings")?;
        println!("{}", json);
    } else {
        print!("{}", render(&table));
    }

    Ok(())
}
