use crate::output;

use std::path::Path;

use clap::Args;
use color_eyre::Result;
use serde_json::json;

use super::{launch_label, load_registry};

/// List registered engines in preference order
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute(config: Option<&Path>, args: ListArgs) -> Result<()> {
    let (_, registry) = load_registry(config)?;
    let ranked = registry.ranked();

    if args.json {
        let entries: Vec<_> = ranked
            .iter()
            .map(|p| {
                json!({
                    "name": p.engine_name(),
                    "rank": p.engine_rank(),
                    "multi_process": p.requires_multi_process_launch(),
                    "alias_of": p.alias_of(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if ranked.is_empty() {
        output::dim("  No engines registered");
        return Ok(());
    }

    output::status(
        "Engines",
        &format!("{:?} rank preferred", registry.preference()),
    );
    for provider in &ranked {
        let alias = provider
            .alias_of()
            .map(|a| format!("  (alias of {})", a))
            .unwrap_or_default();
        println!(
            "  {:<20} {:>4}  {}{}",
            provider.engine_name(),
            provider.engine_rank(),
            launch_label(provider.requires_multi_process_launch()),
            alias
        );
    }
    println!();
    output::dim(&format!("  {} engine(s) total", ranked.len()));

    Ok(())
}
