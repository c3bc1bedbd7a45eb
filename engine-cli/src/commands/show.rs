use crate::output;

use std::path::Path;

use clap::Args;
use color_eyre::Result;

use engine_service::ServiceError;

use super::{launch_label, load_registry};

/// Show one engine provider
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Engine name (case-sensitive, e.g. DeepSpeed)
    pub name: String,
}

pub fn execute(config: Option<&Path>, args: ShowArgs) -> Result<()> {
    let (_, registry) = load_registry(config)?;

    let provider = match registry.get(&args.name) {
        Ok(p) => p,
        Err(ServiceError::EngineNotFound { name, suggestion }) => {
            output::error(&format!("Engine not found: {}", name));
            if let Some(suggestion) = suggestion {
                output::info(&format!("  Did you mean '{}'?", suggestion));
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    output::header(provider.engine_name());
    println!("  rank:    {}", provider.engine_rank());
    println!(
        "  launch:  {}",
        launch_label(provider.requires_multi_process_launch())
    );
    if let Some(alias_of) = provider.alias_of() {
        println!("  alias:   {}", alias_of);
    }

    let aliases = registry.aliases_of(provider.engine_name());
    if !aliases.is_empty() {
        let names: Vec<&str> = aliases.iter().map(|a| a.engine_name()).collect();
        println!("  aliases: {}", names.join(", "));
    }

    Ok(())
}
