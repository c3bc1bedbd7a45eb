use crate::output;

use std::path::PathBuf;

use clap::Args;
use color_eyre::Result;

use engine_service::{Accelerator, ServingProperties};

/// Write a serving.properties for a model
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Model directory (created if missing)
    pub model_dir: PathBuf,

    /// Accelerator preset
    #[arg(long, value_name = "PRESET")]
    pub accel: Accelerator,

    /// Set a property (can be repeated, format: key=value)
    #[arg(long = "option", short = 'o', value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Keep existing serving.properties entries
    #[arg(long)]
    pub merge: bool,
}

pub fn execute(args: PrepareArgs) -> Result<()> {
    let mut props = if args.merge {
        ServingProperties::from_dir_or_default(&args.model_dir)?
    } else {
        ServingProperties::new()
    };

    for option in &args.options {
        let Some((key, value)) = option.split_once('=') else {
            color_eyre::eyre::bail!("Invalid option format '{}'. Expected key=value", option);
        };
        props.set(key.trim(), value.trim());
    }
    args.accel.apply_to(&mut props);

    // Surface bad values before they reach a worker
    props.tensor_parallel_degree()?;
    props.enable_streaming()?;

    let path = props.write_to_dir(&args.model_dir)?;
    output::success(&format!(
        "Wrote {} ({} entries) for {}",
        path.display(),
        props.len(),
        args.accel
    ));

    Ok(())
}
