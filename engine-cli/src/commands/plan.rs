use crate::output;

use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::Result;

use engine_service::{Accelerator, LaunchMode, LaunchPlanner, ServingProperties};

use super::load_registry;

/// Show how a model directory's engine would be launched
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Model directory containing serving.properties
    pub model_dir: PathBuf,

    /// Fill missing properties from an accelerator preset
    #[arg(long, value_name = "PRESET")]
    pub accel: Option<Accelerator>,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Check that the launcher exists on PATH
    #[arg(long)]
    pub check: bool,
}

pub fn execute(config: Option<&Path>, args: PlanArgs) -> Result<()> {
    if !args.model_dir.is_dir() {
        color_eyre::eyre::bail!("Model directory not found: {}", args.model_dir.display());
    }

    let (config, registry) = load_registry(config)?;
    let mut props = ServingProperties::from_dir_or_default(&args.model_dir)?;
    if let Some(accel) = args.accel {
        accel.apply_to(&mut props);
    }

    let plan = LaunchPlanner::from_config(&config).plan(&registry, &props)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        output::status("Engine", &plan.engine);
        output::status("Mode", &plan.mode.to_string());
        output::status("Entry", &plan.entry_point);
        if let LaunchMode::MultiProcess { world_size } = plan.mode {
            output::info(&format!("  {} coordinated worker process(es)", world_size));
        }
        println!("{}", plan.command_line());
    }

    if args.check {
        match plan.resolve_program() {
            Ok(path) => output::check(&format!("Launcher found: {}", path.display())),
            Err(e) => {
                output::error(&e.to_string());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
