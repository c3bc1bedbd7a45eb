use crate::output;

use std::path::Path;

use color_eyre::Result;

use engine_service::EngineConfig;

use super::config_path;

pub fn execute(config: Option<&Path>) -> Result<()> {
    let path = config_path(config);
    if path.exists() {
        output::status("Config", &path.display().to_string());
    } else {
        output::status("Config", &format!("{} (not found, using defaults)", path.display()));
    }

    let config = EngineConfig::load(&path)?;
    print!("{}", config.to_yaml()?);

    Ok(())
}
