use std::path::Path;

use anyhow::Result;
use fi_config::ServiceConfig;

/// Load from `path` when given, otherwise the default location, then env.
pub(crate) fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    match path {
        Some(path) => {
            let mut config = ServiceConfig::load_from(path)?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            Ok(config)
        }
        None => ServiceConfig::load(),
    }
}

pub(crate) fn handle_config_show(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    print!("{}", config.to_display_toml()?);
    Ok(())
}

pub(crate) fn handle_config_init() {
    print!("{}", ServiceConfig::default_template());
}

pub(crate) fn handle_config_path(path: Option<&Path>) -> Result<()> {
    let resolved = path
        .map(Path::to_path_buf)
        .or_else(ServiceConfig::config_path)
        .ok_or_else(|| anyhow::anyhow!("cannot determine config directory"))?;
    println!("{}", resolved.display());
    Ok(())
}
