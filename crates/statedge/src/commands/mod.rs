pub mod check;
pub mod history;
pub mod resolve;
pub mod simulate;
pub mod version;

use statedge_core::Config;
use statedge_telemetry::Paths;
use std::path::Path;

/// `--config` file, else `~/.statedge/config.json` if present, else environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Ok(Config::load(path)?);
    }

    if let Ok(paths) = Paths::new() {
        let default = paths.config_file();
        if default.exists() {
            tracing::debug!(path = %default.display(), "using default config file");
            return Ok(Config::load(&default)?);
        }
    }

    Ok(Config::from_env()?)
}
