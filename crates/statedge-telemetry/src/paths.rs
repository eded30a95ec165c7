//! Path resolution for statedge data files

use std::path::PathBuf;

/// Overrides the data directory when set
pub const HOME_ENV: &str = "STATEDGE_HOME";

/// Resolves standard paths for statedge data files
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
}

impl Paths {
    /// `$STATEDGE_HOME`, or `~/.statedge`
    pub fn new() -> std::io::Result<Self> {
        if let Some(root) = std::env::var_os(HOME_ENV) {
            return Ok(Self::with_root(root));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::with_root(home.join(".statedge")))
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: root.into(),
        }
    }

    /// Exported resolution records
    pub fn history_file(&self) -> PathBuf {
        self.data_dir.join("diagnostics.jsonl")
    }

    /// Optional destination config picked up when no `--config` is given
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }
}
