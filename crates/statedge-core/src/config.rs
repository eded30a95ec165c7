//! Configuration for navigation resolution

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::types::AccessTier;

pub const FREE_ENV: &str = "STATEDGE_FREE_EXPERIENCE_ID";
pub const PREMIUM_ENV: &str = "STATEDGE_PREMIUM_EXPERIENCE_ID";
pub const PLUS_ENV: &str = "STATEDGE_PLUS_UPGRADE_URL";
pub const BUILD_MODE_ENV: &str = "STATEDGE_BUILD_MODE";

/// Raw destination value per tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationConfig {
    #[serde(default)]
    pub free: Option<String>,
    #[serde(default)]
    pub premium: Option<String>,
    #[serde(default)]
    pub plus: Option<String>,
}

impl DestinationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any key/value source (environment, test fixtures)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            free: lookup(FREE_ENV),
            premium: lookup(PREMIUM_ENV),
            plus: lookup(PLUS_ENV),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn with(mut self, tier: AccessTier, value: impl Into<String>) -> Self {
        *self.slot_mut(tier) = Some(value.into());
        self
    }

    /// Configured value for a tier; blank values count as absent
    pub fn get(&self, tier: AccessTier) -> Option<&str> {
        let value = match tier {
            AccessTier::Free => self.free.as_deref(),
            AccessTier::Premium => self.premium.as_deref(),
            AccessTier::Plus => self.plus.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn env_key(tier: AccessTier) -> &'static str {
        match tier {
            AccessTier::Free => FREE_ENV,
            AccessTier::Premium => PREMIUM_ENV,
            AccessTier::Plus => PLUS_ENV,
        }
    }

    fn slot_mut(&mut self, tier: AccessTier) -> &mut Option<String> {
        match tier {
            AccessTier::Free => &mut self.free,
            AccessTier::Premium => &mut self.premium,
            AccessTier::Plus => &mut self.plus,
        }
    }
}

/// Whether developer-facing surfaces are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn is_development(&self) -> bool {
        matches!(self, BuildMode::Development)
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(BuildMode::Development),
            "production" | "prod" => Ok(BuildMode::Production),
            other => Err(ConfigError::BuildMode(other.to_string())),
        }
    }
}

/// Resolver configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Destination per tier
    #[serde(default)]
    pub destinations: DestinationConfig,

    /// Development enables alerts and the diagnostics overlay
    #[serde(default)]
    pub build_mode: BuildMode,
}

impl Config {
    pub fn new(destinations: DestinationConfig) -> Self {
        Self {
            destinations,
            build_mode: BuildMode::default(),
        }
    }

    /// Read destinations and build mode from the process environment.
    ///
    /// Missing destinations are not an error here; they surface when the
    /// tier is resolved.
    pub fn from_env() -> Result<Self, ConfigError> {
        let build_mode = match std::env::var(BUILD_MODE_ENV) {
            Ok(mode) => mode.parse()?,
            Err(_) => BuildMode::default(),
        };

        Ok(Self {
            destinations: DestinationConfig::from_env(),
            build_mode,
        })
    }

    /// Load from a JSON file, either `{"destinations": {...}}` or the bare
    /// `{"free": ..., "premium": ..., "plus": ...}` mapping
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: display.clone(),
                source,
            })?;

        let parsed = if value.get("destinations").is_some() {
            serde_json::from_value::<Config>(value)
        } else {
            serde_json::from_value::<DestinationConfig>(value).map(Config::new)
        };

        parsed.map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup() {
        let mut vars = HashMap::new();
        vars.insert(FREE_ENV, "exp_free");
        vars.insert(PLUS_ENV, "https://whop.com/win-now/statedge/");

        let config = DestinationConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.get(AccessTier::Free), Some("exp_free"));
        assert_eq!(config.get(AccessTier::Premium), None);
        assert_eq!(
            config.get(AccessTier::Plus),
            Some("https://whop.com/win-now/statedge/")
        );
    }

    #[test]
    fn test_blank_value_is_absent() {
        let config = DestinationConfig::new().with(AccessTier::Premium, "   ");
        assert_eq!(config.get(AccessTier::Premium), None);
    }

    #[test]
    fn test_build_mode_parse() {
        assert_eq!(
            "production".parse::<BuildMode>().unwrap(),
            BuildMode::Production
        );
        assert_eq!("DEV".parse::<BuildMode>().unwrap(), BuildMode::Development);
        assert!("staging".parse::<BuildMode>().is_err());
    }

    #[test]
    fn test_config_deserialize_bare_mapping() {
        let json = r#"{"free":"exp_a","premium":"exp_b"}"#;
        let destinations: DestinationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(destinations.get(AccessTier::Premium), Some("exp_b"));
        assert_eq!(destinations.get(AccessTier::Plus), None);
    }
}
