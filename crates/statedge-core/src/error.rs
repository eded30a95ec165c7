//! Error types for resolution and dispatch

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AccessTier, Strategy};

/// Configuration defects surfaced to the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("no destination configured for tier '{tier}'")]
    MissingConfig { tier: AccessTier },
}

/// Per-strategy failures, absorbed inside the dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchError {
    #[error("{strategy} unavailable: {reason}")]
    StrategyUnavailable { strategy: Strategy, reason: String },

    #[error("{strategy} threw: {message}")]
    AttemptThrew { strategy: Strategy, message: String },
}

/// Error raised by a browsing-context host operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HostFault(pub String);

impl HostFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn security(action: &str) -> Self {
        Self(format!(
            "SecurityError: blocked a frame from {action} a cross-origin frame"
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown access tier '{0}' (expected free, premium or plus)")]
pub struct ParseTierError(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid build mode '{0}' (expected development or production)")]
    BuildMode(String),
}
