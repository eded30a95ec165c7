//! Tier resolution: access tier to destination descriptor

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::DestinationConfig;
use crate::error::ResolutionError;
use crate::message::NavigationMessage;
use crate::types::AccessTier;

/// Hosted experiences live under this prefix
pub const EXPERIENCE_URL_PREFIX: &str = "https://whop.com/experiences/";

/// What a tier's configured value means
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Target {
    /// Complete URL, used as-is
    DirectUrl(String),
    /// Opaque id composed with [`EXPERIENCE_URL_PREFIX`]
    ExperienceId(String),
}

/// A fully resolved, tier-specific navigation target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub tier: AccessTier,
    pub target: Target,
}

impl Destination {
    pub fn kind(&self) -> &'static str {
        match self.target {
            Target::DirectUrl(_) => "direct-url",
            Target::ExperienceId(_) => "experience-id",
        }
    }

    /// Fully composed URL handed to assignment strategies
    pub fn url(&self) -> String {
        match &self.target {
            Target::DirectUrl(url) => url.clone(),
            Target::ExperienceId(id) => experience_url(id),
        }
    }

    /// Cross-context message describing this navigation
    pub fn message(&self) -> NavigationMessage {
        match &self.target {
            Target::DirectUrl(url) => NavigationMessage::external(url.clone(), self.tier),
            Target::ExperienceId(id) => NavigationMessage::experience(id.clone(), self.tier),
        }
    }
}

/// Resolve a tier against the configured destinations.
///
/// `plus` is always a direct URL and the other tiers are always experience
/// ids; configuration only supplies the value.
pub fn resolve(
    tier: AccessTier,
    config: &DestinationConfig,
) -> Result<Destination, ResolutionError> {
    let value = config
        .get(tier)
        .ok_or(ResolutionError::MissingConfig { tier })?
        .to_string();

    let target = match tier {
        AccessTier::Plus => Target::DirectUrl(value),
        AccessTier::Free | AccessTier::Premium => Target::ExperienceId(value),
    };

    Ok(Destination { tier, target })
}

/// Append `id` to the experience prefix as a single path segment
pub fn experience_url(id: &str) -> String {
    let Ok(mut url) = Url::parse(EXPERIENCE_URL_PREFIX) else {
        return format!("{EXPERIENCE_URL_PREFIX}{id}");
    };

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(id);
    }
    url.into()
}
