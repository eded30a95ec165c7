//! Core types for navigation resolution

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DispatchError, ParseTierError};

/// Access tier selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    /// One free pick daily
    Free,
    /// Daily premium pick
    Premium,
    /// Paid upgrade, always a complete URL
    Plus,
}

impl AccessTier {
    pub const ALL: [AccessTier; 3] = [AccessTier::Free, AccessTier::Premium, AccessTier::Plus];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessTier::Free => "free",
            AccessTier::Premium => "premium",
            AccessTier::Plus => "plus",
        }
    }
}

impl fmt::Display for AccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(AccessTier::Free),
            "premium" => Ok(AccessTier::Premium),
            "plus" => Ok(AccessTier::Plus),
            other => Err(ParseTierError(other.to_string())),
        }
    }
}

/// Reachability of a related browsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameLink {
    /// No reference, or reading it raised
    Missing,
    /// Reference resolves to the current context
    SameAsCurrent,
    /// Reference resolves to a different context
    Distinct,
}

impl FrameLink {
    pub fn is_distinct(&self) -> bool {
        matches!(self, FrameLink::Distinct)
    }
}

/// Browsing contexts a navigation can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frame {
    Current,
    Parent,
    Top,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Frame::Current => "current",
            Frame::Parent => "parent",
            Frame::Top => "top",
        })
    }
}

/// Where the page is running, computed once per page load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub embedded: bool,
    pub parent: FrameLink,
    pub top: FrameLink,
}

impl ExecutionContext {
    pub fn standalone() -> Self {
        Self {
            embedded: false,
            parent: FrameLink::SameAsCurrent,
            top: FrameLink::SameAsCurrent,
        }
    }

    pub fn link(&self, frame: Frame) -> FrameLink {
        match frame {
            Frame::Current => FrameLink::SameAsCurrent,
            Frame::Parent => self.parent,
            Frame::Top => self.top,
        }
    }
}

/// Delivery strategies, in the order the dispatcher may use them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Standalone pages only
    OpenInNewContext,
    ParentAssign,
    TopAssign,
    PostMessage,
    LocalAssign,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::OpenInNewContext => "open-in-new-context",
            Strategy::ParentAssign => "parent-assign",
            Strategy::TopAssign => "top-assign",
            Strategy::PostMessage => "post-message",
            Strategy::LocalAssign => "local-assign",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptOutcome {
    Succeeded,
    Failed,
    Skipped,
}

/// One step of a resolution's strategy chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationAttempt {
    /// 1-based position in the chain
    pub index: usize,
    pub strategy: Strategy,
    pub outcome: AttemptOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<DispatchError>,
    pub at: DateTime<Utc>,
}

impl NavigationAttempt {
    pub fn succeeded(index: usize, strategy: Strategy) -> Self {
        Self {
            index,
            strategy,
            outcome: AttemptOutcome::Succeeded,
            error: None,
            at: Utc::now(),
        }
    }

    pub fn skipped(index: usize, strategy: Strategy, reason: impl Into<String>) -> Self {
        Self {
            index,
            strategy,
            outcome: AttemptOutcome::Skipped,
            error: Some(DispatchError::StrategyUnavailable {
                strategy,
                reason: reason.into(),
            }),
            at: Utc::now(),
        }
    }

    pub fn threw(index: usize, strategy: Strategy, message: impl Into<String>) -> Self {
        Self {
            index,
            strategy,
            outcome: AttemptOutcome::Failed,
            error: Some(DispatchError::AttemptThrew {
                strategy,
                message: message.into(),
            }),
            at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == AttemptOutcome::Succeeded
    }
}

/// Upstream session signal from the auth provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSignal {
    pub is_loading: bool,
    #[serde(default)]
    pub user: Option<String>,
}

impl SessionSignal {
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            user: None,
        }
    }

    pub fn ready(user: Option<String>) -> Self {
        Self {
            is_loading: false,
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_str() {
        assert_eq!("free".parse::<AccessTier>().unwrap(), AccessTier::Free);
        assert_eq!(" Premium ".parse::<AccessTier>().unwrap(), AccessTier::Premium);
        assert_eq!("PLUS".parse::<AccessTier>().unwrap(), AccessTier::Plus);
        assert!("gold".parse::<AccessTier>().is_err());
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        let json = serde_json::to_string(&AccessTier::Premium).unwrap();
        assert_eq!(json, "\"premium\"");
    }

    #[test]
    fn test_skipped_attempt_carries_unavailable_error() {
        let attempt = NavigationAttempt::skipped(2, Strategy::TopAssign, "no top reference");
        assert_eq!(attempt.outcome, AttemptOutcome::Skipped);
        assert!(matches!(
            attempt.error,
            Some(DispatchError::StrategyUnavailable {
                strategy: Strategy::TopAssign,
                ..
            })
        ));
        assert!(!attempt.is_success());
    }

    #[test]
    fn test_context_link_by_frame() {
        let context = ExecutionContext {
            embedded: true,
            parent: FrameLink::Missing,
            top: FrameLink::Distinct,
        };
        assert_eq!(context.link(Frame::Current), FrameLink::SameAsCurrent);
        assert_eq!(context.link(Frame::Parent), FrameLink::Missing);
        assert_eq!(context.link(Frame::Top), FrameLink::Distinct);
        assert!(!ExecutionContext::standalone().link(Frame::Top).is_distinct());
    }

    #[test]
    fn test_session_signal_wire_names() {
        let signal: SessionSignal =
            serde_json::from_str(r#"{"isLoading":true,"user":null}"#).unwrap();
        assert!(signal.is_loading);
        assert_eq!(signal.user, None);
    }
}
