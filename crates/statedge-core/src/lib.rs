//! Embedded-context navigation resolver for the StatEdge access button

mod button;
mod config;
mod context;
mod diagnostics;
mod dispatch;
mod error;
pub mod host;
mod message;
mod tier;
mod types;

pub use button::{AccessButton, ClickOutcome};
pub use config::{
    BuildMode, Config, DestinationConfig, BUILD_MODE_ENV, FREE_ENV, PLUS_ENV, PREMIUM_ENV,
};
pub use context::detect;
pub use diagnostics::{ContextSnapshot, DiagnosticEvent, DiagnosticsRecorder, ResolutionRecord};
pub use dispatch::{dispatch, DispatchMode, NavigationOutcome, EMBEDDED_CHAIN};
pub use error::{ConfigError, DispatchError, HostFault, ParseTierError, ResolutionError};
pub use host::BrowsingContext;
pub use message::{NavigationMessage, MESSAGE_SOURCE, TARGET_ORIGIN};
pub use tier::{experience_url, resolve, Destination, Target, EXPERIENCE_URL_PREFIX};
pub use types::{
    AccessTier, AttemptOutcome, ExecutionContext, Frame, FrameLink, NavigationAttempt,
    SessionSignal, Strategy,
};
