//! Tier-gated access button: the click handler

use tracing::{trace, warn};

use crate::config::Config;
use crate::context::detect;
use crate::diagnostics::{DiagnosticEvent, DiagnosticsRecorder};
use crate::dispatch::{dispatch, NavigationOutcome};
use crate::error::ResolutionError;
use crate::host::BrowsingContext;
use crate::tier::resolve;
use crate::types::{AccessTier, ExecutionContext, SessionSignal};

/// What a click did
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Session still loading; nothing attempted or recorded
    Suppressed,
    Dispatched(NavigationOutcome),
}

/// Click handler for one page lifetime.
///
/// Owns the host, the configuration and the injected diagnostics recorder.
/// The execution context is detected on the first accepted click and reused
/// for every later one. Click numbers continue from the recorder's latest
/// record.
pub struct AccessButton<H: BrowsingContext> {
    host: H,
    config: Config,
    diagnostics: DiagnosticsRecorder,
    context: Option<ExecutionContext>,
    clicks: u64,
}

impl<H: BrowsingContext> AccessButton<H> {
    pub fn new(host: H, config: Config, diagnostics: DiagnosticsRecorder) -> Self {
        let clicks = diagnostics.latest().map_or(0, |r| r.click);
        Self {
            host,
            config,
            diagnostics,
            context: None,
            clicks,
        }
    }

    /// The button is disabled while the session signal is loading
    pub fn is_disabled(session: &SessionSignal) -> bool {
        session.is_loading
    }

    /// Handle a click for `tier`.
    ///
    /// Only a missing destination is returned as an error; per-strategy
    /// failures stay inside the outcome's attempt list.
    pub fn click(
        &mut self,
        tier: AccessTier,
        session: &SessionSignal,
    ) -> Result<ClickOutcome, ResolutionError> {
        if Self::is_disabled(session) {
            trace!(%tier, "click ignored while session is loading");
            return Ok(ClickOutcome::Suppressed);
        }

        self.clicks += 1;
        let click = self.clicks;
        let context = self.context();

        self.diagnostics.record(DiagnosticEvent::ResolutionStarted {
            click,
            tier,
            context,
        });

        let destination = match resolve(tier, &self.config.destinations) {
            Ok(destination) => destination,
            Err(err) => {
                self.diagnostics.record(DiagnosticEvent::ResolutionFailed {
                    click,
                    error: err.to_string(),
                });
                if self.config.build_mode.is_development() {
                    self.host.alert(&format!("Navigation unavailable: {err}"));
                } else {
                    warn!(%tier, "click ignored: {}", err);
                }
                return Err(err);
            }
        };

        self.diagnostics.record(DiagnosticEvent::DestinationResolved {
            click,
            destination: destination.clone(),
        });

        let outcome = dispatch(&destination, &context, &self.host);
        for attempt in &outcome.attempts {
            self.diagnostics.record(DiagnosticEvent::AttemptRecorded {
                click,
                attempt: attempt.clone(),
            });
        }

        Ok(ClickOutcome::Dispatched(outcome))
    }

    /// Cached execution context, detected on first use
    pub fn context(&mut self) -> ExecutionContext {
        if let Some(context) = self.context {
            return context;
        }

        let context = detect(&self.host);
        self.diagnostics
            .record(DiagnosticEvent::ContextDetected { context });
        self.context = Some(context);
        context
    }

    pub fn diagnostics(&self) -> &DiagnosticsRecorder {
        &self.diagnostics
    }

    /// Developer overlay text; `None` in production builds
    pub fn developer_overlay(&self) -> Option<String> {
        self.config
            .build_mode
            .is_development()
            .then(|| self.diagnostics.render())
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildMode, DestinationConfig};
    use crate::host::{FrameTopology, HostCall, ScriptedHost};

    fn config(mode: BuildMode) -> Config {
        Config {
            destinations: DestinationConfig::new().with(AccessTier::Free, "exp_free"),
            build_mode: mode,
        }
    }

    #[test]
    fn test_context_detected_once() {
        let host = ScriptedHost::new(FrameTopology::SameOrigin);
        let mut button =
            AccessButton::new(host, config(BuildMode::Production), DiagnosticsRecorder::new());
        let ready = SessionSignal::ready(None);

        button.click(AccessTier::Free, &ready).unwrap();
        button.click(AccessTier::Free, &ready).unwrap();

        assert_eq!(button.diagnostics().contexts().len(), 1);
        assert_eq!(button.diagnostics().len(), 2);
    }

    #[test]
    fn test_missing_config_alerts_in_development() {
        let host = ScriptedHost::new(FrameTopology::Standalone);
        let mut button =
            AccessButton::new(host, config(BuildMode::Development), DiagnosticsRecorder::new());

        let err = button
            .click(AccessTier::Premium, &SessionSignal::ready(None))
            .unwrap_err();

        assert_eq!(
            err,
            ResolutionError::MissingConfig {
                tier: AccessTier::Premium
            }
        );
        assert!(button.host().navigations().is_empty());
        assert!(matches!(
            button.host().calls().as_slice(),
            [HostCall::Alert { .. }]
        ));
        let record = button.diagnostics().latest().unwrap();
        assert!(record.attempts.is_empty());
        assert!(record.error.is_some());
    }

    #[test]
    fn test_missing_config_silent_in_production() {
        let host = ScriptedHost::new(FrameTopology::Standalone);
        let mut button =
            AccessButton::new(host, config(BuildMode::Production), DiagnosticsRecorder::new());

        assert!(button
            .click(AccessTier::Plus, &SessionSignal::ready(None))
            .is_err());
        assert!(button.host().calls().is_empty());
        assert!(button.developer_overlay().is_none());
    }

    #[test]
    fn test_click_numbers_continue_from_injected_recorder() {
        let mut recorder = DiagnosticsRecorder::new();
        recorder.record(DiagnosticEvent::ResolutionStarted {
            click: 1,
            tier: AccessTier::Plus,
            context: ExecutionContext::standalone(),
        });

        let host = ScriptedHost::new(FrameTopology::Standalone);
        let mut button = AccessButton::new(host, config(BuildMode::Production), recorder);
        button
            .click(AccessTier::Free, &SessionSignal::ready(None))
            .unwrap();

        let records = button.diagnostics().snapshot();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tier, AccessTier::Plus);
        assert!(records[0].attempts.is_empty());
        assert!(records[0].destination.is_none());
        assert_eq!(records[1].click, 2);
        assert_eq!(records[1].tier, AccessTier::Free);
        assert_eq!(
            records[1].destination.as_ref().map(|d| d.url()),
            Some("https://whop.com/experiences/exp_free".to_string())
        );
        assert_eq!(records[1].attempts.len(), 1);
    }

    #[test]
    fn test_loading_gate() {
        let host = ScriptedHost::new(FrameTopology::Standalone);
        let mut button =
            AccessButton::new(host, config(BuildMode::Development), DiagnosticsRecorder::new());

        let outcome = button
            .click(AccessTier::Free, &SessionSignal::loading())
            .unwrap();

        assert_eq!(outcome, ClickOutcome::Suppressed);
        assert!(button.diagnostics().is_empty());
        assert!(button.host().calls().is_empty());
    }
}
