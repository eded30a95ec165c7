//! Diagnostics recorder
//!
//! Append-only log of what each click did: the detected context, the
//! resolved destination and every strategy attempt, keyed by click number.
//! Strictly downstream of dispatch; nothing here is read back by the
//! resolver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::tier::Destination;
use crate::types::{
    AccessTier, AttemptOutcome, ExecutionContext, FrameLink, NavigationAttempt, Strategy,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    ContextDetected {
        context: ExecutionContext,
    },
    ResolutionStarted {
        click: u64,
        tier: AccessTier,
        context: ExecutionContext,
    },
    DestinationResolved {
        click: u64,
        destination: Destination,
    },
    ResolutionFailed {
        click: u64,
        error: String,
    },
    AttemptRecorded {
        click: u64,
        attempt: NavigationAttempt,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub context: ExecutionContext,
    pub detected_at: DateTime<Utc>,
}

/// Everything one accepted click produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    pub click: u64,
    pub tier: AccessTier,
    pub started_at: DateTime<Utc>,
    pub context: ExecutionContext,
    #[serde(default)]
    pub destination: Option<Destination>,
    #[serde(default)]
    pub attempts: Vec<NavigationAttempt>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ResolutionRecord {
    pub fn delivered_by(&self) -> Option<Strategy> {
        self.attempts
            .iter()
            .find(|a| a.is_success())
            .map(|a| a.strategy)
    }
}

#[derive(Debug, Default)]
pub struct DiagnosticsRecorder {
    contexts: Vec<ContextSnapshot>,
    records: Vec<ResolutionRecord>,
}

impl DiagnosticsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from previously exported records, ordered by click.
    /// Duplicate click numbers keep the first record.
    pub fn resume(mut records: Vec<ResolutionRecord>) -> Self {
        records.sort_by_key(|r| r.click);
        records.dedup_by_key(|r| r.click);
        Self {
            contexts: Vec::new(),
            records,
        }
    }

    /// Append an event. Never fails; events that do not fit are dropped.
    pub fn record(&mut self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::ContextDetected { context } => {
                debug!(
                    embedded = context.embedded,
                    parent = link_name(context.parent),
                    top = link_name(context.top),
                    "execution context detected"
                );
                self.contexts.push(ContextSnapshot {
                    context,
                    detected_at: Utc::now(),
                });
            }
            DiagnosticEvent::ResolutionStarted {
                click,
                tier,
                context,
            } => {
                if self.records.last().is_some_and(|r| r.click >= click) {
                    trace!(click, "out-of-order click dropped");
                    return;
                }
                debug!(click, %tier, "resolution started");
                self.records.push(ResolutionRecord {
                    click,
                    tier,
                    started_at: Utc::now(),
                    context,
                    destination: None,
                    attempts: Vec::new(),
                    error: None,
                });
            }
            DiagnosticEvent::DestinationResolved { click, destination } => {
                if let Some(record) = self.entry(click) {
                    debug!(click, kind = destination.kind(), "destination resolved");
                    record.destination = Some(destination);
                }
            }
            DiagnosticEvent::ResolutionFailed { click, error } => {
                if let Some(record) = self.entry(click) {
                    warn!(click, %error, "resolution failed");
                    record.error = Some(error);
                }
            }
            DiagnosticEvent::AttemptRecorded { click, attempt } => {
                if let Some(record) = self.entry(click) {
                    debug!(
                        click,
                        index = attempt.index,
                        strategy = %attempt.strategy,
                        outcome = outcome_name(attempt.outcome),
                        "navigation attempt recorded"
                    );
                    record.attempts.push(attempt);
                }
            }
        }
    }

    fn entry(&mut self, click: u64) -> Option<&mut ResolutionRecord> {
        let found = self.records.iter_mut().rev().find(|r| r.click == click);
        if found.is_none() {
            trace!(click, "diagnostic event for unknown click dropped");
        }
        found
    }

    /// Resolution records, oldest first
    pub fn snapshot(&self) -> &[ResolutionRecord] {
        &self.records
    }

    pub fn latest(&self) -> Option<&ResolutionRecord> {
        self.records.last()
    }

    /// First detected context for this page
    pub fn context(&self) -> Option<&ExecutionContext> {
        self.contexts.first().map(|s| &s.context)
    }

    pub fn contexts(&self) -> &[ContextSnapshot] {
        &self.contexts
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Human-readable developer view: context plus the latest attempt sequence
    pub fn render(&self) -> String {
        let mut sections = Vec::new();

        sections.push("Navigation Diagnostics\n======================".to_string());

        sections.push("\nContext\n-------".to_string());
        match self.context() {
            Some(ctx) => sections.push(format!(
                "  embedded: {}\n  parent:   {}\n  top:      {}",
                ctx.embedded,
                link_name(ctx.parent),
                link_name(ctx.top),
            )),
            None => sections.push("  not detected yet".to_string()),
        }

        let Some(record) = self.latest() else {
            sections.push("\nNo clicks recorded".to_string());
            return sections.join("\n");
        };

        let heading = format!("Click #{} ({})", record.click, record.tier);
        sections.push(format!("\n{}\n{}", heading, "-".repeat(heading.len())));

        if let Some(dest) = &record.destination {
            sections.push(format!("  destination: {} {}", dest.kind(), dest.url()));
        }
        if let Some(error) = &record.error {
            sections.push(format!("  error: {}", error));
        }

        for attempt in &record.attempts {
            let detail = attempt
                .error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_default();
            sections.push(
                format!(
                    "  {}. {:<20} {:<10} {}",
                    attempt.index,
                    attempt.strategy.as_str(),
                    outcome_name(attempt.outcome),
                    detail
                )
                .trim_end()
                .to_string(),
            );
        }

        let result = match record.delivered_by() {
            Some(strategy) => format!("\ndelivered by {}", strategy),
            None if record.error.is_some() => "\nno navigation attempted".to_string(),
            None => "\nnot delivered".to_string(),
        };
        sections.push(result);

        sections.join("\n")
    }
}

fn link_name(link: FrameLink) -> &'static str {
    match link {
        FrameLink::Missing => "missing",
        FrameLink::SameAsCurrent => "same-as-current",
        FrameLink::Distinct => "distinct",
    }
}

fn outcome_name(outcome: AttemptOutcome) -> &'static str {
    match outcome {
        AttemptOutcome::Succeeded => "succeeded",
        AttemptOutcome::Failed => "failed",
        AttemptOutcome::Skipped => "skipped",
    }
}
