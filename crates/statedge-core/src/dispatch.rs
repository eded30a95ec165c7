//! Navigation dispatcher: ordered delivery strategies

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::HostFault;
use crate::host::BrowsingContext;
use crate::message::TARGET_ORIGIN;
use crate::tier::Destination;
use crate::types::{ExecutionContext, Frame, NavigationAttempt, Strategy};

/// Strategy chain for embedded pages, highest priority first
pub const EMBEDDED_CHAIN: [Strategy; 4] = [
    Strategy::ParentAssign,
    Strategy::TopAssign,
    Strategy::PostMessage,
    Strategy::LocalAssign,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    Standalone,
    Embedded,
}

/// Result of one dispatch: every attempt made, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationOutcome {
    pub mode: DispatchMode,
    pub url: String,
    pub attempts: Vec<NavigationAttempt>,
}

impl NavigationOutcome {
    pub fn successful_attempt(&self) -> Option<&NavigationAttempt> {
        self.attempts.iter().find(|a| a.is_success())
    }

    /// Strategy that delivered, if any
    pub fn delivered_by(&self) -> Option<Strategy> {
        self.successful_attempt().map(|a| a.strategy)
    }

    pub fn is_delivered(&self) -> bool {
        self.successful_attempt().is_some()
    }
}

/// Deliver `destination` from the given context.
///
/// Standalone pages get a single open-in-new-context request. Embedded pages
/// walk [`EMBEDDED_CHAIN`] and stop at the first success; unmet
/// preconditions and host errors are recorded and the chain advances.
/// Nothing here waits on the receiving context.
pub fn dispatch<H: BrowsingContext + ?Sized>(
    destination: &Destination,
    context: &ExecutionContext,
    host: &H,
) -> NavigationOutcome {
    let url = destination.url();

    if !context.embedded {
        let attempt = try_strategy(1, Strategy::OpenInNewContext, destination, &url, context, host);
        return NavigationOutcome {
            mode: DispatchMode::Standalone,
            url,
            attempts: vec![attempt],
        };
    }

    let mut attempts = Vec::with_capacity(EMBEDDED_CHAIN.len());
    for (position, strategy) in EMBEDDED_CHAIN.into_iter().enumerate() {
        let attempt = try_strategy(position + 1, strategy, destination, &url, context, host);
        let delivered = attempt.is_success();
        attempts.push(attempt);
        if delivered {
            break;
        }
    }

    NavigationOutcome {
        mode: DispatchMode::Embedded,
        url,
        attempts,
    }
}

fn try_strategy<H: BrowsingContext + ?Sized>(
    index: usize,
    strategy: Strategy,
    destination: &Destination,
    url: &str,
    context: &ExecutionContext,
    host: &H,
) -> NavigationAttempt {
    if let Err(reason) = availability(strategy, context) {
        debug!(%strategy, reason, "navigation strategy unavailable");
        return NavigationAttempt::skipped(index, strategy, reason);
    }

    match execute(strategy, destination, url, host) {
        Ok(()) => {
            info!(%strategy, url, tier = %destination.tier, "navigation delivered");
            NavigationAttempt::succeeded(index, strategy)
        }
        Err(fault) => {
            warn!(%strategy, error = %fault, "navigation strategy threw");
            NavigationAttempt::threw(index, strategy, fault.0)
        }
    }
}

/// Preconditions. Never target a context that is the current one.
fn availability(strategy: Strategy, context: &ExecutionContext) -> Result<(), &'static str> {
    let reachable = |frame| context.link(frame).is_distinct();
    match strategy {
        Strategy::ParentAssign if !reachable(Frame::Parent) => {
            Err("parent frame not reachable or is the current frame")
        }
        Strategy::TopAssign if !reachable(Frame::Top) => {
            Err("top frame not reachable or is the current frame")
        }
        Strategy::PostMessage if !reachable(Frame::Parent) => Err("no parent frame to message"),
        _ => Ok(()),
    }
}

fn execute<H: BrowsingContext + ?Sized>(
    strategy: Strategy,
    destination: &Destination,
    url: &str,
    host: &H,
) -> Result<(), HostFault> {
    match strategy {
        Strategy::OpenInNewContext => host.open_in_new_context(url),
        Strategy::ParentAssign => host.assign_location(Frame::Parent, url),
        Strategy::TopAssign => host.assign_location(Frame::Top, url),
        Strategy::PostMessage => {
            host.post_message(Frame::Parent, &destination.message(), TARGET_ORIGIN)
        }
        Strategy::LocalAssign => host.assign_location(Frame::Current, url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FrameTopology, HostCall, ScriptedHost};
    use crate::tier::Target;
    use crate::types::{AccessTier, AttemptOutcome, FrameLink};

    fn premium() -> Destination {
        Destination {
            tier: AccessTier::Premium,
            target: Target::ExperienceId("exp_123".to_string()),
        }
    }

    fn run(host: &ScriptedHost) -> NavigationOutcome {
        let context = crate::context::detect(host);
        dispatch(&premium(), &context, host)
    }

    #[test]
    fn test_same_origin_parent_assign() {
        let host = ScriptedHost::new(FrameTopology::SameOrigin);
        let outcome = run(&host);

        assert_eq!(outcome.mode, DispatchMode::Embedded);
        assert_eq!(outcome.attempts.len(), 1);
        assert_eq!(outcome.delivered_by(), Some(Strategy::ParentAssign));
        assert_eq!(
            host.navigations(),
            vec![HostCall::Assign {
                frame: Frame::Parent,
                url: "https://whop.com/experiences/exp_123".to_string(),
            }]
        );
    }

    #[test]
    fn test_nested_falls_through_to_top() {
        let host = ScriptedHost::new(FrameTopology::Nested);
        let outcome = run(&host);

        assert_eq!(outcome.attempts.len(), 2);
        assert_eq!(outcome.attempts[0].outcome, AttemptOutcome::Failed);
        assert_eq!(outcome.delivered_by(), Some(Strategy::TopAssign));
    }

    #[test]
    fn test_message_rejected_reaches_local() {
        let host = ScriptedHost::new(FrameTopology::CrossOrigin).reject_messages();
        let outcome = run(&host);

        let strategies: Vec<_> = outcome.attempts.iter().map(|a| a.strategy).collect();
        assert_eq!(strategies, EMBEDDED_CHAIN.to_vec());
        assert_eq!(outcome.delivered_by(), Some(Strategy::LocalAssign));
    }

    #[test]
    fn test_top_only_skips_parent_strategies() {
        // Parent unreadable, top reachable
        let host = ScriptedHost::with_links(FrameLink::Missing, FrameLink::Distinct);
        let outcome = run(&host);

        assert_eq!(outcome.attempts[0].outcome, AttemptOutcome::Skipped);
        assert_eq!(outcome.delivered_by(), Some(Strategy::TopAssign));
    }

    #[test]
    fn test_no_strategy_repeats() {
        let host = ScriptedHost::new(FrameTopology::CrossOrigin)
            .reject_messages()
            .block_assign(Frame::Current);
        let outcome = run(&host);

        assert_eq!(outcome.attempts.len(), EMBEDDED_CHAIN.len());
        assert!(!outcome.is_delivered());
        let indices: Vec<_> = outcome.attempts.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }
}
