//! Execution context detection

use crate::host::BrowsingContext;
use crate::types::{ExecutionContext, Frame, FrameLink};

/// Inspect the host's frame identity.
///
/// The page is embedded unless the top-level reference is the current
/// context itself; an unreadable top counts as embedded.
pub fn detect<H: BrowsingContext + ?Sized>(host: &H) -> ExecutionContext {
    let parent = host.link(Frame::Parent);
    let top = host.link(Frame::Top);

    ExecutionContext {
        embedded: top != FrameLink::SameAsCurrent,
        parent,
        top,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FrameTopology, ScriptedHost};

    #[test]
    fn test_standalone() {
        let ctx = detect(&ScriptedHost::new(FrameTopology::Standalone));
        assert_eq!(ctx, ExecutionContext::standalone());
    }

    #[test]
    fn test_iframe() {
        let ctx = detect(&ScriptedHost::new(FrameTopology::CrossOrigin));
        assert!(ctx.embedded);
        assert!(ctx.parent.is_distinct());
        assert!(ctx.top.is_distinct());
    }

    #[test]
    fn test_unreadable_top_is_embedded() {
        let host = ScriptedHost::with_links(FrameLink::Distinct, FrameLink::Missing);
        let ctx = detect(&host);
        assert!(ctx.embedded);
        assert_eq!(ctx.top, FrameLink::Missing);
        assert_eq!(ctx.parent, FrameLink::Distinct);
    }
}
