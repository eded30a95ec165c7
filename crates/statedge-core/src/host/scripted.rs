//! In-memory host with a scripted frame topology

use std::cell::RefCell;
use std::fmt;
use std::str::FromStr;

use super::BrowsingContext;
use crate::error::HostFault;
use crate::message::NavigationMessage;
use crate::types::{Frame, FrameLink};

/// Frame arrangements the scripted host can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTopology {
    /// Top-level page
    Standalone,
    /// One iframe level, same origin as the host page
    SameOrigin,
    /// One iframe level, cross-origin: every direct assignment throws
    CrossOrigin,
    /// Inside a sandboxed middle frame: parent throws, top accepts
    Nested,
    /// Embedded, but neither parent nor top is readable
    Orphaned,
}

impl FrameTopology {
    pub const ALL: [FrameTopology; 5] = [
        FrameTopology::Standalone,
        FrameTopology::SameOrigin,
        FrameTopology::CrossOrigin,
        FrameTopology::Nested,
        FrameTopology::Orphaned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FrameTopology::Standalone => "standalone",
            FrameTopology::SameOrigin => "same-origin",
            FrameTopology::CrossOrigin => "cross-origin",
            FrameTopology::Nested => "nested",
            FrameTopology::Orphaned => "orphaned",
        }
    }
}

impl fmt::Display for FrameTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameTopology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrameTopology::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown frame topology '{s}' \
                     (expected standalone, same-origin, cross-origin, nested or orphaned)"
                )
            })
    }
}

/// A host operation the scripted host accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    OpenInNewContext {
        url: String,
    },
    Assign {
        frame: Frame,
        url: String,
    },
    PostMessage {
        frame: Frame,
        message: NavigationMessage,
        target_origin: String,
    },
    Alert {
        message: String,
    },
}

/// Scripted [`BrowsingContext`] recording every accepted call
#[derive(Debug)]
pub struct ScriptedHost {
    parent: FrameLink,
    top: FrameLink,
    blocked: Vec<Frame>,
    reject_messages: bool,
    calls: RefCell<Vec<HostCall>>,
}

impl ScriptedHost {
    pub fn new(topology: FrameTopology) -> Self {
        let (parent, top, blocked) = match topology {
            FrameTopology::Standalone => {
                (FrameLink::SameAsCurrent, FrameLink::SameAsCurrent, vec![])
            }
            FrameTopology::SameOrigin => (FrameLink::Distinct, FrameLink::Distinct, vec![]),
            FrameTopology::CrossOrigin => (
                FrameLink::Distinct,
                FrameLink::Distinct,
                vec![Frame::Parent, Frame::Top],
            ),
            FrameTopology::Nested => {
                (FrameLink::Distinct, FrameLink::Distinct, vec![Frame::Parent])
            }
            FrameTopology::Orphaned => (FrameLink::Missing, FrameLink::Missing, vec![]),
        };

        Self {
            parent,
            top,
            blocked,
            reject_messages: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Arbitrary links, nothing blocked
    pub fn with_links(parent: FrameLink, top: FrameLink) -> Self {
        Self {
            parent,
            top,
            blocked: Vec::new(),
            reject_messages: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Make location assignment on `frame` throw a security error
    pub fn block_assign(mut self, frame: Frame) -> Self {
        if !self.blocked.contains(&frame) {
            self.blocked.push(frame);
        }
        self
    }

    /// Make `post_message` throw
    pub fn reject_messages(mut self) -> Self {
        self.reject_messages = true;
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Navigation calls only, alerts excluded
    pub fn navigations(&self) -> Vec<HostCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| !matches!(c, HostCall::Alert { .. }))
            .cloned()
            .collect()
    }

    fn push(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }

    fn require(&self, frame: Frame) -> Result<(), HostFault> {
        match self.link(frame) {
            FrameLink::Missing => Err(HostFault::new(format!("no {frame} frame reference"))),
            _ => Ok(()),
        }
    }
}

impl BrowsingContext for ScriptedHost {
    fn link(&self, frame: Frame) -> FrameLink {
        match frame {
            Frame::Current => FrameLink::SameAsCurrent,
            Frame::Parent => self.parent,
            Frame::Top => self.top,
        }
    }

    fn open_in_new_context(&self, url: &str) -> Result<(), HostFault> {
        self.push(HostCall::OpenInNewContext {
            url: url.to_string(),
        });
        Ok(())
    }

    fn assign_location(&self, frame: Frame, url: &str) -> Result<(), HostFault> {
        self.require(frame)?;
        if self.blocked.contains(&frame) {
            return Err(HostFault::security("accessing"));
        }
        self.push(HostCall::Assign {
            frame,
            url: url.to_string(),
        });
        Ok(())
    }

    fn post_message(
        &self,
        frame: Frame,
        message: &NavigationMessage,
        target_origin: &str,
    ) -> Result<(), HostFault> {
        self.require(frame)?;
        if self.reject_messages {
            return Err(HostFault::new("DataCloneError: message could not be cloned"));
        }
        self.push(HostCall::PostMessage {
            frame,
            message: message.clone(),
            target_origin: target_origin.to_string(),
        });
        Ok(())
    }

    fn alert(&self, message: &str) {
        self.push(HostCall::Alert {
            message: message.to_string(),
        });
    }
}
