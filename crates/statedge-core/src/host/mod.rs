//! Browsing-context host seam
//!
//! The dispatcher never touches a window directly. Everything it needs from
//! the ambient page (frame identity, location assignment, opening a new
//! context, posting a message, a developer alert) goes through
//! [`BrowsingContext`], so the strategy chain runs the same against a real
//! browser window and a scripted one.

#[cfg(feature = "browser")]
mod browser;
mod scripted;

#[cfg(feature = "browser")]
pub use browser::BrowserHost;
pub use scripted::{FrameTopology, HostCall, ScriptedHost};

use crate::error::HostFault;
use crate::message::NavigationMessage;
use crate::types::{Frame, FrameLink};

pub trait BrowsingContext {
    /// Reachability of a related context. `Frame::Current` is always
    /// `SameAsCurrent`.
    fn link(&self, frame: Frame) -> FrameLink;

    /// Ask the browser to open `url` in a new context (`_blank`)
    fn open_in_new_context(&self, url: &str) -> Result<(), HostFault>;

    /// Assign `url` to the location of `frame`
    fn assign_location(&self, frame: Frame, url: &str) -> Result<(), HostFault>;

    /// Post `message` to `frame`. Success means accepted for delivery only.
    fn post_message(
        &self,
        frame: Frame,
        message: &NavigationMessage,
        target_origin: &str,
    ) -> Result<(), HostFault>;

    /// Developer-visible alert; hosts without one ignore it
    fn alert(&self, _message: &str) {}
}
