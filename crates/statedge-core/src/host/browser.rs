//! `web-sys` backed host for wasm builds

use js_sys::{Object, JSON};
use wasm_bindgen::JsValue;
use web_sys::Window;

use super::BrowsingContext;
use crate::error::HostFault;
use crate::message::NavigationMessage;
use crate::types::{Frame, FrameLink};

/// The page's own window
pub struct BrowserHost {
    window: Window,
}

impl BrowserHost {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// Host for the global `window`, if there is one
    pub fn current() -> Option<Self> {
        web_sys::window().map(Self::new)
    }

    fn frame(&self, frame: Frame) -> Result<Window, HostFault> {
        let related = match frame {
            Frame::Current => return Ok(self.window.clone()),
            Frame::Parent => self.window.parent(),
            Frame::Top => self.window.top(),
        };
        related
            .map_err(fault)?
            .ok_or_else(|| HostFault::new(format!("no {frame} frame reference")))
    }
}

fn fault(err: JsValue) -> HostFault {
    HostFault::new(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl BrowsingContext for BrowserHost {
    fn link(&self, frame: Frame) -> FrameLink {
        match self.frame(frame) {
            Ok(window) if Object::is(window.as_ref(), self.window.as_ref()) => {
                FrameLink::SameAsCurrent
            }
            Ok(_) => FrameLink::Distinct,
            Err(_) => FrameLink::Missing,
        }
    }

    fn open_in_new_context(&self, url: &str) -> Result<(), HostFault> {
        // A blocked popup returns null; that is indistinguishable from success here
        self.window
            .open_with_url_and_target(url, "_blank")
            .map(|_| ())
            .map_err(fault)
    }

    fn assign_location(&self, frame: Frame, url: &str) -> Result<(), HostFault> {
        self.frame(frame)?.location().set_href(url).map_err(fault)
    }

    fn post_message(
        &self,
        frame: Frame,
        message: &NavigationMessage,
        target_origin: &str,
    ) -> Result<(), HostFault> {
        let json = message
            .to_json()
            .map_err(|e| HostFault::new(e.to_string()))?;
        let payload = JSON::parse(&json).map_err(fault)?;
        self.frame(frame)?
            .post_message(&payload, target_origin)
            .map_err(fault)
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }
}
