//! Plain data exchanged across the host boundary

use std::fmt;
use std::rc::Rc;

/// Identifier of a DOM element that hosts a rendering surface
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContainerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Size of a surface or container in whole pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scale CSS pixels to device pixels, never collapsing below 1x1
    pub fn scaled(self, pixel_ratio: f32) -> Self {
        let scale = |v: u32| ((v as f32 * pixel_ratio).round() as u32).max(1);
        Self {
            width: scale(self.width),
            height: scale(self.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Best-effort device capability flags
///
/// Every field is optional: a signal the platform cannot provide is `None`,
/// never an error.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Capabilities {
    /// `window.innerWidth` in CSS pixels
    pub viewport_width: Option<f64>,
    /// `window.innerHeight` in CSS pixels
    pub viewport_height: Option<f64>,
    /// `window.devicePixelRatio`
    pub device_pixel_ratio: Option<f64>,
    /// `navigator.userAgent`
    pub user_agent: Option<String>,
    /// `(prefers-reduced-motion: reduce)` media query result
    pub prefers_reduced_motion: Option<bool>,
    /// `performance.memory.jsHeapSizeLimit` where the engine exposes it
    pub heap_limit_bytes: Option<u64>,
}

/// Sources a host can deliver events from
#[derive(Clone, Debug, PartialEq)]
pub enum ListenTarget {
    /// Window resize
    Resize,
    /// Document visibility change
    Visibility,
    /// Change in a media query's match state
    MediaQuery(String),
    /// Container entering or leaving the viewport
    Intersection {
        container: ContainerId,
        threshold: f64,
        root_margin: String,
    },
}

/// Event payloads delivered to listener callbacks
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    Resize { width: f64, height: f64 },
    Visibility { hidden: bool },
    MediaQuery { matches: bool },
    Intersection { visible: bool, ratio: f64 },
}

/// Listener callback. Shared so a host can invoke it without holding its own borrows.
pub type EventCallback = Rc<dyn Fn(&HostEvent)>;

/// One-shot animation frame callback receiving a timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Registration handle for an event listener
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerToken(pub u64);

/// Registration handle for a pending animation frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_size_scaled() {
        let size = PixelSize::new(1280, 720);
        assert_eq!(size.scaled(1.5), PixelSize::new(1920, 1080));
        assert_eq!(size.scaled(1.0), size);
    }

    #[test]
    fn test_pixel_size_scaled_never_zero() {
        let size = PixelSize::new(1, 1);
        assert_eq!(size.scaled(0.1), PixelSize::new(1, 1));
    }

    #[test]
    fn test_pixel_size_empty() {
        assert!(PixelSize::new(0, 100).is_empty());
        assert!(!PixelSize::new(10, 10).is_empty());
    }

    #[test]
    fn test_container_id_display() {
        let id = ContainerId::from("backdrop");
        assert_eq!(id.to_string(), "backdrop");
        assert_eq!(id.as_str(), "backdrop");
    }

    #[test]
    fn test_capabilities_default_is_empty() {
        let caps = Capabilities::default();
        assert!(caps.viewport_width.is_none());
        assert!(caps.user_agent.is_none());
        assert!(caps.heap_limit_bytes.is_none());
    }
}
