//! Host Abstraction Layer for Folio
//!
//! This crate defines the [`Host`] trait that lets the portfolio engine run
//! against a real browser (via web-sys) or an in-memory mock in tests, by
//! abstracting every ambient capability the engine touches.
//!
//! # Platform Implementations
//!
//! - **Browser**: `folio-web`'s `WebHost` (web-sys, `requestAnimationFrame`,
//!   `IntersectionObserver`, `localStorage`, `fetch`)
//! - **Tests**: `folio-hal-mock`'s `MockHost`
//!
//! # Contracts
//!
//! - [`Host::probe`] returns best-effort flags and never fails
//! - [`Host::fetch_text`] resolves to `Err(HostError::AssetLoad)` when the
//!   asset is unreachable
//! - [`Host::report`] is fire-and-forget and never blocks navigation

mod error;
mod types;

use std::future::Future;
use std::pin::Pin;

pub use error::HostError;
pub use types::{
    Capabilities, ContainerId, EventCallback, FrameCallback, FrameToken, HostEvent,
    ListenTarget, ListenerToken, PixelSize,
};

/// Boxed single-threaded future returned by asynchronous host operations
pub type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Host Abstraction Layer trait
///
/// Implementations provide platform-specific functionality for:
/// - Device capability probing
/// - Rendering surface lifecycle
/// - Animation frames and event listeners
/// - Remote asset loading and timers
/// - Client-local storage and query parameters
/// - Analytics reporting
///
/// Everything runs on the single UI thread, so there are no `Send` bounds.
///
/// # Associated Types
///
/// - `Surface`: platform handle to a rendering surface
///   - In the browser: an `HtmlCanvasElement` appended to the container
///   - In tests: a numbered mock surface
pub trait Host: 'static {
    /// Handle to a rendering surface attached to a container
    type Surface: Clone + 'static;

    // === Capabilities ===

    /// Read viewport, pixel density, user agent, reduced-motion and heap hints
    fn probe(&self) -> Capabilities;

    /// Whether the page is currently hidden (`document.hidden`)
    fn page_hidden(&self) -> bool;

    // === Surfaces ===

    /// Current size of a container in CSS pixels
    fn container_size(&self, container: &ContainerId) -> Option<PixelSize>;

    /// Create a surface with the given device-pixel size and attach it to a container
    ///
    /// # Returns
    /// * `Ok(Surface)` - surface attached as the container's child
    /// * `Err(HostError::ContainerNotFound)` - no such element
    /// * `Err(HostError::Surface)` - element could not be created
    fn create_surface(
        &self,
        container: &ContainerId,
        size: PixelSize,
    ) -> Result<Self::Surface, HostError>;

    /// Detach a surface from the document. Detaching twice is a no-op.
    fn detach_surface(&self, surface: &Self::Surface);

    /// Paint a static CSS background on the container in place of an effect
    fn apply_fallback(&self, container: &ContainerId, css_background: &str);

    /// Remove a previously applied fallback
    fn clear_fallback(&self, container: &ContainerId);

    // === Frames & Events ===

    /// Schedule a one-shot callback for the next animation frame
    fn request_frame(&self, callback: FrameCallback) -> FrameToken;

    /// Cancel a pending frame. Unknown or already-fired tokens are ignored.
    fn cancel_frame(&self, token: FrameToken);

    /// Register a listener
    fn add_listener(&self, target: ListenTarget, callback: EventCallback) -> ListenerToken;

    /// Remove a listener. Unknown tokens are ignored.
    fn remove_listener(&self, token: ListenerToken);

    // === Async ===

    /// Fetch a text asset
    fn fetch_text(&self, url: &str) -> LocalFuture<Result<String, HostError>>;

    /// Resolve after the given number of milliseconds
    fn delay(&self, ms: u32) -> LocalFuture<()>;

    // === Time & Entropy ===

    /// Monotonic time in milliseconds (`performance.now()` in the browser)
    fn now_ms(&self) -> f64;

    /// Seed for decorative randomness
    fn random_seed(&self) -> u64;

    // === Preferences ===

    /// Read a value from client-local storage
    fn storage_get(&self, key: &str) -> Option<String>;

    /// Write a value to client-local storage
    fn storage_set(&self, key: &str, value: &str) -> Result<(), HostError>;

    /// Read a query parameter from the page URL
    fn query_param(&self, key: &str) -> Option<String>;

    // === Analytics ===

    /// Report a named interaction. Fire-and-forget.
    fn report(&self, event: &str);
}
