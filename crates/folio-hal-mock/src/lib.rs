//! Mock host implementation for testing Folio
//!
//! This provides an in-memory implementation of the [`Host`] trait so the
//! backdrop controller and page wiring can be unit tested without a browser.
//! Frames and events never fire on their own: tests drive them explicitly
//! with [`MockHost::run_frame`] and [`MockHost::fire_event`].

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use folio_hal::{
    Capabilities, ContainerId, EventCallback, FrameCallback, FrameToken, Host, HostError,
    HostEvent, ListenTarget, ListenerToken, LocalFuture, PixelSize,
};

/// Surface handle handed out by [`MockHost`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockSurface {
    pub id: u64,
    pub container: ContainerId,
    pub size: PixelSize,
}

/// Hooks run when an asynchronous host future is first polled
type FetchHook = Rc<dyn Fn(&str)>;
type DelayHook = Rc<dyn Fn(u32)>;

/// Mock host for unit testing
///
/// Provides simulated surfaces, frames, listeners, storage and asset loading
/// with counters tests can assert on.
pub struct MockHost {
    /// Capabilities returned by `probe`
    capabilities: RefCell<Capabilities>,
    /// Simulated `document.hidden`
    hidden: Cell<bool>,
    /// Simulated time in milliseconds
    time: Cell<f64>,
    /// Seed returned by `random_seed`
    seed: Cell<u64>,
    /// Known containers and their CSS pixel sizes
    containers: RefCell<BTreeMap<ContainerId, PixelSize>>,
    /// Surfaces currently attached to the document
    surfaces: RefCell<BTreeMap<u64, MockSurface>>,
    /// Total surfaces ever created
    surfaces_created: Cell<u64>,
    /// Make `create_surface` fail
    fail_surfaces: Cell<bool>,
    /// Container id -> fallback CSS
    fallbacks: RefCell<BTreeMap<ContainerId, String>>,
    /// Pending frame callbacks
    frames: RefCell<BTreeMap<u64, FrameCallback>>,
    /// Registered listeners
    listeners: RefCell<BTreeMap<u64, (ListenTarget, EventCallback)>>,
    /// Next token for frames and listeners
    next_token: Cell<u64>,
    /// Canned fetch responses per URL
    responses: RefCell<BTreeMap<String, Result<String, HostError>>>,
    /// URLs requested, in order
    fetched: RefCell<Vec<String>>,
    fetch_hook: RefCell<Option<FetchHook>>,
    delay_hook: RefCell<Option<DelayHook>>,
    /// Delays requested, in order
    delays: RefCell<Vec<u32>>,
    storage: RefCell<BTreeMap<String, String>>,
    fail_storage: Cell<bool>,
    query: RefCell<BTreeMap<String, String>>,
    /// Reported analytics events
    reports: RefCell<Vec<String>>,
    /// Captured host activity
    log: RefCell<Vec<String>>,
}

impl MockHost {
    /// Create a mock host with a 1280x800 desktop viewport and no containers
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities {
            viewport_width: Some(1280.0),
            viewport_height: Some(800.0),
            device_pixel_ratio: Some(1.0),
            user_agent: Some("Mozilla/5.0 (X11; Linux x86_64)".to_string()),
            prefers_reduced_motion: Some(false),
            heap_limit_bytes: None,
        })
    }

    /// Create a mock host reporting the given capabilities
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities: RefCell::new(capabilities),
            hidden: Cell::new(false),
            time: Cell::new(0.0),
            seed: Cell::new(12345),
            containers: RefCell::new(BTreeMap::new()),
            surfaces: RefCell::new(BTreeMap::new()),
            surfaces_created: Cell::new(0),
            fail_surfaces: Cell::new(false),
            fallbacks: RefCell::new(BTreeMap::new()),
            frames: RefCell::new(BTreeMap::new()),
            listeners: RefCell::new(BTreeMap::new()),
            next_token: Cell::new(1),
            responses: RefCell::new(BTreeMap::new()),
            fetched: RefCell::new(Vec::new()),
            fetch_hook: RefCell::new(None),
            delay_hook: RefCell::new(None),
            delays: RefCell::new(Vec::new()),
            storage: RefCell::new(BTreeMap::new()),
            fail_storage: Cell::new(false),
            query: RefCell::new(BTreeMap::new()),
            reports: RefCell::new(Vec::new()),
            log: RefCell::new(Vec::new()),
        }
    }

    fn next_token(&self) -> u64 {
        let token = self.next_token.get();
        self.next_token.set(token + 1);
        token
    }

    fn record(&self, msg: String) {
        self.log.borrow_mut().push(msg);
    }

    // === Setup ===

    /// Register a container element with a CSS pixel size
    pub fn add_container(&self, id: impl Into<ContainerId>, size: PixelSize) {
        self.containers.borrow_mut().insert(id.into(), size);
    }

    /// Replace the probed capabilities
    pub fn set_capabilities(&self, capabilities: Capabilities) {
        *self.capabilities.borrow_mut() = capabilities;
    }

    /// Set `document.hidden` without firing an event
    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    /// Make subsequent `create_surface` calls fail
    pub fn fail_surfaces(&self, fail: bool) {
        self.fail_surfaces.set(fail);
    }

    /// Make subsequent `storage_set` calls fail
    pub fn fail_storage(&self, fail: bool) {
        self.fail_storage.set(fail);
    }

    /// Set the response for a URL. Unknown URLs fail with `AssetLoad`.
    pub fn set_fetch_response(&self, url: &str, response: Result<String, HostError>) {
        self.responses.borrow_mut().insert(url.to_string(), response);
    }

    /// Run `hook` with the URL when a fetch future is polled
    pub fn on_fetch(&self, hook: impl Fn(&str) + 'static) {
        *self.fetch_hook.borrow_mut() = Some(Rc::new(hook));
    }

    /// Run `hook` with the duration when a delay future is polled
    pub fn on_delay(&self, hook: impl Fn(u32) + 'static) {
        *self.delay_hook.borrow_mut() = Some(Rc::new(hook));
    }

    /// Remove fetch and delay hooks
    pub fn clear_hooks(&self) {
        self.fetch_hook.borrow_mut().take();
        self.delay_hook.borrow_mut().take();
    }

    pub fn set_query_param(&self, key: &str, value: &str) {
        self.query.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn set_time(&self, ms: f64) {
        self.time.set(ms);
    }

    pub fn advance_time(&self, ms: f64) {
        self.time.set(self.time.get() + ms);
    }

    pub fn set_random_seed(&self, seed: u64) {
        self.seed.set(seed);
    }

    // === Driving ===

    /// Run every pending frame callback with the current time
    ///
    /// Callbacks requested while running are queued for the next call.
    /// Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let now = self.time.get();
        let pending = std::mem::take(&mut *self.frames.borrow_mut());
        let count = pending.len();
        for (_, callback) in pending {
            callback(now);
        }
        count
    }

    /// Deliver an event to every listener registered for its source
    ///
    /// Visibility events also update `document.hidden`. Returns the number
    /// of listeners invoked.
    pub fn fire_event(&self, event: HostEvent) -> usize {
        if let HostEvent::Visibility { hidden } = event {
            self.hidden.set(hidden);
        }
        if let HostEvent::Resize { width, height } = event {
            let mut caps = self.capabilities.borrow_mut();
            caps.viewport_width = Some(width);
            caps.viewport_height = Some(height);
        }
        if let HostEvent::MediaQuery { matches } = event {
            self.capabilities.borrow_mut().prefers_reduced_motion = Some(matches);
        }

        let callbacks: Vec<EventCallback> = self
            .listeners
            .borrow()
            .values()
            .filter(|(target, _)| target_accepts(target, &event))
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in &callbacks {
            callback(&event);
        }
        callbacks.len()
    }

    // === Inspection ===

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Registered listener targets, in registration order
    pub fn listener_targets(&self) -> Vec<ListenTarget> {
        self.listeners
            .borrow()
            .values()
            .map(|(target, _)| target.clone())
            .collect()
    }

    /// Number of pending frame callbacks
    pub fn frame_pending_count(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Number of surfaces currently attached to a container
    pub fn attached_surface_count(&self, container: &ContainerId) -> usize {
        self.surfaces
            .borrow()
            .values()
            .filter(|s| &s.container == container)
            .count()
    }

    /// Number of surfaces attached anywhere
    pub fn total_attached_surfaces(&self) -> usize {
        self.surfaces.borrow().len()
    }

    /// Total surfaces ever created
    pub fn surfaces_created(&self) -> u64 {
        self.surfaces_created.get()
    }

    /// Fallback CSS applied to a container, if any
    pub fn fallback(&self, container: &ContainerId) -> Option<String> {
        self.fallbacks.borrow().get(container).cloned()
    }

    /// URLs fetched, in order
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }

    /// Delays requested, in order
    pub fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }

    /// Read a storage value without going through the trait
    pub fn stored(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    /// Analytics events reported so far
    pub fn reports(&self) -> Vec<String> {
        self.reports.borrow().clone()
    }

    /// Captured host activity
    pub fn get_log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    /// Check if a specific activity was recorded
    pub fn has_log_containing(&self, substr: &str) -> bool {
        self.log.borrow().iter().any(|msg| msg.contains(substr))
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

fn target_accepts(target: &ListenTarget, event: &HostEvent) -> bool {
    matches!(
        (target, event),
        (ListenTarget::Resize, HostEvent::Resize { .. })
            | (ListenTarget::Visibility, HostEvent::Visibility { .. })
            | (ListenTarget::MediaQuery(_), HostEvent::MediaQuery { .. })
            | (ListenTarget::Intersection { .. }, HostEvent::Intersection { .. })
    )
}

impl Host for MockHost {
    type Surface = MockSurface;

    fn probe(&self) -> Capabilities {
        self.capabilities.borrow().clone()
    }

    fn page_hidden(&self) -> bool {
        self.hidden.get()
    }

    fn container_size(&self, container: &ContainerId) -> Option<PixelSize> {
        self.containers.borrow().get(container).copied()
    }

    fn create_surface(
        &self,
        container: &ContainerId,
        size: PixelSize,
    ) -> Result<Self::Surface, HostError> {
        if !self.containers.borrow().contains_key(container) {
            return Err(HostError::ContainerNotFound(container.to_string()));
        }
        if self.fail_surfaces.get() {
            return Err(HostError::Surface("mock surface failure".to_string()));
        }

        let id = self.surfaces_created.get() + 1;
        self.surfaces_created.set(id);
        let surface = MockSurface {
            id,
            container: container.clone(),
            size,
        };
        self.surfaces.borrow_mut().insert(id, surface.clone());
        self.record(format!(
            "[mock-host] attached surface {} to '{}' ({}x{})",
            id, container, size.width, size.height
        ));
        Ok(surface)
    }

    fn detach_surface(&self, surface: &Self::Surface) {
        if self.surfaces.borrow_mut().remove(&surface.id).is_some() {
            self.record(format!("[mock-host] detached surface {}", surface.id));
        }
    }

    fn apply_fallback(&self, container: &ContainerId, css_background: &str) {
        self.fallbacks
            .borrow_mut()
            .insert(container.clone(), css_background.to_string());
        self.record(format!("[mock-host] fallback on '{}'", container));
    }

    fn clear_fallback(&self, container: &ContainerId) {
        self.fallbacks.borrow_mut().remove(container);
    }

    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        let token = self.next_token();
        self.frames.borrow_mut().insert(token, callback);
        FrameToken(token)
    }

    fn cancel_frame(&self, token: FrameToken) {
        self.frames.borrow_mut().remove(&token.0);
    }

    fn add_listener(&self, target: ListenTarget, callback: EventCallback) -> ListenerToken {
        let token = self.next_token();
        self.record(format!("[mock-host] listener {} added for {:?}", token, target));
        self.listeners.borrow_mut().insert(token, (target, callback));
        ListenerToken(token)
    }

    fn remove_listener(&self, token: ListenerToken) {
        if self.listeners.borrow_mut().remove(&token.0).is_some() {
            self.record(format!("[mock-host] listener {} removed", token.0));
        }
    }

    fn fetch_text(&self, url: &str) -> LocalFuture<Result<String, HostError>> {
        let url = url.to_string();
        self.fetched.borrow_mut().push(url.clone());
        let response = self
            .responses
            .borrow()
            .get(&url)
            .cloned()
            .unwrap_or_else(|| Err(HostError::AssetLoad(url.clone())));
        let hook = self.fetch_hook.borrow().clone();
        Box::pin(async move {
            if let Some(hook) = hook {
                hook(&url);
            }
            response
        })
    }

    fn delay(&self, ms: u32) -> LocalFuture<()> {
        self.delays.borrow_mut().push(ms);
        let hook = self.delay_hook.borrow().clone();
        Box::pin(async move {
            if let Some(hook) = hook {
                hook(ms);
            }
        })
    }

    fn now_ms(&self) -> f64 {
        self.time.get()
    }

    fn random_seed(&self) -> u64 {
        self.seed.get()
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.storage.borrow().get(key).cloned()
    }

    fn storage_set(&self, key: &str, value: &str) -> Result<(), HostError> {
        if self.fail_storage.get() {
            return Err(HostError::Storage("quota exceeded".to_string()));
        }
        self.storage
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn query_param(&self, key: &str) -> Option<String> {
        self.query.borrow().get(key).cloned()
    }

    fn report(&self, event: &str) {
        self.reports.borrow_mut().push(event.to_string());
    }
}
