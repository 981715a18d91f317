//! Background effect lifecycle
//!
//! # Design
//!
//! - One [`BackdropController`] per page, owning every container's slot
//! - A slot is `Pending` while setup awaits and `Live` once the renderer runs
//! - Every await in setup is followed by a generation check; a stale
//!   generation releases whatever was created and resolves to `None`
//! - Listener and frame callbacks hold `Weak` references, so a destroyed
//!   instance is never kept alive by the host
//! - No `RefCell` borrow is held across an await or a host callback

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use folio_hal::{
    ContainerId, FrameToken, Host, HostError, HostEvent, ListenTarget, ListenerToken, PixelSize,
};

use crate::config::{quality, EffectConfig, Palette};
use crate::frame::FrameState;
use crate::motion::AnimationClock;
use crate::render::{EffectRenderer, RenderBackend, RenderSetup};
use crate::scene::Scene;
use crate::settings::{BackdropSettings, ConfigError};
use crate::tier::{detect_tier, Tier};
use crate::variant::{remember_variant, resolve_variant, Variant, VariantSource};

/// Media query the instance follows for live reduced-motion changes
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Reference to a live effect
///
/// Stays valid until the effect is destroyed or its container remounted;
/// afterwards every operation taking it is a no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectHandle {
    container: ContainerId,
    generation: u64,
}

impl EffectHandle {
    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Runtime state behind an [`EffectHandle`]
struct EffectInstance<H: Host> {
    handle: EffectHandle,
    config: EffectConfig,
    surface: H::Surface,
    renderer: Box<dyn EffectRenderer>,
    frame: Option<FrameToken>,
    listeners: Vec<ListenerToken>,
    clock: AnimationClock,
    base_speed: f32,
    reduced_motion: bool,
    page_hidden: bool,
    in_view: bool,
    /// Surface size in device pixels
    size: PixelSize,
    mounted_at_ms: f64,
    /// Set once a frame has been drawn at full opacity
    faded_in: bool,
    needs_redraw: bool,
    destroyed: bool,
}

impl<H: Host> EffectInstance<H> {
    fn effective_speed(&self) -> f32 {
        if self.reduced_motion || self.page_hidden {
            0.0
        } else if !self.in_view {
            self.base_speed * self.config.offscreen_damp
        } else {
            self.base_speed
        }
    }
}

type SharedInstance<H> = Rc<RefCell<EffectInstance<H>>>;

enum Slot<H: Host> {
    Pending { generation: u64 },
    Live(SharedInstance<H>),
}

struct ControllerState<H: Host> {
    slots: BTreeMap<ContainerId, Slot<H>>,
    next_generation: u64,
}

/// Why setup stopped before going live
enum SetupError {
    /// The container was unmounted or remounted meanwhile
    Cancelled,
    Failed(HostError),
}

impl From<HostError> for SetupError {
    fn from(err: HostError) -> Self {
        SetupError::Failed(err)
    }
}

/// Mounts, drives and tears down background effects
pub struct BackdropController<H: Host> {
    host: Rc<H>,
    backend: Rc<dyn RenderBackend<H>>,
    settings: Rc<BackdropSettings>,
    palette: Rc<Palette>,
    state: Rc<RefCell<ControllerState<H>>>,
}

impl<H: Host> Clone for BackdropController<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
            backend: Rc::clone(&self.backend),
            settings: Rc::clone(&self.settings),
            palette: Rc::clone(&self.palette),
            state: Rc::clone(&self.state),
        }
    }
}

impl<H: Host> BackdropController<H> {
    /// Create a controller with validated settings
    pub fn new(
        host: Rc<H>,
        backend: Rc<dyn RenderBackend<H>>,
        settings: BackdropSettings,
    ) -> Result<Self, ConfigError> {
        let palette = settings.validate()?;
        Ok(Self {
            host,
            backend,
            settings: Rc::new(settings),
            palette: Rc::new(palette),
            state: Rc::new(RefCell::new(ControllerState {
                slots: BTreeMap::new(),
                next_generation: 1,
            })),
        })
    }

    /// Create a controller with default settings and the twilight palette
    pub fn with_defaults(host: Rc<H>, backend: Rc<dyn RenderBackend<H>>) -> Self {
        Self {
            host,
            backend,
            settings: Rc::new(BackdropSettings::default()),
            palette: Rc::new(Palette::twilight()),
            state: Rc::new(RefCell::new(ControllerState {
                slots: BTreeMap::new(),
                next_generation: 1,
            })),
        }
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn settings(&self) -> &BackdropSettings {
        &self.settings
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    // === Preferences ===

    /// Tier for the current device
    pub fn detect_tier(&self) -> Tier {
        detect_tier(&self.host.probe())
    }

    /// Variant the next mount would pick
    pub fn preferred_variant(&self) -> Variant {
        resolve_variant(&*self.host, &self.settings, self.detect_tier()).0
    }

    /// Validate and persist a user selection
    ///
    /// A storage failure only costs persistence; the variant is still returned
    /// so the caller can remount with it.
    pub fn select_variant(&self, id: &str) -> Result<Variant, ConfigError> {
        let variant =
            Variant::from_id(id).ok_or_else(|| ConfigError::UnknownVariant(id.to_string()))?;
        if let Err(err) = remember_variant(&*self.host, &self.settings, variant) {
            log::warn!("[backdrop] could not remember '{}': {}", variant.id(), err);
        }
        Ok(variant)
    }

    // === Lifecycle ===

    /// Mount an effect in `container`
    ///
    /// Returns the existing handle when the container is already live and
    /// `None` when setup is already pending, was cancelled, or failed. On
    /// failure the container shows the static gradient instead.
    pub async fn mount(&self, container: &ContainerId) -> Option<EffectHandle> {
        self.mount_with(container, None).await
    }

    /// Mount with an explicit variant, bypassing query and storage
    pub async fn mount_variant(
        &self,
        container: &ContainerId,
        variant: Variant,
    ) -> Option<EffectHandle> {
        self.mount_with(container, Some(variant)).await
    }

    async fn mount_with(
        &self,
        container: &ContainerId,
        choice: Option<Variant>,
    ) -> Option<EffectHandle> {
        let generation = {
            let mut state = self.state.borrow_mut();
            match state.slots.get(container) {
                Some(Slot::Live(instance)) => return Some(instance.borrow().handle.clone()),
                Some(Slot::Pending { .. }) => {
                    log::debug!("[backdrop] mount of '{}' already pending", container);
                    return None;
                }
                None => {}
            }
            let generation = state.next_generation;
            state.next_generation += 1;
            state
                .slots
                .insert(container.clone(), Slot::Pending { generation });
            generation
        };

        match self.setup(container, generation, choice).await {
            Ok(handle) => Some(handle),
            Err(SetupError::Cancelled) => {
                log::info!("[backdrop] setup for '{}' cancelled", container);
                None
            }
            Err(SetupError::Failed(err)) => {
                log::warn!("[backdrop] '{}' falls back to gradient: {}", container, err);
                if self.is_current(container, generation) {
                    self.state.borrow_mut().slots.remove(container);
                    self.host
                        .apply_fallback(container, &self.palette.gradient_css());
                }
                None
            }
        }
    }

    /// Set the base speed of a live effect, clamped to zero or above
    pub fn set_speed(&self, handle: &EffectHandle, value: f32) {
        let Some(instance) = self.live_instance(handle) else {
            log::debug!("[backdrop] set_speed on stale handle for '{}'", handle.container);
            return;
        };
        instance.borrow_mut().base_speed = if value.is_finite() { value.max(0.0) } else { 0.0 };
        update_loop(&self.host, &instance);
    }

    /// Tear down a live effect. Stale handles and repeated calls are ignored.
    pub fn destroy(&self, handle: &EffectHandle) {
        let instance = {
            let mut state = self.state.borrow_mut();
            match state.slots.get(&handle.container) {
                Some(Slot::Live(instance)) if instance.borrow().handle == *handle => {}
                _ => return,
            }
            match state.slots.remove(&handle.container) {
                Some(Slot::Live(instance)) => instance,
                _ => return,
            }
        };
        teardown(&*self.host, &instance);
    }

    /// Cancel pending setup or destroy the live effect in `container`
    pub fn unmount(&self, container: &ContainerId) {
        let slot = self.state.borrow_mut().slots.remove(container);
        match slot {
            Some(Slot::Pending { generation }) => {
                log::debug!("[backdrop] cancelling setup {} for '{}'", generation, container);
            }
            Some(Slot::Live(instance)) => teardown(&*self.host, &instance),
            None => {}
        }
    }

    /// Unmount every container
    pub fn shutdown(&self) {
        let containers: Vec<ContainerId> = self.state.borrow().slots.keys().cloned().collect();
        for container in &containers {
            self.unmount(container);
        }
    }

    // === Inspection ===

    /// Handle of the live effect in `container`
    pub fn handle(&self, container: &ContainerId) -> Option<EffectHandle> {
        match self.state.borrow().slots.get(container) {
            Some(Slot::Live(instance)) => Some(instance.borrow().handle.clone()),
            _ => None,
        }
    }

    pub fn is_live(&self, container: &ContainerId) -> bool {
        matches!(self.state.borrow().slots.get(container), Some(Slot::Live(_)))
    }

    pub fn is_pending(&self, container: &ContainerId) -> bool {
        matches!(
            self.state.borrow().slots.get(container),
            Some(Slot::Pending { .. })
        )
    }

    /// Number of live effects across all containers
    pub fn live_count(&self) -> usize {
        self.state
            .borrow()
            .slots
            .values()
            .filter(|slot| matches!(slot, Slot::Live(_)))
            .count()
    }

    /// Speed the frame loop currently advances at
    pub fn effective_speed(&self, handle: &EffectHandle) -> Option<f32> {
        self.live_instance(handle)
            .map(|instance| instance.borrow().effective_speed())
    }

    /// Configuration the effect was mounted with
    pub fn config(&self, handle: &EffectHandle) -> Option<EffectConfig> {
        self.live_instance(handle)
            .map(|instance| instance.borrow().config.clone())
    }

    /// Whether a frame is scheduled for the effect
    pub fn is_animating(&self, handle: &EffectHandle) -> bool {
        self.live_instance(handle)
            .is_some_and(|instance| instance.borrow().frame.is_some())
    }

    /// Animation time of the effect in seconds
    pub fn animation_time(&self, handle: &EffectHandle) -> Option<f32> {
        self.live_instance(handle)
            .map(|instance| instance.borrow().clock.time())
    }

    // === Setup ===

    async fn setup(
        &self,
        container: &ContainerId,
        generation: u64,
        choice: Option<Variant>,
    ) -> Result<EffectHandle, SetupError> {
        let caps = self.host.probe();
        let tier = detect_tier(&caps);
        let (variant, source) = match choice {
            Some(variant) => (variant, VariantSource::Selected),
            None => resolve_variant(&*self.host, &self.settings, tier),
        };
        let config = EffectConfig::derive(&caps, tier, variant, &self.settings, &self.palette);
        log::info!(
            "[backdrop] mounting '{}': tier={} variant={} ({:?}) quantity={} speed={}",
            container,
            tier.id(),
            variant.id(),
            source,
            config.quantity,
            config.speed
        );

        self.host.delay(self.settings.init_delay_ms).await;
        self.ensure_current(container, generation)?;

        let shader = if variant.needs_remote_shader() {
            Some(self.load_shader(container, generation).await?)
        } else {
            None
        };

        let css_size = self
            .host
            .container_size(container)
            .ok_or_else(|| HostError::ContainerNotFound(container.to_string()))?;
        let size = css_size.scaled(config.pixel_ratio);
        let surface = self.host.create_surface(container, size)?;

        let scene = match variant {
            Variant::Network => Scene::generate(
                config.node_count,
                config.connection_distance,
                self.host.random_seed(),
            ),
            Variant::Clouds | Variant::Geometry => Scene::default(),
        };
        let setup = RenderSetup {
            config: config.clone(),
            size,
            scene,
            shader,
        };
        let created = self.backend.create(&surface, setup).await;

        if let Err(cancelled) = self.ensure_current(container, generation) {
            if let Ok(mut renderer) = created {
                renderer.release();
            }
            self.host.detach_surface(&surface);
            return Err(cancelled);
        }
        let renderer = match created {
            Ok(renderer) => renderer,
            Err(err) => {
                self.host.detach_surface(&surface);
                return Err(err.into());
            }
        };

        let handle = EffectHandle {
            container: container.clone(),
            generation,
        };
        let instance = Rc::new(RefCell::new(EffectInstance {
            handle: handle.clone(),
            base_speed: quality(tier).speed,
            reduced_motion: config.reduced_motion,
            config,
            surface,
            renderer,
            frame: None,
            listeners: Vec::new(),
            clock: AnimationClock::new(),
            page_hidden: self.host.page_hidden(),
            in_view: true,
            size,
            mounted_at_ms: self.host.now_ms(),
            faded_in: false,
            needs_redraw: false,
            destroyed: false,
        }));

        let listeners = self.register_listeners(container, &instance);
        instance.borrow_mut().listeners = listeners;

        self.state
            .borrow_mut()
            .slots
            .insert(container.clone(), Slot::Live(Rc::clone(&instance)));
        self.host.clear_fallback(container);

        draw_now(&*self.host, &instance);
        update_loop(&self.host, &instance);
        log::info!("[backdrop] '{}' live (generation {})", container, generation);

        Ok(handle)
    }

    /// Fetch the cloud shader, falling through to each mirror in order
    async fn load_shader(
        &self,
        container: &ContainerId,
        generation: u64,
    ) -> Result<String, SetupError> {
        let mut last_error = HostError::AssetLoad("no shader sources".to_string());
        for (attempt, url) in self.settings.shader_sources().enumerate() {
            let result = self.host.fetch_text(url).await;
            self.ensure_current(container, generation)?;
            match result {
                Ok(source) if !source.trim().is_empty() => {
                    if attempt > 0 {
                        log::info!("[backdrop] shader loaded from mirror {}", url);
                    }
                    return Ok(source);
                }
                Ok(_) => {
                    log::warn!("[backdrop] shader source {} is empty", url);
                    last_error = HostError::AssetLoad(format!("{url}: empty"));
                }
                Err(err) => {
                    log::warn!("[backdrop] shader source {} failed: {}", url, err);
                    last_error = err;
                }
            }
        }
        Err(last_error.into())
    }

    fn register_listeners(
        &self,
        container: &ContainerId,
        instance: &SharedInstance<H>,
    ) -> Vec<ListenerToken> {
        let mut targets = vec![
            ListenTarget::Resize,
            ListenTarget::Visibility,
            ListenTarget::MediaQuery(REDUCED_MOTION_QUERY.to_string()),
        ];
        if self.settings.hero_only {
            targets.push(ListenTarget::Intersection {
                container: container.clone(),
                threshold: self.settings.intersection_threshold,
                root_margin: self.settings.root_margin.clone(),
            });
        }

        targets
            .into_iter()
            .map(|target| {
                let host = Rc::downgrade(&self.host);
                let weak = Rc::downgrade(instance);
                self.host.add_listener(
                    target,
                    Rc::new(move |event: &HostEvent| {
                        if let (Some(host), Some(instance)) = (host.upgrade(), weak.upgrade()) {
                            handle_event(&host, &instance, event);
                        }
                    }),
                )
            })
            .collect()
    }

    // === Internal ===

    fn is_current(&self, container: &ContainerId, generation: u64) -> bool {
        matches!(
            self.state.borrow().slots.get(container),
            Some(Slot::Pending { generation: g }) if *g == generation
        )
    }

    fn ensure_current(&self, container: &ContainerId, generation: u64) -> Result<(), SetupError> {
        if self.is_current(container, generation) {
            Ok(())
        } else {
            Err(SetupError::Cancelled)
        }
    }

    fn live_instance(&self, handle: &EffectHandle) -> Option<SharedInstance<H>> {
        match self.state.borrow().slots.get(&handle.container) {
            Some(Slot::Live(instance)) if instance.borrow().handle == *handle => {
                Some(Rc::clone(instance))
            }
            _ => None,
        }
    }
}

// === Frame loop ===

fn handle_event<H: Host>(host: &Rc<H>, instance: &SharedInstance<H>, event: &HostEvent) {
    {
        let mut inst = instance.borrow_mut();
        if inst.destroyed {
            return;
        }
        match *event {
            HostEvent::Resize { .. } => {
                if let Some(css_size) = host.container_size(&inst.handle.container) {
                    let size = css_size.scaled(inst.config.pixel_ratio);
                    if size != inst.size {
                        inst.size = size;
                        inst.renderer.resize(size);
                        inst.needs_redraw = true;
                    }
                }
            }
            HostEvent::Visibility { hidden } => inst.page_hidden = hidden,
            HostEvent::MediaQuery { matches } => inst.reduced_motion = matches,
            HostEvent::Intersection { visible, .. } => inst.in_view = visible,
        }
    }
    update_loop(host, instance);
}

/// Park the loop at zero speed, make sure a frame is queued otherwise
fn update_loop<H: Host>(host: &Rc<H>, instance: &SharedInstance<H>) {
    let (speed, scheduled, redraw) = {
        let inst = instance.borrow();
        if inst.destroyed {
            return;
        }
        let redraw = inst.needs_redraw || !inst.faded_in;
        (inst.effective_speed(), inst.frame.is_some(), redraw)
    };

    if speed > 0.0 {
        if !scheduled {
            schedule_frame(host, instance);
        }
        return;
    }

    let token = {
        let mut inst = instance.borrow_mut();
        inst.clock.pause();
        inst.frame.take()
    };
    if let Some(token) = token {
        host.cancel_frame(token);
        log::debug!("[backdrop] frame loop parked");
    }
    if redraw {
        draw_now(&**host, instance);
    }
}

fn schedule_frame<H: Host>(host: &Rc<H>, instance: &SharedInstance<H>) {
    let weak_host: Weak<H> = Rc::downgrade(host);
    let weak = Rc::downgrade(instance);
    let token = host.request_frame(Box::new(move |now_ms: f64| {
        if let (Some(host), Some(instance)) = (weak_host.upgrade(), weak.upgrade()) {
            on_frame(&host, &instance, now_ms);
        }
    }));
    instance.borrow_mut().frame = Some(token);
}

fn on_frame<H: Host>(host: &Rc<H>, instance: &SharedInstance<H>, now_ms: f64) {
    let keep_going = {
        let mut inst = instance.borrow_mut();
        if inst.destroyed {
            return;
        }
        inst.frame = None;
        let speed = inst.effective_speed();
        let time = inst.clock.advance(now_ms, speed);
        render(&mut *inst, time, now_ms);
        speed > 0.0
    };
    if keep_going {
        schedule_frame(host, instance);
    }
}

/// Draw once at the current animation time
fn draw_now<H: Host>(host: &H, instance: &SharedInstance<H>) {
    let now_ms = host.now_ms();
    let mut inst = instance.borrow_mut();
    if inst.destroyed {
        return;
    }
    let time = inst.clock.time();
    render(&mut *inst, time, now_ms);
}

fn render<H: Host>(inst: &mut EffectInstance<H>, time: f32, now_ms: f64) {
    let mut frame = FrameState::new(&inst.config, time, inst.size, now_ms - inst.mounted_at_ms);
    frame.pulse = !inst.reduced_motion;
    // Parked frames are held, so they show fully faded in
    if inst.faded_in || inst.effective_speed() <= 0.0 {
        frame.opacity = 1.0;
    }
    inst.faded_in = frame.opacity >= 1.0;
    inst.needs_redraw = false;
    if let Err(err) = inst.renderer.draw(&frame) {
        log::debug!("[backdrop] skipped frame: {}", err);
    }
}

/// Frame loop, then listeners, then GPU resources, then the surface
fn teardown<H: Host>(host: &H, instance: &SharedInstance<H>) {
    let mut inst = instance.borrow_mut();
    if inst.destroyed {
        return;
    }
    inst.destroyed = true;
    if let Some(token) = inst.frame.take() {
        host.cancel_frame(token);
    }
    for token in inst.listeners.drain(..) {
        host.remove_listener(token);
    }
    inst.renderer.release();
    host.detach_surface(&inst.surface);
    log::info!("[backdrop] '{}' destroyed", inst.handle.container);
}
