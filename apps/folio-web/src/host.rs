//! Browser implementation of the host abstraction
//!
//! Wraps `window`/`document` via web-sys. Every JS closure handed to the
//! browser is owned by [`WebHost`] and dropped when its registration ends;
//! a closure is never dropped while it may still be running, so removed
//! registrations are parked and freed from a zero-delay timeout.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use folio_hal::{
    Capabilities, ContainerId, EventCallback, FrameCallback, FrameToken, Host, HostError,
    HostEvent, ListenTarget, ListenerToken, LocalFuture, PixelSize,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MediaQueryListEvent, Request,
    RequestInit, RequestMode, Response, Window,
};

use folio_backdrop::REDUCED_MOTION_QUERY;

/// Class set on a container while it shows the static fallback
pub const FALLBACK_CLASS: &str = "backdrop--fallback";

type FrameClosure = Closure<dyn FnMut(f64)>;
type EventClosure = Closure<dyn FnMut(Event)>;
type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

enum Registration {
    Event {
        target: EventTarget,
        kind: &'static str,
        closure: EventClosure,
    },
    Observer {
        observer: IntersectionObserver,
        _closure: ObserverClosure,
    },
}

impl Registration {
    fn detach(&self) {
        match self {
            Registration::Event {
                target,
                kind,
                closure,
            } => {
                let callback = closure.as_ref().unchecked_ref();
                if let Err(err) = target.remove_event_listener_with_callback(kind, callback) {
                    log::debug!("[host] remove listener '{}' failed: {:?}", kind, err);
                }
            }
            Registration::Observer { observer, .. } => observer.disconnect(),
        }
    }
}

/// Closures released by the page but possibly still on the JS stack
enum Retired {
    Frame(FrameClosure),
    Listener(Registration),
}

#[derive(Default)]
struct HostState {
    next_token: u64,
    frames: BTreeMap<u64, (i32, FrameClosure)>,
    listeners: BTreeMap<u64, Registration>,
    retired: Vec<Retired>,
    drain_scheduled: bool,
}

impl HostState {
    fn next_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }
}

/// Park a released closure and make sure a drain is queued
///
/// The drain runs from its own timeout task, so nothing parked is on the
/// JS stack by then.
fn retire(state: &Rc<RefCell<HostState>>, item: Retired) {
    {
        let mut guard = state.borrow_mut();
        guard.retired.push(item);
        if guard.drain_scheduled {
            return;
        }
        guard.drain_scheduled = true;
    }

    let weak = Rc::downgrade(state);
    let drain = Closure::once_into_js(move || {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let retired = {
            let mut guard = state.borrow_mut();
            guard.drain_scheduled = false;
            std::mem::take(&mut guard.retired)
        };
        log::debug!("[host] freed {} released closures", retired.len());
    });

    let scheduled = web_sys::window().is_some_and(|window| {
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(drain.unchecked_ref(), 0)
            .is_ok()
    });
    if !scheduled {
        log::debug!("[host] could not schedule closure drain");
        state.borrow_mut().drain_scheduled = false;
    }
}

/// Host backed by the browser window
pub struct WebHost {
    window: Window,
    document: Document,
    state: Rc<RefCell<HostState>>,
}

impl WebHost {
    pub fn new() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::NotSupported)?;
        let document = window.document().ok_or(HostError::NotSupported)?;
        Ok(Self {
            window,
            document,
            state: Rc::new(RefCell::new(HostState::default())),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Released closures not yet freed
    pub fn retired_count(&self) -> usize {
        self.state.borrow().retired.len()
    }

    fn element(&self, container: &ContainerId) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(container.as_str())
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn reduced_motion(&self) -> Option<bool> {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .map(|mql| mql.matches())
    }

    /// `performance.memory.jsHeapSizeLimit`, Chromium only
    fn heap_limit(&self) -> Option<u64> {
        let performance = self.window.performance()?;
        let memory = js_sys::Reflect::get(&performance, &"memory".into()).ok()?;
        if memory.is_undefined() {
            return None;
        }
        js_sys::Reflect::get(&memory, &"jsHeapSizeLimit".into())
            .ok()?
            .as_f64()
            .map(|v| v as u64)
    }

    fn register(&self, registration: Option<Registration>) -> ListenerToken {
        let mut state = self.state.borrow_mut();
        let token = state.next_token();
        if let Some(registration) = registration {
            state.listeners.insert(token, registration);
        }
        ListenerToken(token)
    }

    fn event_listener(
        &self,
        target: EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Registration> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        match target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Registration::Event {
                target,
                kind,
                closure,
            }),
            Err(err) => {
                log::warn!("[host] could not listen for '{}': {:?}", kind, err);
                None
            }
        }
    }

    fn intersection_listener(
        &self,
        container: &ContainerId,
        threshold: f64,
        root_margin: &str,
        callback: EventCallback,
    ) -> Option<Registration> {
        let element = self.document.get_element_by_id(container.as_str())?;
        let closure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    callback(&HostEvent::Intersection {
                        visible: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    });
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(root_margin);
        match IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(&element);
                Some(Registration::Observer {
                    observer,
                    _closure: closure,
                })
            }
            Err(err) => {
                log::warn!("[host] IntersectionObserver unavailable: {:?}", err);
                None
            }
        }
    }
}

async fn fetch_text(window: Window, url: String) -> Result<String, HostError> {
    let fail = |what: &str| HostError::AssetLoad(format!("{url}: {what}"));

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_mode(RequestMode::Cors);
    let request = Request::new_with_str_and_init(&url, &init).map_err(|_| fail("bad request"))?;

    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| fail("network error"))?;
    let response: Response = response.dyn_into().map_err(|_| fail("not a response"))?;
    if !response.ok() {
        return Err(fail(&format!("status {}", response.status())));
    }

    let text = response.text().map_err(|_| fail("unreadable body"))?;
    JsFuture::from(text)
        .await
        .map_err(|_| fail("unreadable body"))?
        .as_string()
        .ok_or_else(|| fail("body is not text"))
}

impl Host for WebHost {
    type Surface = HtmlCanvasElement;

    // === Capabilities ===

    fn probe(&self) -> Capabilities {
        Capabilities {
            viewport_width: self.window.inner_width().ok().and_then(|v| v.as_f64()),
            viewport_height: self.window.inner_height().ok().and_then(|v| v.as_f64()),
            device_pixel_ratio: Some(self.window.device_pixel_ratio()),
            user_agent: self.window.navigator().user_agent().ok(),
            prefers_reduced_motion: self.reduced_motion(),
            heap_limit_bytes: self.heap_limit(),
        }
    }

    fn page_hidden(&self) -> bool {
        self.document.hidden()
    }

    // === Surfaces ===

    fn container_size(&self, container: &ContainerId) -> Option<PixelSize> {
        let rect = self.element(container)?.get_bounding_client_rect();
        Some(PixelSize::new(
            rect.width().max(0.0).round() as u32,
            rect.height().max(0.0).round() as u32,
        ))
    }

    fn create_surface(
        &self,
        container: &ContainerId,
        size: PixelSize,
    ) -> Result<HtmlCanvasElement, HostError> {
        let element = self
            .element(container)
            .ok_or_else(|| HostError::ContainerNotFound(container.to_string()))?;
        let canvas: HtmlCanvasElement = self
            .document
            .create_element("canvas")
            .map_err(|e| HostError::Surface(format!("{:?}", e)))?
            .dyn_into()
            .map_err(|_| HostError::Surface("not a canvas".to_string()))?;

        canvas.set_width(size.width);
        canvas.set_height(size.height);
        canvas.set_class_name("backdrop__canvas");
        let style = canvas.style();
        for (property, value) in [
            ("position", "absolute"),
            ("inset", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("pointer-events", "none"),
        ] {
            style
                .set_property(property, value)
                .map_err(|e| HostError::Surface(format!("{:?}", e)))?;
        }

        element
            .append_child(&canvas)
            .map_err(|e| HostError::Surface(format!("{:?}", e)))?;
        log::debug!(
            "[host] canvas {}x{} attached to '{}'",
            size.width,
            size.height,
            container
        );
        Ok(canvas)
    }

    fn detach_surface(&self, surface: &HtmlCanvasElement) {
        surface.remove();
    }

    fn apply_fallback(&self, container: &ContainerId, css_background: &str) {
        let Some(element) = self.element(container) else {
            return;
        };
        if let Err(err) = element.style().set_property("background", css_background) {
            log::warn!("[host] could not paint fallback: {:?}", err);
        }
        let _ = element.class_list().add_1(FALLBACK_CLASS);
    }

    fn clear_fallback(&self, container: &ContainerId) {
        let Some(element) = self.element(container) else {
            return;
        };
        let _ = element.style().remove_property("background");
        let _ = element.class_list().remove_1(FALLBACK_CLASS);
    }

    // === Frames & Events ===

    fn request_frame(&self, callback: FrameCallback) -> FrameToken {
        let token = self.state.borrow_mut().next_token();
        let state = Rc::downgrade(&self.state);
        let mut callback = Some(callback);

        let closure = Closure::wrap(Box::new(move |timestamp: f64| {
            if let Some(state) = state.upgrade() {
                let own = state.borrow_mut().frames.remove(&token);
                if let Some((_, own)) = own {
                    retire(&state, Retired::Frame(own));
                }
            }
            if let Some(callback) = callback.take() {
                callback(timestamp);
            }
        }) as Box<dyn FnMut(f64)>);

        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => {
                self.state.borrow_mut().frames.insert(token, (id, closure));
            }
            Err(err) => log::warn!("[host] requestAnimationFrame failed: {:?}", err),
        }
        FrameToken(token)
    }

    fn cancel_frame(&self, token: FrameToken) {
        let entry = self.state.borrow_mut().frames.remove(&token.0);
        if let Some((id, closure)) = entry {
            let _ = self.window.cancel_animation_frame(id);
            retire(&self.state, Retired::Frame(closure));
        }
    }

    fn add_listener(&self, target: ListenTarget, callback: EventCallback) -> ListenerToken {
        let registration = match target {
            ListenTarget::Resize => {
                let window = self.window.clone();
                self.event_listener(self.window.clone().into(), "resize", move |_| {
                    let dimension = |v: Result<JsValue, JsValue>| {
                        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
                    };
                    callback(&HostEvent::Resize {
                        width: dimension(window.inner_width()),
                        height: dimension(window.inner_height()),
                    });
                })
            }
            ListenTarget::Visibility => {
                let document = self.document.clone();
                self.event_listener(self.document.clone().into(), "visibilitychange", move |_| {
                    callback(&HostEvent::Visibility {
                        hidden: document.hidden(),
                    });
                })
            }
            ListenTarget::MediaQuery(query) => match self.window.match_media(&query) {
                Ok(Some(mql)) => self.event_listener(mql.into(), "change", move |event| {
                    if let Some(event) = event.dyn_ref::<MediaQueryListEvent>() {
                        callback(&HostEvent::MediaQuery {
                            matches: event.matches(),
                        });
                    }
                }),
                _ => {
                    log::debug!("[host] media query '{}' unsupported", query);
                    None
                }
            },
            ListenTarget::Intersection {
                container,
                threshold,
                root_margin,
            } => self.intersection_listener(&container, threshold, &root_margin, callback),
        };
        self.register(registration)
    }

    fn remove_listener(&self, token: ListenerToken) {
        let registration = self.state.borrow_mut().listeners.remove(&token.0);
        if let Some(registration) = registration {
            registration.detach();
            retire(&self.state, Retired::Listener(registration));
        }
    }

    // === Async ===

    fn fetch_text(&self, url: &str) -> LocalFuture<Result<String, HostError>> {
        Box::pin(fetch_text(self.window.clone(), url.to_string()))
    }

    fn delay(&self, ms: u32) -> LocalFuture<()> {
        let window = self.window.clone();
        Box::pin(async move {
            let promise = js_sys::Promise::new(&mut |resolve, _reject| {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    &resolve,
                    ms.min(i32::MAX as u32) as i32,
                );
            });
            let _ = JsFuture::from(promise).await;
        })
    }

    // === Time & Entropy ===

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn random_seed(&self) -> u64 {
        let mut bytes = [0u8; 8];
        match getrandom::getrandom(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes),
            Err(err) => {
                log::debug!("[host] getrandom failed, using Math.random: {}", err);
                (js_sys::Math::random() * (1u64 << 53) as f64) as u64
            }
        }
    }

    // === Preferences ===

    fn storage_get(&self, key: &str) -> Option<String> {
        self.window
            .local_storage()
            .ok()
            .flatten()?
            .get_item(key)
            .ok()
            .flatten()
    }

    fn storage_set(&self, key: &str, value: &str) -> Result<(), HostError> {
        let storage = self
            .window
            .local_storage()
            .map_err(|e| HostError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| HostError::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|e| HostError::Storage(format!("{:?}", e)))
    }

    fn query_param(&self, key: &str) -> Option<String> {
        let search = self.window.location().search().ok()?;
        web_sys::UrlSearchParams::new_with_str(&search)
            .ok()?
            .get(key)
    }

    // === Analytics ===

    fn report(&self, event: &str) {
        let gtag = js_sys::Reflect::get(&self.window, &"gtag".into())
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        match gtag {
            Some(gtag) => {
                if let Err(err) = gtag.call2(&JsValue::NULL, &"event".into(), &event.into()) {
                    log::debug!("[host] gtag rejected '{}': {:?}", event, err);
                }
            }
            None => log::info!("[host] report: {}", event),
        }
    }
}
