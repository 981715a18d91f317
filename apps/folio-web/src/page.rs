//! Document wiring for the composed page
//!
//! Mounts the rendered HTML, follows section visibility into the nav,
//! reports contact clicks and drives the hero code stream.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use folio_content::SiteContent;
use folio_hal::Host;
use folio_page::composer::{CODE_STREAM_ID, NAV_ID};
use folio_page::{
    compose_page, nav, section_tracker, ActiveSectionTracker, ContactEvent, PageOptions,
    SectionRatio, Typewriter,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::host::WebHost;

/// Id of the element the page is rendered into
pub const ROOT_ID: &str = "app";

/// Ratios at which section visibility is re-evaluated
const SECTION_THRESHOLDS: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Render the page into `#app`, or the body when there is no such element
pub fn mount_page(
    document: &Document,
    content: &SiteContent,
    options: &PageOptions,
    active: Option<&str>,
) -> Result<(), JsValue> {
    let root: Element = match document.get_element_by_id(ROOT_ID) {
        Some(root) => root,
        None => document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .into(),
    };
    root.set_inner_html(&compose_page(content, options, active).render());
    log::info!("[page] mounted with {:?} cards", options.card_variant);
    Ok(())
}

/// Keeps the section observer alive and exposes the active id
pub struct SectionWatch {
    tracker: Rc<RefCell<ActiveSectionTracker>>,
    observer: IntersectionObserver,
    _closure: ObserverClosure,
}

impl SectionWatch {
    /// Observe every tracked section and re-render the nav when the active one changes
    pub fn start(document: &Document) -> Result<Self, JsValue> {
        let tracker = Rc::new(RefCell::new(section_tracker()));
        let ratios: Rc<RefCell<BTreeMap<String, f64>>> = Rc::default();

        let closure = {
            let tracker = Rc::clone(&tracker);
            let document = document.clone();
            Closure::wrap(Box::new(
                move |entries: js_sys::Array, _observer: IntersectionObserver| {
                    let mut ratios = ratios.borrow_mut();
                    for entry in entries.iter() {
                        let entry: IntersectionObserverEntry = entry.unchecked_into();
                        let ratio = if entry.is_intersecting() {
                            entry.intersection_ratio()
                        } else {
                            0.0
                        };
                        ratios.insert(entry.target().id(), ratio);
                    }
                    let batch: Vec<SectionRatio> = ratios
                        .iter()
                        .map(|(id, ratio)| SectionRatio::new(id.clone(), *ratio))
                        .collect();

                    let mut tracker = tracker.borrow_mut();
                    let before = tracker.active().map(str::to_string);
                    let after = tracker.observe(&batch);
                    if before.as_deref() != after {
                        refresh_nav(&document, after);
                    }
                },
            ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
        };

        let thresholds = js_sys::Array::new();
        for threshold in SECTION_THRESHOLDS {
            thresholds.push(&JsValue::from_f64(threshold));
        }
        let init = IntersectionObserverInit::new();
        init.set_threshold(&thresholds);
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;

        for id in tracker.borrow().sections() {
            match document.get_element_by_id(id) {
                Some(section) => observer.observe(&section),
                None => log::warn!("[page] section '{}' missing from the document", id),
            }
        }

        Ok(Self {
            tracker,
            observer,
            _closure: closure,
        })
    }

    pub fn active(&self) -> Option<String> {
        self.tracker.borrow().active().map(str::to_string)
    }
}

impl Drop for SectionWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn refresh_nav(document: &Document, active: Option<&str>) {
    match document.get_element_by_id(NAV_ID) {
        Some(current) => current.set_outer_html(&nav(active).render()),
        None => log::debug!("[page] nav not found, skipping highlight"),
    }
}

/// Report clicks on tagged contact links for the page's lifetime
///
/// Navigation is never prevented; the report is fire-and-forget.
pub fn report_contact_clicks(document: &Document, host: Rc<WebHost>) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |event: Event| {
        let Some(target) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
        else {
            return;
        };
        let Ok(Some(link)) = target.closest("[data-contact]") else {
            return;
        };
        let id = link.get_attribute("data-contact").unwrap_or_default();
        match ContactEvent::from_id(&id) {
            Some(contact) => host.report(contact.event_name()),
            None => log::debug!("[page] untracked contact link '{}'", id),
        }
    }) as Box<dyn FnMut(Event)>);

    document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Drives the hero code stream until stopped or its element disappears
pub struct CodeStream {
    running: Rc<Cell<bool>>,
}

impl CodeStream {
    /// Start typing. Under reduced motion the first line is shown statically.
    pub fn start(host: Rc<WebHost>, reduced_motion: bool) -> Self {
        let running = Rc::new(Cell::new(true));
        let mut typewriter = Typewriter::code_stream(host.random_seed());

        if reduced_motion {
            if let Some(element) = host.document().get_element_by_id(CODE_STREAM_ID) {
                let mut line = String::new();
                loop {
                    let tick = typewriter.tick();
                    if typewriter.is_deleting() || tick.text.len() <= line.len() {
                        break;
                    }
                    line = tick.text;
                }
                element.set_text_content(Some(&line));
            }
            running.set(false);
            return Self { running };
        }

        let flag = Rc::clone(&running);
        wasm_bindgen_futures::spawn_local(async move {
            while flag.get() {
                let Some(element) = host.document().get_element_by_id(CODE_STREAM_ID) else {
                    log::debug!("[page] code stream element gone, stopping");
                    break;
                };
                let tick = typewriter.tick();
                element.set_text_content(Some(&tick.text));
                host.delay(tick.next_delay_ms).await;
            }
        });
        Self { running }
    }

    pub fn stop(&self) {
        self.running.set(false);
    }
}

impl Drop for CodeStream {
    fn drop(&mut self) {
        self.stop();
    }
}
