//! Folio web entry point
//!
//! Mounts the portfolio page into the document and attaches the hero
//! background effect. JS talks to the running page through [`PortfolioApp`].

pub mod config;
pub mod host;
pub mod page;

use std::cell::Cell;
use std::rc::Rc;

use folio_backdrop::{BackdropController, GpuBackend, Variant};
use folio_content::SiteContent;
use folio_hal::{ContainerId, Host};
use folio_page::PageOptions;
use wasm_bindgen::prelude::*;

pub use config::{SiteConfig, CONFIG_ELEMENT_ID};
pub use host::WebHost;
use page::{CodeStream, SectionWatch};

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// The running page
#[wasm_bindgen]
pub struct PortfolioApp {
    host: Rc<WebHost>,
    content: SiteContent,
    backdrop: BackdropController<WebHost>,
    container: ContainerId,
    /// Last variant picked through `set_background` on this page load
    selected: Cell<Option<Variant>>,
    sections: Option<SectionWatch>,
    code_stream: Option<CodeStream>,
}

#[wasm_bindgen]
impl PortfolioApp {
    /// Render the page and start the background effect
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PortfolioApp, JsValue> {
        let host = Rc::new(WebHost::new().map_err(|e| JsValue::from_str(&e.to_string()))?);
        let embedded = host
            .document()
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());
        let config = SiteConfig::from_embedded(embedded.as_deref());

        let content = SiteContent::canonical();
        let options = PageOptions {
            card_variant: config.card_variant,
            ..PageOptions::default()
        };
        page::mount_page(host.document(), &content, &options, Some("home"))?;

        let sections = match SectionWatch::start(host.document()) {
            Ok(watch) => Some(watch),
            Err(err) => {
                log::warn!("[page] section tracking unavailable: {:?}", err);
                None
            }
        };
        page::report_contact_clicks(host.document(), Rc::clone(&host))?;

        let reduced_motion = host.probe().prefers_reduced_motion.unwrap_or(false);
        let code_stream = Some(CodeStream::start(Rc::clone(&host), reduced_motion));

        let backdrop =
            BackdropController::new(Rc::clone(&host), Rc::new(GpuBackend), config.backdrop)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let container = ContainerId::new(options.backdrop_id);

        let app = PortfolioApp {
            host,
            content,
            backdrop,
            container,
            selected: Cell::new(None),
            sections,
            code_stream,
        };
        app.mount_backdrop(None);
        Ok(app)
    }

    /// `[{"id": "...", "name": "..."}]` for every variant
    pub fn available_backgrounds_json(&self) -> String {
        let list: Vec<_> = Variant::all()
            .iter()
            .map(|v| serde_json::json!({ "id": v.id(), "name": v.name() }))
            .collect();
        serde_json::to_string(&list).unwrap_or_else(|_| "[]".to_string())
    }

    /// Id of the variant that would be (or is) shown
    pub fn current_background(&self) -> String {
        let live = self
            .backdrop
            .handle(&self.container)
            .and_then(|handle| self.backdrop.config(&handle))
            .map(|config| config.variant);
        shown_variant(live, self.selected.get(), || self.backdrop.preferred_variant())
            .id()
            .to_string()
    }

    /// Remember and switch to a variant. Unknown ids are rejected.
    pub fn set_background(&self, id: &str) -> bool {
        match self.backdrop.select_variant(id) {
            Ok(variant) => {
                self.selected.set(Some(variant));
                self.backdrop.unmount(&self.container);
                self.mount_backdrop(Some(variant));
                true
            }
            Err(err) => {
                log::warn!("[backdrop] {}", err);
                false
            }
        }
    }

    pub fn active_section(&self) -> Option<String> {
        self.sections.as_ref().and_then(SectionWatch::active)
    }

    pub fn content_json(&self) -> Result<String, JsValue> {
        self.content
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Tear everything down. The page markup stays.
    pub fn shutdown(&mut self) {
        self.backdrop.shutdown();
        self.sections = None;
        self.code_stream = None;
        log::info!("[page] shut down");
    }
}

impl PortfolioApp {
    fn mount_backdrop(&self, variant: Option<Variant>) {
        let backdrop = self.backdrop.clone();
        let container = self.container.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let handle = match variant {
                Some(variant) => backdrop.mount_variant(&container, variant).await,
                None => backdrop.mount(&container).await,
            };
            if handle.is_none() {
                log::debug!("[backdrop] '{}' not mounted", container);
            }
        });
    }

    pub fn host(&self) -> &Rc<WebHost> {
        &self.host
    }
}

/// Live effect first, then this load's explicit choice, then the resolved preference
fn shown_variant(
    live: Option<Variant>,
    selected: Option<Variant>,
    preferred: impl FnOnce() -> Variant,
) -> Variant {
    live.or(selected).unwrap_or_else(preferred)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shown_variant_prefers_live() {
        let shown = shown_variant(Some(Variant::Clouds), Some(Variant::Geometry), || {
            Variant::Network
        });
        assert_eq!(shown, Variant::Clouds);
    }

    #[test]
    fn test_shown_variant_keeps_selection_while_not_live() {
        // Pending or fallen back: the query-driven preference must not win
        let shown = shown_variant(None, Some(Variant::Geometry), || Variant::Network);
        assert_eq!(shown, Variant::Geometry);
    }

    #[test]
    fn test_shown_variant_without_selection() {
        assert_eq!(shown_variant(None, None, || Variant::Network), Variant::Network);
    }
}
