//! Browser host: a shadow-root backed document and the global handle.

use crate::bootstrap::CourseCompanionWidget;
use crate::document::{ElementSpec, HostDocument};
use crate::render::WidgetApp;
use companion_core::{CompanionError, Result};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlLinkElement, ShadowRoot, ShadowRootInit, ShadowRootMode};

/// Name of the handle installed on `window`.
pub const GLOBAL_NAME: &str = "CourseCompanion";

fn dom_error(context: &str, value: JsValue) -> CompanionError {
    CompanionError::dom(format!("{}: {:?}", context, value))
}

/// The live page, with one shadow root per container.
pub struct WebDocument {
    document: Document,
    scopes: HashMap<String, (Element, ShadowRoot)>,
}

impl WebDocument {
    pub fn from_window() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| CompanionError::unsupported("no document available"))?;
        Ok(Self {
            document,
            scopes: HashMap::new(),
        })
    }

    fn create(&self, spec: &ElementSpec) -> Result<Element> {
        let element = self
            .document
            .create_element(spec.tag)
            .map_err(|e| dom_error("create element", e))?;
        element.set_id(&spec.id);
        if let Some(class) = &spec.class {
            element.set_class_name(class);
        }
        if let Some(style) = &spec.style {
            element
                .set_attribute("style", style)
                .map_err(|e| dom_error("set style", e))?;
        }
        Ok(element)
    }

    fn shadow(&self, container_id: &str) -> Result<&ShadowRoot> {
        self.scopes
            .get(container_id)
            .map(|(_, shadow)| shadow)
            .ok_or_else(|| CompanionError::not_found("Container", container_id))
    }
}

impl HostDocument for WebDocument {
    fn supports_isolation(&self) -> bool {
        self.document
            .body()
            .map(|body| js_sys::Reflect::has(&body, &JsValue::from_str("attachShadow")).unwrap_or(false))
            .unwrap_or(false)
    }

    fn attach_isolated(&mut self, container: &ElementSpec) -> Result<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| CompanionError::unsupported("document has no body"))?;
        let element = self.create(container)?;
        let shadow = element
            .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
            .map_err(|e| dom_error("attach shadow", e))?;
        body.append_child(&element)
            .map_err(|e| dom_error("append container", e))?;
        self.scopes
            .insert(container.id.clone(), (element, shadow));
        Ok(())
    }

    fn append_to_scope(&mut self, container_id: &str, element: &ElementSpec) -> Result<()> {
        let node = self.create(element)?;
        self.shadow(container_id)?
            .append_child(&node)
            .map_err(|e| dom_error("append to scope", e))?;
        Ok(())
    }

    fn append_stylesheet(&mut self, container_id: &str, href: &str) -> Result<()> {
        let link: HtmlLinkElement = self
            .document
            .create_element("link")
            .map_err(|e| dom_error("create link", e))?
            .dyn_into()
            .map_err(|_| CompanionError::dom("link element has an unexpected type"))?;
        link.set_rel("stylesheet");
        link.set_href(href);
        self.shadow(container_id)?
            .append_child(&link)
            .map_err(|e| dom_error("append stylesheet", e))?;
        Ok(())
    }

    fn remove(&mut self, container_id: &str) -> bool {
        match self.scopes.remove(container_id) {
            Some((element, _)) => {
                element.remove();
                true
            }
            None => false,
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }
}

thread_local! {
    static WIDGET: RefCell<Option<CourseCompanionWidget<WebDocument, WidgetApp>>> =
        const { RefCell::new(None) };
}

fn with_widget<T>(
    fallback: T,
    f: impl FnOnce(&mut CourseCompanionWidget<WebDocument, WidgetApp>) -> T,
) -> T {
    WIDGET.with(|cell| match cell.borrow_mut().as_mut() {
        Some(widget) => f(widget),
        None => {
            tracing::error!("[CourseCompanion] No document available");
            fallback
        }
    })
}

fn patch_from_js(value: JsValue) -> serde_json::Value {
    if value.is_undefined() || value.is_null() {
        return serde_json::Value::Object(Default::default());
    }
    serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
        tracing::warn!("[CourseCompanion] Ignoring unreadable configuration: {}", e);
        serde_json::Value::Null
    })
}

/// Global handle exposed as `window.CourseCompanion`.
#[wasm_bindgen]
pub struct CourseCompanionHandle {
    _private: (),
}

#[wasm_bindgen]
impl CourseCompanionHandle {
    pub fn init(&self, config: JsValue) {
        let patch = patch_from_js(config);
        with_widget((), |widget| widget.init(&patch));
    }

    pub fn destroy(&self) {
        with_widget((), |widget| widget.destroy());
    }

    #[wasm_bindgen(js_name = updateConfig)]
    pub fn update_config(&self, patch: JsValue) {
        let patch = patch_from_js(patch);
        with_widget((), |widget| widget.update_config(&patch));
    }

    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> JsValue {
        let config = with_widget(None, |widget| widget.get_config());
        config
            .and_then(|c| {
                c.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                    .ok()
            })
            .unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = isInitialized)]
    pub fn is_initialized(&self) -> bool {
        with_widget(false, |widget| widget.is_initialized())
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    match WebDocument::from_window() {
        Ok(document) => {
            WIDGET.with(|cell| {
                *cell.borrow_mut() = Some(CourseCompanionWidget::new(document, WidgetApp::new));
            });
        }
        Err(e) => tracing::error!("[CourseCompanion] {}", e),
    }

    if let Some(window) = web_sys::window() {
        let installed = js_sys::Reflect::set(
            &window,
            &JsValue::from_str(GLOBAL_NAME),
            &JsValue::from(CourseCompanionHandle { _private: () }),
        );
        if installed.is_err() {
            tracing::error!("[CourseCompanion] Failed to install global handle");
        }
    }
}
