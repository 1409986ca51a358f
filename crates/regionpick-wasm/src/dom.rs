// crates/regionpick-wasm/src/dom.rs
use regionpick_core::options::{ChangeHandler, SelectOption, SelectableOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlOptionElement, HtmlSelectElement};

/// A `<select>` element addressed by id.
///
/// The element is looked up on every call, so a control removed from the
/// page simply reads as detached.
#[derive(Debug, Clone)]
pub struct DomSelect {
    id: String,
}

impl DomSelect {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn element(&self) -> Option<HtmlSelectElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(&self.id)?
            .dyn_into::<HtmlSelectElement>()
            .ok()
    }

    fn option_at(select: &HtmlSelectElement, idx: u32) -> Option<HtmlOptionElement> {
        select.item(idx)?.dyn_into::<HtmlOptionElement>().ok()
    }
}

impl SelectableOptions for DomSelect {
    fn is_attached(&self) -> bool {
        self.element().is_some()
    }

    fn render(&mut self, options: &[SelectOption]) {
        let Some(select) = self.element() else {
            log::debug!("#{} is not in the document; nothing rendered", self.id);
            return;
        };

        select.set_length(0);
        for opt in options {
            let element = match HtmlOptionElement::new_with_text_and_value(&opt.label, &opt.value)
            {
                Ok(el) => el,
                Err(e) => {
                    log::warn!("Could not create option for #{}: {e:?}", self.id);
                    continue;
                }
            };
            if let Err(e) = select.add_with_html_option_element(&element) {
                log::warn!("Could not add option to #{}: {e:?}", self.id);
                continue;
            }
            if opt.selected {
                element.set_selected(true);
            }
        }
    }

    fn selected(&self) -> Option<String> {
        let select = self.element()?;
        if select.length() == 0 {
            return None;
        }
        Some(select.value())
    }

    fn select(&mut self, value: &str) -> bool {
        let Some(select) = self.element() else {
            return false;
        };
        let found = (0..select.length())
            .filter_map(|i| Self::option_at(&select, i))
            .any(|o| o.value() == value);
        if found {
            select.set_value(value);
        }
        found
    }

    /// Listens on the document rather than the element: `change` bubbles,
    /// so the handler fires even for a `<select>` inserted or re-rendered
    /// after this call.
    fn on_change(&mut self, mut handler: ChangeHandler) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::warn!("No document; change events on #{} not bound", self.id);
            return;
        };

        let id = self.id.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let from_control = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .is_some_and(|el| el.id() == id);
            if from_control {
                handler();
            }
        });
        if let Err(e) =
            document.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
        {
            log::warn!("Could not bind change for #{}: {e:?}", self.id);
            return;
        }
        // The listener lives as long as the page
        closure.forget();
    }
}
