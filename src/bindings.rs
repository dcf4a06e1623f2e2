//! DOM adapters for the headless form logic.
//!
//! Every element the page logic touches is looked up once in
//! [`FormElements::locate`] and handed to the core types through the traits
//! they expect.

use permisos_core::{DateInput, FormDraft, Prompter, SubmitControl};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, EventTarget, HtmlButtonElement, HtmlElement, HtmlFormElement,
    HtmlInputElement, HtmlSelectElement, Window,
};

pub const FORM_ID: &str = "form-permiso";
pub const STAFF_ID: &str = "docente_id";
pub const LEAVE_TYPE_ID: &str = "tipo";
pub const START_DATE_ID: &str = "fecha_inicio";
pub const END_DATE_ID: &str = "fecha_fin";
pub const PANEL_ID: &str = "historial-permisos";
pub const CONFIG_ID: &str = "permisos-config";

#[derive(Clone)]
pub struct FormElements {
    pub form: HtmlFormElement,
    pub staff: HtmlSelectElement,
    pub leave_type: Element,
    pub start: HtmlInputElement,
    pub end: HtmlInputElement,
    pub submit: HtmlButtonElement,
    pub panel: HtmlElement,
}

impl FormElements {
    pub fn locate(document: &Document) -> Result<Self, String> {
        let form: HtmlFormElement = by_id(document, FORM_ID)?;
        let submit = form
            .query_selector("button[type=\"submit\"]")
            .map_err(|e| format!("Invalid submit selector: {:?}", e))?
            .ok_or_else(|| format!("#{} has no submit button", FORM_ID))?
            .dyn_into::<HtmlButtonElement>()
            .map_err(|_| "Submit control is not a button".to_string())?;

        Ok(Self {
            staff: by_id(document, STAFF_ID)?,
            leave_type: by_id(document, LEAVE_TYPE_ID)?,
            start: by_id(document, START_DATE_ID)?,
            end: by_id(document, END_DATE_ID)?,
            panel: by_id(document, PANEL_ID)?,
            submit,
            form,
        })
    }

    /// Current field values, read fresh from the DOM.
    pub fn read_draft(&self) -> FormDraft {
        FormDraft {
            staff_id: self.staff.value(),
            leave_type: control_value(&self.leave_type),
            start_date: self.start.value(),
            end_date: self.end.value(),
        }
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, String> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| format!("Element #{} not found", id))?
        .dyn_into::<T>()
        .map_err(|_| format!("Element #{} has an unexpected type", id))
}

/// Value of a `<select>` or `<input>`; anything else reads as empty.
fn control_value(element: &Element) -> String {
    if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else {
        String::new()
    }
}

/// Attach a listener for the lifetime of the page.
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), String> {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| format!("Failed to listen for '{}': {:?}", event, e))?;
    closure.forget();
    Ok(())
}

/// A `<input type="date">` seen through [`DateInput`].
pub struct DateField(pub HtmlInputElement);

impl DateInput for DateField {
    fn value(&self) -> String {
        self.0.value()
    }

    fn set_value(&self, value: &str) {
        self.0.set_value(value);
    }

    fn set_min(&self, value: &str) {
        self.0.set_min(value);
    }
}

/// `window.alert` / `window.confirm`.
#[derive(Clone)]
pub struct BrowserDialogs {
    window: Window,
}

impl BrowserDialogs {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Prompter for BrowserDialogs {
    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            web_sys::console::warn_1(&format!("Alert not shown: {:?}", e).into());
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or_else(|e| {
            web_sys::console::warn_1(&format!("Confirmation not shown: {:?}", e).into());
            false
        })
    }
}

pub struct SubmitButton(pub HtmlButtonElement);

impl SubmitControl for SubmitButton {
    fn mark_sending(&self, label: &str) {
        self.0.set_inner_html(&format!(
            "<span class=\"spinner-border spinner-border-sm\"></span> {}",
            label
        ));
        self.0.set_disabled(true);
    }

    fn restore(&self, label: &str) {
        self.0.set_text_content(Some(label));
        self.0.set_disabled(false);
    }
}
