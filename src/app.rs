//! Page wiring: finds the form, builds the history controller and the
//! submission guard, mounts the panel and attaches the event listeners.

use std::rc::Rc;

use leptos::prelude::*;
use permisos_core::history::{staff_id_from_query, LoadOutcome};
use permisos_core::{
    Config, DateRangeFields, HistoryController, PanelState, SubmissionGuard, SubmitDecision,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, PageTransitionEvent, Window};

use crate::api;
use crate::bindings::{self, BrowserDialogs, DateField, FormElements, SubmitButton};
use crate::components::history_panel::HistoryPanel;
use crate::view::SignalView;

type Controller = HistoryController<permisos_core::HttpHistorySource, SignalView>;

/// Initialise once the document has been parsed.
pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = {
            let window = window.clone();
            let document = document.clone();
            move |_| run(&window, &document)
        };
        if let Err(e) = bindings::listen(&document, "DOMContentLoaded", on_ready) {
            web_sys::console::error_1(&e.into());
        }
    } else {
        run(&window, &document);
    }
}

fn run(window: &Window, document: &Document) {
    if let Err(e) = wire_page(window, document) {
        web_sys::console::warn_1(&format!("Leave request form not initialised: {}", e).into());
    }
}

fn wire_page(window: &Window, document: &Document) -> Result<(), String> {
    let config = load_config(document)?;
    let elements = FormElements::locate(document)?;
    let dialogs = BrowserDialogs::new(window.clone());

    let panel_state = RwSignal::new(PanelState::Prompt);
    let controller: Rc<Controller> = Rc::new(HistoryController::new(
        api::history_source(window, &config)?,
        SignalView::new(panel_state),
        &config,
    ));

    let read_state = panel_state.read_only();
    leptos::mount::mount_to(elements.panel.clone(), move || {
        view! { <HistoryPanel state=read_state /> }
    })
    .forget();

    // Staff selector
    {
        let controller = controller.clone();
        let staff = elements.staff.clone();
        bindings::listen(&elements.staff, "change", move |_| {
            load_history(controller.clone(), staff.value());
        })?;
    }

    // Date fields
    let fields = Rc::new(DateRangeFields::new(
        DateField(elements.start.clone()),
        DateField(elements.end.clone()),
    ));
    fields.initialize(chrono::Local::now().date_naive());
    {
        let fields = fields.clone();
        bindings::listen(&elements.start, "change", move |_| fields.on_start_changed())?;
    }
    {
        let fields = fields.clone();
        let dialogs = dialogs.clone();
        bindings::listen(&elements.end, "change", move |_| {
            fields.on_end_changed(&dialogs);
        })?;
    }

    // Submission
    let guard = Rc::new(SubmissionGuard::new(controller.clone(), &config));
    {
        let guard = guard.clone();
        let form = elements.form.clone();
        let elements = elements.clone();
        let button = SubmitButton(elements.submit.clone());
        bindings::listen(&form, "submit", move |ev| {
            let draft = elements.read_draft();
            if let SubmitDecision::Abort(_) = guard.on_submit(&draft, &dialogs, &button) {
                ev.prevent_default();
            }
        })?;
    }
    {
        let button = SubmitButton(elements.submit.clone());
        bindings::listen(window, "pageshow", move |ev| {
            let restored = ev
                .dyn_ref::<PageTransitionEvent>()
                .map(|e| e.persisted())
                .unwrap_or(false);
            if restored {
                guard.on_page_restored(&button);
            }
        })?;
    }

    autoload_from_query(window, &config, &elements, controller);
    Ok(())
}

fn load_config(document: &Document) -> Result<Config, String> {
    match document.get_element_by_id(bindings::CONFIG_ID) {
        Some(el) => Ok(Config::from_json(&el.text_content().unwrap_or_default())?),
        None => Ok(Config::default()),
    }
}

fn load_history(controller: Rc<Controller>, staff_id: String) {
    spawn_local(async move {
        if let LoadOutcome::Failed { detail, .. } =
            controller.on_staff_selection_changed(&staff_id).await
        {
            web_sys::console::error_1(
                &format!("Error cargando historial de {}: {}", staff_id, detail).into(),
            );
        }
    });
}

/// Pre-select the staff member named in the query string and load their
/// history after a short deferral.
fn autoload_from_query(
    window: &Window,
    config: &Config,
    elements: &FormElements,
    controller: Rc<Controller>,
) {
    let search = window.location().search().unwrap_or_default();
    let Some(staff_id) = staff_id_from_query(&search, &config.query_param) else {
        return;
    };
    elements.staff.set_value(&staff_id);

    let callback = wasm_bindgen::closure::Closure::once(move || {
        load_history(controller, staff_id);
    });
    let scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        config.autoload_delay().as_millis() as i32,
    );
    if let Err(e) = scheduled {
        web_sys::console::error_1(&e);
    }
    callback.forget();
}
