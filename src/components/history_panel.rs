//! History panel for the selected staff member.
//!
//! Pure projection of [`PanelState`]: the controller decides what to show,
//! this component only draws it.

use leptos::prelude::*;
use permisos_core::PanelState;

use crate::components::permission_item::PermissionItem;

#[component]
pub fn HistoryPanel(
    /// Written by the history controller through `SignalView`.
    state: ReadSignal<PanelState>,
) -> impl IntoView {
    view! {
        <div class="history-panel">
            {move || match state.get() {
                PanelState::Prompt => view! {
                    <div class="alert alert-info">{PanelState::PROMPT_MESSAGE}</div>
                }.into_any(),
                PanelState::Loading => view! {
                    <div class="text-center text-muted py-3">
                        <span class="spinner-border spinner-border-sm"></span>
                        " Cargando historial..."
                    </div>
                }.into_any(),
                PanelState::Failed(message) => view! {
                    <div class="alert alert-danger">{message}</div>
                }.into_any(),
                PanelState::Empty => view! {
                    <div class="alert alert-secondary">{PanelState::EMPTY_MESSAGE}</div>
                }.into_any(),
                PanelState::Loaded(snapshot) => {
                    let header = snapshot.header();
                    let count = format!(
                        "{} registro{}",
                        snapshot.total,
                        if snapshot.total == 1 { "" } else { "s" }
                    );
                    view! {
                        <div class="card">
                            <div class="card-header d-flex justify-content-between">
                                <h6 class="mb-0">{header}</h6>
                                <small class="text-muted">{count}</small>
                            </div>
                            <div class="list-group list-group-flush">
                                {snapshot.records.iter().cloned().map(|record| view! {
                                    <PermissionItem record=record />
                                }).collect::<Vec<_>>()}
                            </div>
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
