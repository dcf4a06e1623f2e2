use leptos::prelude::*;
use permisos_core::{HistoryView, PanelState};

/// Rendering sink that feeds the mounted [`HistoryPanel`](crate::components::history_panel::HistoryPanel).
#[derive(Clone, Copy)]
pub struct SignalView {
    state: RwSignal<PanelState>,
}

impl SignalView {
    pub fn new(state: RwSignal<PanelState>) -> Self {
        Self { state }
    }
}

impl HistoryView for SignalView {
    fn render(&self, state: &PanelState) {
        self.state.set(state.clone());
    }
}
