#![allow(dead_code)]

use std::cell::RefCell;

use permisos_core::history::HistoryResponse;
use permisos_core::{FetchError, HistorySource, HistoryView, PanelState, Prompter};

/// Same subscriber setup as the desktop backend, routed through the test
/// harness's captured output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Serves canned JSON bodies in call order.
pub struct CannedSource {
    bodies: RefCell<Vec<Result<String, FetchError>>>,
    pub requested: RefCell<Vec<String>>,
}

impl CannedSource {
    pub fn new(bodies: Vec<Result<&str, FetchError>>) -> Self {
        let mut bodies: Vec<_> = bodies
            .into_iter()
            .map(|b| b.map(str::to_string))
            .collect();
        bodies.reverse();
        Self {
            bodies: RefCell::new(bodies),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl HistorySource for CannedSource {
    async fn fetch_history(&self, staff_id: &str) -> Result<HistoryResponse, FetchError> {
        self.requested.borrow_mut().push(staff_id.to_string());
        let body = self
            .bodies
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(FetchError::Transport("no canned body left".into())))?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[derive(Default)]
pub struct LastState(pub RefCell<Option<PanelState>>);

impl HistoryView for LastState {
    fn render(&self, state: &PanelState) {
        *self.0.borrow_mut() = Some(state.clone());
    }
}

/// Answers every confirmation with a fixed value and records what was shown.
pub struct Dialogs {
    pub answer: bool,
    pub shown: RefCell<Vec<String>>,
}

impl Dialogs {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            shown: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for Dialogs {
    fn alert(&self, message: &str) {
        self.shown.borrow_mut().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.shown.borrow_mut().push(message.to_string());
        self.answer
    }
}
