//! Selection-driven history loading and the overlap query.
//!
//! The controller owns the only copy of the fetched records. Each successful
//! fetch produces a fresh [`HistorySnapshot`] that replaces the previous one
//! in a single swap, and every selection change bumps a request counter so a
//! response that arrives after a newer selection can be recognised and
//! dropped.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::source::HistorySource;
use super::types::{HistoryResponse, HistorySnapshot, PanelState, PermissionRecord};
use crate::config::Config;
use crate::error::FetchError;
use crate::guard::OverlapCheck;

/// Rendering sink for the history panel.
pub trait HistoryView {
    fn render(&self, state: &PanelState);
}

impl<V: HistoryView + ?Sized> HistoryView for Rc<V> {
    fn render(&self, state: &PanelState) {
        (**self).render(state)
    }
}

/// What a selection change ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Cleared,
    Loaded(usize),
    Empty,
    /// `message` is what the panel shows; `detail` is the underlying error.
    Failed { message: String, detail: String },
    /// A newer selection was made while this request was in flight.
    Superseded,
}

/// Warning produced when a requested range shares days with a stored record.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapWarning {
    pub record: PermissionRecord,
}

impl fmt::Display for OverlapWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "⚠️ ADVERTENCIA: Este permiso se solapa con uno existente:\n{} ({} al {})",
            self.record.category, self.record.start_date, self.record.end_date
        )
    }
}

pub struct HistoryController<S, V> {
    source: S,
    view: V,
    retain_records_on_error: bool,
    ignore_stale_responses: bool,
    snapshot: RefCell<Arc<HistorySnapshot>>,
    state: RefCell<PanelState>,
    latest_request: Cell<u64>,
}

impl<S: HistorySource, V: HistoryView> HistoryController<S, V> {
    /// Creates the controller and renders the initial prompt.
    pub fn new(source: S, view: V, config: &Config) -> Self {
        let controller = Self {
            source,
            view,
            retain_records_on_error: config.retain_records_on_error,
            ignore_stale_responses: config.ignore_stale_responses,
            snapshot: RefCell::new(Arc::new(HistorySnapshot::default())),
            state: RefCell::new(PanelState::Prompt),
            latest_request: Cell::new(0),
        };
        controller.view.render(&PanelState::Prompt);
        controller
    }

    /// Handle a change of the staff selector. An empty id resets the panel;
    /// anything else triggers exactly one history request.
    pub async fn on_staff_selection_changed(&self, staff_id: &str) -> LoadOutcome {
        let request = self.latest_request.get() + 1;
        self.latest_request.set(request);

        let staff_id = staff_id.trim();
        if staff_id.is_empty() {
            self.replace_snapshot(HistorySnapshot::default());
            self.show(PanelState::Prompt);
            return LoadOutcome::Cleared;
        }

        self.show(PanelState::Loading);
        info!("Loading permission history for staff member {}", staff_id);

        let result = self.source.fetch_history(staff_id).await;

        if self.ignore_stale_responses && request != self.latest_request.get() {
            debug!(
                "Dropping history response for {} (request {} superseded by {})",
                staff_id,
                request,
                self.latest_request.get()
            );
            return LoadOutcome::Superseded;
        }

        self.apply(staff_id, result)
    }

    fn apply(&self, staff_id: &str, result: Result<HistoryResponse, FetchError>) -> LoadOutcome {
        let response = match result {
            Ok(response) if response.success => response,
            Ok(response) => return self.fail(staff_id, FetchError::Server(response.error)),
            Err(e) => return self.fail(staff_id, e),
        };

        let snapshot = Arc::new(HistorySnapshot::from_response(staff_id, response));
        *self.snapshot.borrow_mut() = snapshot.clone();

        if snapshot.is_empty() {
            info!("Staff member {} has no recorded permissions", staff_id);
            self.show(PanelState::Empty);
            LoadOutcome::Empty
        } else {
            let count = snapshot.records.len();
            info!("Loaded {} permissions for staff member {}", count, staff_id);
            self.show(PanelState::Loaded(snapshot));
            LoadOutcome::Loaded(count)
        }
    }

    fn fail(&self, staff_id: &str, error: FetchError) -> LoadOutcome {
        warn!("Failed to load history for {}: {}", staff_id, error);
        if !self.retain_records_on_error {
            self.replace_snapshot(HistorySnapshot::default());
        }
        let message = error.user_message();
        self.show(PanelState::Failed(message.clone()));
        LoadOutcome::Failed {
            message,
            detail: error.to_string(),
        }
    }

    fn replace_snapshot(&self, snapshot: HistorySnapshot) {
        *self.snapshot.borrow_mut() = Arc::new(snapshot);
    }

    fn show(&self, state: PanelState) {
        self.view.render(&state);
        *self.state.borrow_mut() = state;
    }
}

impl<S, V> HistoryController<S, V> {
    /// First stored record with `start <= record_end && end >= record_start`.
    /// Bounds are compared as given, never reordered. Records with unreadable
    /// dates are skipped.
    pub fn query_overlap(&self, start: NaiveDate, end: NaiveDate) -> Option<OverlapWarning> {
        let snapshot = self.records();

        snapshot
            .records
            .iter()
            .find(|record| match record.bounds() {
                Ok((record_start, record_end)) => start <= record_end && end >= record_start,
                Err(e) => {
                    warn!("Skipping permission '{}' in overlap check: {}", record.category, e);
                    false
                }
            })
            .map(|record| {
                info!(
                    "Requested range {} to {} overlaps {} ({} al {})",
                    start, end, record.category, record.start_date, record.end_date
                );
                OverlapWarning {
                    record: record.clone(),
                }
            })
    }

    /// The records of the last successful fetch (or an empty snapshot).
    pub fn records(&self) -> Arc<HistorySnapshot> {
        self.snapshot.borrow().clone()
    }

    pub fn state(&self) -> PanelState {
        self.state.borrow().clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S, V> OverlapCheck for HistoryController<S, V> {
    fn overlap_warning(&self, start: NaiveDate, end: NaiveDate) -> Option<String> {
        self.query_overlap(start, end).map(|w| w.to_string())
    }
}

/// Staff id carried by the page's query string, e.g. `?docente_id=12`.
pub fn staff_id_from_query(search: &str, param: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
