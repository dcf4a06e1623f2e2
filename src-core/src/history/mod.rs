pub mod controller;
pub mod source;
pub mod types;

pub use controller::{
    staff_id_from_query, HistoryController, HistoryView, LoadOutcome, OverlapWarning,
};
pub use source::{history_url, HistorySource, HttpHistorySource};
pub use types::{Emphasis, HistoryResponse, HistorySnapshot, PanelState, PermissionRecord};
