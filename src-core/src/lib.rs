pub mod config;
pub mod date_fields;
pub mod dates;
pub mod error;
pub mod guard;
pub mod history;

pub use config::Config;
pub use date_fields::{DateInput, DateRangeFields, EndDateChange};
pub use error::{ConfigError, DateParseError, FetchError, Rejection};
pub use guard::{
    FormDraft, OverlapCheck, Prompter, RequiredField, SubmissionGuard, SubmitControl,
    SubmitDecision,
};
pub use history::{
    HistoryController, HistorySnapshot, HistorySource, HistoryView, HttpHistorySource,
    PanelState, PermissionRecord,
};

