//! Checks run between the user pressing "submit" and the browser's own form
//! submission. The guard never submits anything itself: it either lets the
//! native submission continue or tells the caller to cancel it.

use std::rc::Rc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::Config;
use crate::dates::{parse_input_date, DateRange};
use crate::error::Rejection;

/// Blocking user dialogs (`alert` / `confirm` in the browser).
pub trait Prompter {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

/// The form's submit button.
pub trait SubmitControl {
    /// Disable the control and show the in-flight label.
    fn mark_sending(&self, label: &str);
    /// Re-enable the control with its normal label.
    fn restore(&self, label: &str);
}

/// Source of overlap warnings for a requested date range.
pub trait OverlapCheck {
    fn overlap_warning(&self, start: NaiveDate, end: NaiveDate) -> Option<String>;
}

impl<T: OverlapCheck + ?Sized> OverlapCheck for Rc<T> {
    fn overlap_warning(&self, start: NaiveDate, end: NaiveDate) -> Option<String> {
        (**self).overlap_warning(start, end)
    }
}

/// Field values as they are at the moment of submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormDraft {
    pub staff_id: String,
    pub leave_type: String,
    /// `yyyy-mm-dd`
    pub start_date: String,
    /// `yyyy-mm-dd`
    pub end_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Staff,
    LeaveType,
    StartDate,
    EndDate,
}

impl RequiredField {
    pub fn message(self) -> &'static str {
        match self {
            RequiredField::Staff => "⚠️ Por favor seleccione un docente",
            RequiredField::LeaveType => "⚠️ Por favor seleccione el tipo de permiso",
            RequiredField::StartDate | RequiredField::EndDate => "⚠️ Por favor complete las fechas",
        }
    }
}

impl FormDraft {
    /// The first empty required field, in form order.
    pub fn first_missing(&self) -> Option<RequiredField> {
        [
            (RequiredField::Staff, &self.staff_id),
            (RequiredField::LeaveType, &self.leave_type),
            (RequiredField::StartDate, &self.start_date),
            (RequiredField::EndDate, &self.end_date),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Let the native submission go ahead.
    Proceed,
    /// Cancel the submit event.
    Abort(Rejection),
}

pub struct SubmissionGuard<C> {
    overlaps: C,
    sending_label: String,
    ready_label: String,
    lock_after_send: bool,
}

impl<C: OverlapCheck> SubmissionGuard<C> {
    pub fn new(overlaps: C, config: &Config) -> Self {
        Self {
            overlaps,
            sending_label: config.sending_label.clone(),
            ready_label: config.ready_label.clone(),
            lock_after_send: config.lock_submit_after_send,
        }
    }

    /// Required fields, then date order. Returns the requested range.
    pub fn validate(&self, draft: &FormDraft) -> Result<DateRange, Rejection> {
        if let Some(field) = draft.first_missing() {
            return Err(Rejection::MissingField(field));
        }

        let start = parse_input_date(&draft.start_date).map_err(|source| Rejection::InvalidDate {
            field: "de inicio",
            source,
        })?;
        let end = parse_input_date(&draft.end_date).map_err(|source| Rejection::InvalidDate {
            field: "de fin",
            source,
        })?;

        DateRange::new(start, end).ok_or(Rejection::EndBeforeStart)
    }

    /// Run every check in order. Validation failures are announced through
    /// `prompter`; an overlap asks for confirmation. On success the submit
    /// control is switched to its sending state.
    pub fn on_submit(
        &self,
        draft: &FormDraft,
        prompter: &impl Prompter,
        control: &impl SubmitControl,
    ) -> SubmitDecision {
        let range = match self.validate(draft) {
            Ok(range) => range,
            Err(rejection) => {
                warn!("Leave request blocked: {}", rejection);
                prompter.alert(&rejection.to_string());
                return SubmitDecision::Abort(rejection);
            }
        };

        if let Some(warning) = self.overlaps.overlap_warning(range.start, range.end) {
            let question = format!("{}\n\n¿Desea continuar de todos modos?", warning);
            if !prompter.confirm(&question) {
                info!("User declined overlapping leave request");
                return SubmitDecision::Abort(Rejection::OverlapDeclined);
            }
            info!("User confirmed overlapping leave request");
        }

        info!(
            "Releasing leave request for staff member {} ({} days)",
            draft.staff_id,
            range.days()
        );
        control.mark_sending(&self.sending_label);
        SubmitDecision::Proceed
    }

    /// Called when the page is shown again (e.g. back navigation restoring it
    /// from the page cache). Only re-enables the control when the lock is
    /// configured off. Returns whether the control was restored.
    pub fn on_page_restored(&self, control: &impl SubmitControl) -> bool {
        if self.lock_after_send {
            return false;
        }
        control.restore(&self.ready_label);
        true
    }
}
