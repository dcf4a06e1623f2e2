use chrono::NaiveDate;
use tracing::debug;

use crate::dates::{format_input_date, parse_input_date};
use crate::guard::Prompter;

/// A date input holding a `yyyy-mm-dd` value.
pub trait DateInput {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn set_min(&self, value: &str);
}

pub const END_BEFORE_START_WARNING: &str =
    "❌ La fecha de fin no puede ser anterior a la fecha de inicio";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDateChange {
    Accepted,
    /// The end date was earlier than the start date and was put back.
    Reverted,
}

/// Keeps the start/end inputs of the request form consistent.
pub struct DateRangeFields<I> {
    start: I,
    end: I,
}

impl<I: DateInput> DateRangeFields<I> {
    pub fn new(start: I, end: I) -> Self {
        Self { start, end }
    }

    /// Fill empty inputs with `today`; an empty start date also gets `today`
    /// as its lower bound.
    pub fn initialize(&self, today: NaiveDate) {
        let today = format_input_date(today);
        if self.start.value().trim().is_empty() {
            self.start.set_value(&today);
            self.start.set_min(&today);
        }
        if self.end.value().trim().is_empty() {
            self.end.set_value(&today);
        }
    }

    /// The end date may never precede the new start date: raise its minimum
    /// and pull it forward if needed.
    pub fn on_start_changed(&self) {
        let start_raw = self.start.value();
        self.end.set_min(&start_raw);

        let Ok(start) = parse_input_date(&start_raw) else {
            return;
        };
        if self.end_is_before(start) {
            debug!("End date moved forward to {}", start_raw);
            self.end.set_value(&start_raw);
        }
    }

    /// Reject an end date earlier than the start date.
    pub fn on_end_changed(&self, prompter: &impl Prompter) -> EndDateChange {
        let start_raw = self.start.value();
        let Ok(start) = parse_input_date(&start_raw) else {
            return EndDateChange::Accepted;
        };
        if !self.end_is_before(start) {
            return EndDateChange::Accepted;
        }

        prompter.alert(END_BEFORE_START_WARNING);
        self.end.set_value(&start_raw);
        EndDateChange::Reverted
    }

    /// An empty or unreadable end date counts as earlier than any start.
    fn end_is_before(&self, start: NaiveDate) -> bool {
        parse_input_date(&self.end.value()).map_or(true, |end| end < start)
    }
}
