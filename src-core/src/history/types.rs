use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::parse_display_date;
use crate::error::DateParseError;

/// One leave entry from a staff member's history, as sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionRecord {
    #[serde(rename = "tipo")]
    pub category: String,
    /// `dd/mm/yyyy`
    #[serde(rename = "fecha_inicio")]
    pub start_date: String,
    /// `dd/mm/yyyy`
    #[serde(rename = "fecha_fin")]
    pub end_date: String,
    #[serde(rename = "dias", default)]
    pub day_count: f64,
    #[serde(rename = "observacion", default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PermissionRecord {
    /// Parsed `(start, end)` exactly as stored; reversed dates stay reversed.
    pub fn bounds(&self) -> Result<(NaiveDate, NaiveDate), DateParseError> {
        Ok((
            parse_display_date(&self.start_date)?,
            parse_display_date(&self.end_date)?,
        ))
    }

    pub fn emphasis(&self) -> Emphasis {
        Emphasis::for_category(&self.category)
    }

    /// Note text, if the server sent a non-blank one.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// "5 días", "1 día", "0.5 días".
    pub fn day_label(&self) -> String {
        let unit = if self.day_count == 1.0 { "día" } else { "días" };
        if self.day_count.fract() == 0.0 {
            format!("{} {}", self.day_count as i64, unit)
        } else {
            format!("{} {}", self.day_count, unit)
        }
    }
}

/// JSON envelope returned by the history endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(rename = "docente", default, skip_serializing_if = "Option::is_none")]
    pub staff_name: Option<String>,
    #[serde(rename = "permisos", default, deserialize_with = "null_as_empty")]
    pub records: Vec<PermissionRecord>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<PermissionRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// The records of one successful fetch. Never mutated; a new fetch builds a
/// new snapshot and swaps it in whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySnapshot {
    pub staff_id: String,
    pub staff_name: String,
    pub records: Vec<PermissionRecord>,
    pub total: usize,
}

impl HistorySnapshot {
    pub fn from_response(staff_id: &str, response: HistoryResponse) -> Self {
        let total = response.total.unwrap_or(response.records.len());
        // A reported total of zero wins over whatever list came along with it.
        let records = if total == 0 {
            Vec::new()
        } else {
            response.records
        };
        Self {
            staff_id: staff_id.to_string(),
            staff_name: response.staff_name.unwrap_or_default(),
            records,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0 || self.records.is_empty()
    }

    pub fn header(&self) -> String {
        format!("Docente: {}", self.staff_name)
    }
}

/// Visual weight of a record's category badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Info,
    Danger,
    Primary,
    Success,
    Warning,
    Neutral,
}

/// Checked in order; the first keyword contained in the category wins.
const CATEGORY_KEYWORDS: &[(&str, Emphasis)] = &[
    ("Vacaciones", Emphasis::Info),
    ("Enfermedad", Emphasis::Danger),
    ("Capacitación", Emphasis::Primary),
    ("Cumpleaños", Emphasis::Success),
    ("Tiquetera", Emphasis::Warning),
];

impl Emphasis {
    pub fn for_category(category: &str) -> Self {
        CATEGORY_KEYWORDS
            .iter()
            .find(|(keyword, _)| category.contains(keyword))
            .map(|(_, emphasis)| *emphasis)
            .unwrap_or(Emphasis::Neutral)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Emphasis::Info => "bg-info",
            Emphasis::Danger => "bg-danger",
            Emphasis::Primary => "bg-primary",
            Emphasis::Success => "bg-success",
            Emphasis::Warning => "bg-warning",
            Emphasis::Neutral => "bg-secondary",
        }
    }
}

/// What the history panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelState {
    /// No staff member selected.
    Prompt,
    Loading,
    Failed(String),
    Empty,
    Loaded(Arc<HistorySnapshot>),
}

impl PanelState {
    pub const PROMPT_MESSAGE: &'static str =
        "👈 Seleccione un docente para ver su historial de permisos";
    pub const EMPTY_MESSAGE: &'static str = "Este docente no tiene permisos registrados";
}
