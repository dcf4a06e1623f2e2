use thiserror::Error;

use crate::guard::RequiredField;

/// Why a date string could not be turned into a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("empty date")]
    Empty,

    #[error("expected {expected} date components in '{input}'")]
    Components { input: String, expected: usize },

    #[error("non-numeric date component '{component}' in '{input}'")]
    NotNumeric { input: String, component: String },

    #[error("no such calendar day: '{0}'")]
    OutOfRange(String),
}

/// Failure while loading a staff member's permission history.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid history URL: {0}")]
    InvalidUrl(String),

    /// The endpoint answered but reported `success: false`.
    #[error("{}", .0.as_deref().unwrap_or(SERVER_FALLBACK))]
    Server(Option<String>),
}

pub(crate) const SERVER_FALLBACK: &str = "Error al cargar los permisos";
const CONNECTION_MESSAGE: &str = "Error de conexión con el servidor";

impl FetchError {
    /// Message shown in the panel's alert region.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Server(Some(msg)) if !msg.trim().is_empty() => msg.clone(),
            FetchError::Server(_) => SERVER_FALLBACK.to_string(),
            FetchError::Status(code) => format!("{} (HTTP {})", CONNECTION_MESSAGE, code),
            FetchError::Transport(_) | FetchError::Decode(_) | FetchError::InvalidUrl(_) => {
                CONNECTION_MESSAGE.to_string()
            }
        }
    }
}

/// A reason the submission guard stopped the native form submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{}", .0.message())]
    MissingField(RequiredField),

    #[error("❌ Error: la fecha {field} no es válida ({source})")]
    InvalidDate {
        field: &'static str,
        source: DateParseError,
    },

    #[error("❌ Error: La fecha fin no puede ser anterior a la fecha inicio")]
    EndBeforeStart,

    #[error("overlap with an existing permission was not confirmed")]
    OverlapDeclined,
}

impl Rejection {
    /// Whether the user must be told about this rejection. A declined
    /// confirmation was the user's own answer, so nothing is shown.
    pub fn needs_alert(&self) -> bool {
        !matches!(self, Rejection::OverlapDeclined)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Invalid(String),
}

impl From<ConfigError> for String {
    fn from(err: ConfigError) -> Self {
        err.to_string()
    }
}
