use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Page-level settings. Every field has a default so the host page only
/// needs to provide the values it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path (or absolute URL) of the history endpoint, without the staff id.
    pub api_base: String,
    /// Query parameter that pre-selects a staff member on page load.
    pub query_param: String,
    /// Deferral before the query-parameter auto-load runs.
    pub autoload_delay_ms: u64,
    /// Keep the last successfully fetched records for overlap checks when a
    /// later fetch fails.
    pub retain_records_on_error: bool,
    /// Drop responses for requests that were superseded by a newer selection.
    pub ignore_stale_responses: bool,
    /// Leave the submit control disabled for the lifetime of the page once a
    /// submission was released.
    pub lock_submit_after_send: bool,
    pub sending_label: String,
    pub ready_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "/permisos/api/permisos-docente".to_string(),
            query_param: "docente_id".to_string(),
            autoload_delay_ms: 100,
            retain_records_on_error: true,
            ignore_stale_responses: true,
            lock_submit_after_send: true,
            sending_label: "Enviando...".to_string(),
            ready_label: "Registrar permiso".to_string(),
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.trim().is_empty() {
            return Err(ConfigError::Invalid("api_base must not be empty".into()));
        }
        if self.query_param.trim().is_empty() {
            return Err(ConfigError::Invalid("query_param must not be empty".into()));
        }
        Ok(())
    }

    pub fn autoload_delay(&self) -> Duration {
        Duration::from_millis(self.autoload_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_contract() {
        let config = Config::default();
        assert_eq!(config.api_base, "/permisos/api/permisos-docente");
        assert_eq!(config.query_param, "docente_id");
        assert_eq!(config.autoload_delay(), Duration::from_millis(100));
        assert!(config.retain_records_on_error);
        assert!(config.lock_submit_after_send);
        assert!(config.ignore_stale_responses);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config =
            Config::from_json(r#"{"lock_submit_after_send": false, "autoload_delay_ms": 0}"#)
                .unwrap();
        assert!(!config.lock_submit_after_send);
        assert_eq!(config.autoload_delay_ms, 0);
        assert_eq!(config.api_base, Config::default().api_base);
    }

    #[test]
    fn test_blank_json_is_default() {
        assert_eq!(Config::from_json("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_rejects_bad_override() {
        assert!(matches!(
            Config::from_json(r#"{"api_base": ""}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
