use permisos_core::{Config, HttpHistorySource};
use web_sys::Window;

/// History endpoint client rooted at the page's own origin.
pub fn history_source(window: &Window, config: &Config) -> Result<HttpHistorySource, String> {
    let origin = window
        .location()
        .origin()
        .map_err(|e| format!("Failed to read page origin: {:?}", e))?;

    HttpHistorySource::new(&origin, &config.api_base).map_err(|e| e.to_string())
}
