//! Where permission history comes from.
//!
//! [`HttpHistorySource`] talks to the real endpoint through reqwest (which
//! uses `fetch` when compiled for the browser). Tests substitute their own
//! [`HistorySource`].

use tracing::{debug, warn};
use url::Url;

use super::types::HistoryResponse;
use crate::error::FetchError;

/// Loads the permission history for one staff member.
///
/// Implementations only report transport-level outcomes; interpreting the
/// envelope (`success`, `total`) is the controller's job.
#[allow(async_fn_in_trait)]
pub trait HistorySource {
    async fn fetch_history(&self, staff_id: &str) -> Result<HistoryResponse, FetchError>;
}

/// Build `{base}/{staff_id}` with the id percent-encoded as one path segment.
pub fn history_url(base: &Url, staff_id: &str) -> Result<Url, FetchError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&urlencoding::encode(staff_id))
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", staff_id, e)))
}

pub struct HttpHistorySource {
    client: reqwest::Client,
    base: Url,
}

impl HttpHistorySource {
    /// `api_base` may be absolute, or a path resolved against `origin`
    /// (e.g. `window.location.origin` in the browser).
    pub fn new(origin: &str, api_base: &str) -> Result<Self, FetchError> {
        let base = match Url::parse(api_base) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(origin)
                .and_then(|o| o.join(api_base))
                .map_err(|e| FetchError::InvalidUrl(format!("{}{}: {}", origin, api_base, e)))?,
            Err(e) => return Err(FetchError::InvalidUrl(format!("{}: {}", api_base, e))),
        };

        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }
}

impl HistorySource for HttpHistorySource {
    async fn fetch_history(&self, staff_id: &str) -> Result<HistoryResponse, FetchError> {
        let url = history_url(&self.base, staff_id)?;
        debug!("Fetching permission history from {}", url);

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!("History request to {} failed: {}", url, e);
                FetchError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("History request to {} returned {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        response.json::<HistoryResponse>().await.map_err(|e| {
            warn!("History response from {} could not be decoded: {}", url, e);
            FetchError::Decode(e.to_string())
        })
    }
}
