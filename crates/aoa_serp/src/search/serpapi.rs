use std::time::Duration;

use aoa_core::error::AppError;
use serde_json::Value;

use super::{SearchApi, SearchRequest};

pub const DEFAULT_BASE_URL: &str = "https://serpapi.com/search.json";

const SEARCH_ENGINE: &str = "google";
const DETAIL_ENGINE: &str = "google_ai_overview";

#[derive(Debug, Clone)]
pub struct SerpApiClient {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl SerpApiClient {
    /// Create a SerpAPI client. The base URL must be http(s) and the key non-empty.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(AppError::new(
                "SERP_INVALID_BASE_URL",
                "Search API base URL must be http(s)",
            )
            .with_details(format!("base_url={base_url}")));
        }
        if api_key.trim().is_empty() {
            return Err(AppError::new(
                "CONFIG_API_KEY_MISSING",
                "Search API key is empty",
            ));
        }
        Ok(Self {
            base_url,
            api_key: api_key.trim().to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Transport errors echo the request URL, which carries the key. Error bodies may too.
    fn redact(&self, text: &str) -> String {
        text.replace(&self.api_key, "[redacted]")
    }

    fn get(&self, params: &[(&str, &str)]) -> Result<Value, AppError> {
        let mut req = ureq::get(&self.base_url).timeout(self.timeout);
        for (k, v) in params {
            req = req.query(k, v);
        }
        req = req.query("api_key", &self.api_key);

        match req.call() {
            Ok(r) => {
                let v: Value = r.into_json().map_err(|e| {
                    AppError::new("SERP_DECODE_FAILED", "Failed to decode search response")
                        .with_details(e.to_string())
                })?;
                if let Some(message) = v.get("error").and_then(Value::as_str) {
                    tracing::warn!(%message, "search API reported an error in a successful response");
                }
                Ok(v)
            }
            Err(ureq::Error::Status(status, r)) => {
                let body = r.into_string().unwrap_or_default();
                Err(AppError::new("SERP_HTTP_STATUS", "Search request failed")
                    .with_details(self.redact(&format!("status={status}; body={body}")))
                    .with_retryable(status == 429 || status >= 500))
            }
            Err(e) => Err(AppError::new(
                "SERP_REQUEST_FAILED",
                "Failed to reach the search API",
            )
            .with_details(self.redact(&e.to_string()))
            .with_retryable(true)),
        }
    }
}

fn no_cache_param(no_cache: bool) -> &'static str {
    if no_cache {
        "true"
    } else {
        "false"
    }
}

impl SearchApi for SerpApiClient {
    fn search(&self, request: &SearchRequest) -> Result<Value, AppError> {
        self.get(&[
            ("engine", SEARCH_ENGINE),
            ("q", &request.query),
            ("location", &request.location),
            ("gl", &request.country),
            ("hl", &request.language),
            ("no_cache", no_cache_param(request.no_cache)),
        ])
    }

    fn ai_overview_detail(&self, page_token: &str, no_cache: bool) -> Result<Value, AppError> {
        self.get(&[
            ("engine", DETAIL_ENGINE),
            ("page_token", page_token),
            ("no_cache", no_cache_param(no_cache)),
        ])
    }
}
