use aoa_core::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod serpapi;

/// Parameters for one main search call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub location: String,
    /// Country (`gl`).
    pub country: String,
    /// Interface language (`hl`).
    pub language: String,
    pub no_cache: bool,
}

/// The two search calls an audit unit needs. Responses are returned as raw JSON; all shape
/// handling happens in `aoa_core::extract`.
pub trait SearchApi {
    fn search(&self, request: &SearchRequest) -> Result<Value, AppError>;

    /// Follow an AI Overview continuation token.
    fn ai_overview_detail(&self, page_token: &str, no_cache: bool) -> Result<Value, AppError>;
}

impl<T: SearchApi + ?Sized> SearchApi for &T {
    fn search(&self, request: &SearchRequest) -> Result<Value, AppError> {
        (**self).search(request)
    }

    fn ai_overview_detail(&self, page_token: &str, no_cache: bool) -> Result<Value, AppError> {
        (**self).ai_overview_detail(page_token, no_cache)
    }
}
