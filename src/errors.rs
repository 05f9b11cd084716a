use serde_json::Value;
use thiserror::Error;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("Configuration Error: Invalid base URL: {0}")]
    BaseUrlInvalid(#[from] UrlParseError),

    #[error("Configuration Error: Failed to build HTTP client: {0}")]
    HttpClientBuildFailed(reqwest::Error),

    #[error("Request Error: Failed to build or send the request: {0}")]
    RequestFailed(reqwest::Error),

    #[error("Network Error: Connection or timeout issue: {0}")]
    NetworkIssue(reqwest::Error),

    #[error("API Error: Server responded with status {status}: {message}")]
    Api {
        // Server responded with non-2xx
        status: u16,
        message: String, // The body's `error` field, or the HTTP status text
        details: Value,  // The parsed error body, `{}` when it was not JSON
    },

    #[error("Response Error: Failed to deserialize response body: {source}. Body snippet: '{body_snippet}'")]
    DeserializationFailed {
        // Failed to parse the 2xx response
        source: serde_json::Error,
        body_snippet: String, // A snippet of the body for debugging
    },
}

impl ApiClientError {
    /// Returns true only for an API error with status 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiClientError::Api { status: 404, .. })
    }

    /// Returns true only for an API error with status 400 Bad Request.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, ApiClientError::Api { status: 400, .. })
    }

    /// Returns true only for an API error with status 500 Internal Server Error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ApiClientError::Api { status: 500, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_error(status: u16) -> ApiClientError {
        ApiClientError::Api {
            status,
            message: "boom".to_string(),
            details: json!({}),
        }
    }

    #[test]
    fn predicates_match_their_exact_status() {
        assert!(api_error(404).is_not_found());
        assert!(api_error(400).is_bad_request());
        assert!(api_error(500).is_server_error());
    }

    #[test]
    fn predicates_reject_other_statuses() {
        assert!(!api_error(404).is_bad_request());
        assert!(!api_error(404).is_server_error());
        assert!(!api_error(400).is_not_found());
        assert!(!api_error(503).is_server_error());
        assert!(!api_error(410).is_not_found());
    }

    #[test]
    fn predicates_reject_non_api_variants() {
        let err = ApiClientError::BaseUrlInvalid(url::ParseError::EmptyHost);
        assert!(!err.is_not_found());
        assert!(!err.is_bad_request());
        assert!(!err.is_server_error());
    }
}
