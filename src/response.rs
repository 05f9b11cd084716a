use std::future::Future;

use serde_json::{Map, Value};

use crate::errors::ApiClientError;

/// Minimal view of an HTTP response: a success flag, the numeric status,
/// the status text, and a one-shot body read. Implemented for
/// `reqwest::Response`; tests provide their own fakes.
pub trait RawResponse: Sized {
    fn is_success(&self) -> bool;
    fn status(&self) -> u16;
    fn status_text(&self) -> String;
    fn into_body(self) -> impl Future<Output = Result<String, ApiClientError>> + Send;
}

impl RawResponse for reqwest::Response {
    fn is_success(&self) -> bool {
        self.status().is_success()
    }

    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    fn status_text(&self) -> String {
        reqwest::Response::status(self)
            .canonical_reason()
            .unwrap_or_default()
            .to_string()
    }

    async fn into_body(self) -> Result<String, ApiClientError> {
        self.text().await.map_err(ApiClientError::RequestFailed)
    }
}

/// Turns a response into its deserialized body, or into
/// [`ApiClientError::Api`] when the server reported a failure.
///
/// On a failed response the body is parsed as JSON to recover the server's
/// `error` message; a body that cannot be read or parsed is replaced by an
/// empty object so the status-based error is never masked.
pub async fn handle_response<T, R>(response: R) -> Result<T, ApiClientError>
where
    T: serde::de::DeserializeOwned,
    R: RawResponse,
{
    if response.is_success() {
        let body = response.into_body().await?;
        return serde_json::from_str(&body).map_err(|source| {
            ApiClientError::DeserializationFailed {
                source,
                body_snippet: snippet(&body),
            }
        });
    }

    let status = response.status();
    let status_text = response.status_text();
    // An unreadable body is treated like an empty one; the status-based
    // failure must never be masked by a secondary read or parse error.
    let body = response.into_body().await.unwrap_or_default();
    let details: Value =
        serde_json::from_str(&body).unwrap_or_else(|_| Value::Object(Map::new()));
    let message = match details.get("error") {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        _ => status_text,
    };
    tracing::error!(
        "Request failed with status {}: {} | body: {}",
        status,
        message,
        snippet(&body)
    );
    Err(ApiClientError::Api {
        status,
        message,
        details,
    })
}

fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // The cut must land on a char boundary or the slice panics.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...[truncated]", &body[..cut])
}
