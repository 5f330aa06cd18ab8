//! JSON-over-HTTP helpers on top of `gloo-net`
//!
//! Every helper takes an API path ("/api/..."), resolves it with `api_url`
//! and returns [`ApiError`] on transport failure, non-success status or a
//! malformed body. There is no retry: the error goes straight to the caller.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use super::api_utils::api_url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to send request: {0}")]
    Network(String),

    #[error("Not found")]
    NotFound,

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Failed to serialize request: {0}")]
    Serialize(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Map a non-success response to an error, keeping the server's reason
    pub fn from_status(status: u16, status_text: &str, body: &str) -> Self {
        if status == 404 {
            return ApiError::NotFound;
        }
        let reason = extract_reason(body)
            .or_else(|| Some(status_text.trim().to_string()).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "Request failed".to_string());
        ApiError::Status { status, reason }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// Error text from a response body: `{"error": ..}`, `{"message": ..}` or plain text
fn extract_reason(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message", "detail"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return Some(text.to_string());
            }
        }
        return Some(value.to_string());
    }
    Some(body.chars().take(300).collect())
}

/// Append a serialized query string to a path; empty queries leave it unchanged
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Serialize(e.to_string()))?;
    if qs.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, qs))
    }
}

async fn send<B: Serialize>(
    method: &'static str,
    path: &str,
    builder: RequestBuilder,
    body: Option<&B>,
) -> Result<Response, ApiError> {
    let builder = builder.header("Accept", "application/json");
    let sent = match body {
        Some(body) => {
            let request: Request = builder
                .json(body)
                .map_err(|e| ApiError::Serialize(e.to_string()))?;
            request.send().await
        }
        None => builder.send().await,
    };

    let result = match sent {
        Ok(response) if response.ok() => Ok(response),
        Ok(response) => {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(
                response.status(),
                &response.status_text(),
                &body,
            ))
        }
        Err(e) => Err(ApiError::Network(e.to_string())),
    };

    if let Err(e) = &result {
        log::error!("{} {} failed: {}", method, path, e);
    }
    result
}

async fn decode<T: DeserializeOwned>(
    method: &'static str,
    path: &str,
    response: Response,
) -> Result<T, ApiError> {
    let body = response.text().await.map_err(|e| {
        let err = ApiError::Decode(e.to_string());
        log::error!("{} {} failed: {}", method, path, err);
        err
    })?;
    parse_body(method, path, &body)
}

fn parse_body<T: DeserializeOwned>(method: &str, path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        let err = ApiError::Decode(e.to_string());
        log::error!("{} {} failed: {}", method, path, err);
        err
    })
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let url = api_url(path);
    let response = send::<()>("GET", path, Request::get(&url), None).await?;
    decode("GET", path, response).await
}

pub async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let url = api_url(path);
    let response = send("POST", path, Request::post(&url), Some(body)).await?;
    decode("POST", path, response).await
}

pub async fn put_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let url = api_url(path);
    let response = send("PUT", path, Request::put(&url), Some(body)).await?;
    decode("PUT", path, response).await
}

pub async fn patch_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let url = api_url(path);
    let response = send("PATCH", path, Request::patch(&url), Some(body)).await?;
    decode("PATCH", path, response).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let url = api_url(path);
    send::<()>("DELETE", path, Request::delete(&url), None).await?;
    Ok(())
}
