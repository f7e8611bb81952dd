use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by [`SecretVault`](crate::SecretVault) and
/// [`BlobStore`](crate::BlobStore) operations. The message is what HTTP
/// clients get to see.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Cannot fetch secret '{name}': {reason}")]
    SecretUnavailable { name: String, reason: String },

    #[error("Cannot upload blob '{name}': {reason}")]
    BlobWrite { name: String, reason: String },

    #[error("Blob '{name}' does not exist: {reason}")]
    BlobNotFound { name: String, reason: String },

    #[error("Cannot download blob '{name}': {reason}")]
    BlobRead { name: String, reason: String },

    #[error("Cannot list blobs in container '{container}': {reason}")]
    BlobList { container: String, reason: String },

    #[error("Cannot delete blob '{name}': {reason}")]
    BlobDelete { name: String, reason: String },
}

/// A single failed call against a remote service.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("authentication failed: {0}")]
    Credential(#[source] azure_core::Error),

    #[error("{0}")]
    Azure(#[from] azure_core::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid URL: {0}")]
    Url(String),

    #[error("unexpected response: {0}")]
    Body(String),
}

impl RemoteError {
    pub fn is_not_found(&self) -> bool {
        match self {
            RemoteError::Status { status, .. } => *status == StatusCode::NOT_FOUND.as_u16(),
            RemoteError::Azure(e) => {
                matches!(e.http_status(), Some(code) if code == StatusCode::NOT_FOUND.as_u16())
            }
            _ => false,
        }
    }

    /// Build a `Status` error from a non-success response, keeping the
    /// service's own error message when the body carries one.
    pub(crate) async fn from_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let message = summarize_error_body(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
        RemoteError::Status {
            status: status.as_u16(),
            message,
        }
    }
}

/// Blob Storage answers `<Error><Message>..</Message></Error>`.
fn summarize_error_body(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    if let Some(msg) = crate::xml::element_text(body, "Message") {
        return Some(crate::xml::unescape(msg).trim().to_string());
    }
    Some(body.chars().take(256).collect())
}
