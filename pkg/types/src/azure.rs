//! JSON bodies served by the `/azure` endpoints.

use serde::{Deserialize, Serialize};

/// Aggregate health of the two cloud backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Degraded,
}

impl HealthStatus {
    /// `Up` only when every backend reported healthy.
    pub fn from_checks(vault_healthy: bool, blob_healthy: bool) -> Self {
        if vault_healthy && blob_healthy {
            HealthStatus::Up
        } else {
            HealthStatus::Degraded
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyVaultHealth {
    pub url: String,
    pub healthy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobStorageHealth {
    pub account_name: String,
    pub container_name: String,
    pub healthy: bool,
}

/// Body of `GET /azure/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub timestamp: String,
    pub service: String,
    pub key_vault: KeyVaultHealth,
    pub blob_storage: BlobStorageHealth,
    pub status: HealthStatus,
}

/// Body of `GET /azure/secrets/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretResponse {
    pub secret_name: String,
    pub value: String,
    pub message: String,
}

/// Body of `GET /azure/config`. The password is always masked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbConfigResponse {
    pub db_user: String,
    pub db_password: String,
    pub message: String,
}

/// Body of `POST /azure/blobs/{name}`. `size` is the character count, sent as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobUploadResponse {
    pub blob_name: String,
    pub size: String,
    pub message: String,
}

/// Body of `GET /azure/blobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobListResponse {
    pub container_name: String,
    pub count: usize,
    pub blobs: Vec<String>,
}

/// Body of `DELETE /azure/blobs/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobDeleteResponse {
    pub blob_name: String,
    pub message: String,
}

/// Failure body shared by the `/azure` endpoints. Only the name relevant to
/// the endpoint is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_name: Option<String>,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Default::default()
        }
    }

    pub fn for_secret(name: &str, error: impl Into<String>) -> Self {
        Self {
            secret_name: Some(name.to_string()),
            ..Self::new(error)
        }
    }

    pub fn for_blob(name: &str, error: impl Into<String>) -> Self {
        Self {
            blob_name: Some(name.to_string()),
            ..Self::new(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_up_only_when_both_healthy() {
        assert_eq!(HealthStatus::from_checks(true, true), HealthStatus::Up);
        assert_eq!(HealthStatus::from_checks(true, false), HealthStatus::Degraded);
        assert_eq!(HealthStatus::from_checks(false, true), HealthStatus::Degraded);
        assert_eq!(HealthStatus::from_checks(false, false), HealthStatus::Degraded);
    }

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&HealthStatus::Up).unwrap(), "\"UP\"");
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"DEGRADED\""
        );
    }

    #[test]
    fn error_body_only_carries_its_own_name() {
        let v = serde_json::to_value(ErrorResponse::for_blob("a.txt", "boom")).unwrap();
        assert_eq!(v, serde_json::json!({"blobName": "a.txt", "error": "boom"}));

        let v = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(v, serde_json::json!({"error": "boom"}));
    }
}
