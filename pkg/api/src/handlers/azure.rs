use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;
use pkg_constants::network::SERVICE_NAME;
use pkg_constants::secrets::{DB_PASSWORD_SECRET, DB_USER_SECRET, MASK, MASK_VISIBLE_CHARS};
use pkg_types::azure::{
    BlobStorageHealth, DbConfigResponse, ErrorResponse, HealthReport, HealthStatus,
    KeyVaultHealth, SecretResponse,
};
use tracing::{error, info};

use crate::AppState;

/// GET /azure/health — check Key Vault, then Blob Storage.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let vault_healthy = state.vault.is_healthy().await;
    let blob_healthy = state.blobs.is_healthy().await;
    let status = HealthStatus::from_checks(vault_healthy, blob_healthy);

    let report = HealthReport {
        timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        service: SERVICE_NAME.to_string(),
        key_vault: KeyVaultHealth {
            url: state.vault.endpoint_url().to_string(),
            healthy: vault_healthy,
        },
        blob_storage: BlobStorageHealth {
            account_name: state.blobs.account_name().to_string(),
            container_name: state.blobs.container_name().to_string(),
            healthy: blob_healthy,
        },
        status,
    };

    let code = match status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(report))
}

/// GET /azure/secrets/:name — return a secret's raw value.
pub async fn get_secret(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match state.vault.get_secret(&name).await {
        Ok(value) => (
            StatusCode::OK,
            Json(SecretResponse {
                secret_name: name,
                value,
                message: "Secret fetched successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::for_secret(&name, e.to_string())),
        )
            .into_response(),
    }
}

/// GET /azure/config — database credentials with the password masked.
pub async fn db_config(State(state): State<AppState>) -> impl IntoResponse {
    let creds = async {
        let user = state.vault.get_secret(DB_USER_SECRET).await?;
        let password = state.vault.get_secret(DB_PASSWORD_SECRET).await?;
        Ok::<_, pkg_cloud::CloudError>((user, password))
    };

    match creds.await {
        Ok((db_user, password)) => {
            info!("Serving database config for user {}", db_user);
            (
                StatusCode::OK,
                Json(DbConfigResponse {
                    db_user,
                    db_password: mask_password(Some(&password)),
                    message: "Configuration loaded from Key Vault".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to load database config: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Keep the first two characters and hide the rest. Values of two
/// characters or fewer, and absent values, are hidden entirely.
pub fn mask_password(password: Option<&str>) -> String {
    match password {
        Some(p) if p.chars().count() > MASK_VISIBLE_CHARS => {
            let visible: String = p.chars().take(MASK_VISIBLE_CHARS).collect();
            format!("{}{}", visible, MASK)
        }
        _ => MASK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_values_are_fully_masked() {
        assert_eq!(mask_password(None), "***");
        assert_eq!(mask_password(Some("")), "***");
        assert_eq!(mask_password(Some("a")), "***");
        assert_eq!(mask_password(Some("ab")), "***");
    }

    #[test]
    fn longer_values_keep_two_characters() {
        assert_eq!(mask_password(Some("abc")), "ab***");
        assert_eq!(mask_password(Some("abcdef")), "ab***");
    }

    #[test]
    fn masking_counts_characters_not_bytes() {
        assert_eq!(mask_password(Some("żó")), "***");
        assert_eq!(mask_password(Some("żółw")), "żó***");
    }
}
