//! Ambient credentials for Azure data-plane calls.
//!
//! In a pod with workload identity enabled the federated service-account
//! token is exchanged with Microsoft Entra ID; elsewhere the managed identity
//! of the host is used. No secret material is ever read from configuration.

use std::sync::Arc;

use anyhow::anyhow;
use azure_core::credentials::TokenCredential;
use azure_identity::{
    ManagedIdentityCredential, ManagedIdentityCredentialOptions, UserAssignedId,
    WorkloadIdentityCredential,
};
use pkg_constants::azure::{ENV_CLIENT_ID, ENV_FEDERATED_TOKEN_FILE};
use tracing::info;

use crate::error::RemoteError;

/// Pick the credential the environment provides. Workload identity wins
/// when a federated token file is mounted.
pub fn ambient_credential() -> anyhow::Result<Arc<dyn TokenCredential>> {
    if std::env::var_os(ENV_FEDERATED_TOKEN_FILE).is_some() {
        info!("Using workload identity credential");
        let credential = WorkloadIdentityCredential::new(None)
            .map_err(|e| anyhow!("could not create workload identity credential: {e}"))?;
        return Ok(credential);
    }

    let client_id = std::env::var(ENV_CLIENT_ID).ok().filter(|id| !id.is_empty());
    match &client_id {
        Some(id) => info!("Using user-assigned managed identity {}", id),
        None => info!("Using system-assigned managed identity"),
    }
    let options = ManagedIdentityCredentialOptions {
        user_assigned_id: client_id.map(UserAssignedId::ClientId),
        ..Default::default()
    };
    let credential = ManagedIdentityCredential::new(Some(options))
        .map_err(|e| anyhow!("could not create managed identity credential: {e}"))?;
    Ok(credential)
}

/// Bearer token for one scope. Token caching is the credential's concern.
pub(crate) async fn bearer_token(
    credential: &dyn TokenCredential,
    scope: &str,
) -> Result<String, RemoteError> {
    let token = credential
        .get_token(&[scope], None)
        .await
        .map_err(RemoteError::Credential)?;
    Ok(token.token.secret().to_string())
}
