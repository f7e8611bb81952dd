use std::pin::pin;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use azure_security_keyvault_secrets::SecretClient;
use azure_security_keyvault_secrets::models::Secret;
use futures::TryStreamExt;
use tracing::{debug, error, info};

use crate::SecretVault;
use crate::error::{CloudError, RemoteError};

/// Key Vault secrets client. Values are never cached: every read goes to
/// the vault.
pub struct VaultClient {
    client: SecretClient,
    vault_url: String,
}

impl VaultClient {
    pub fn new(
        vault_url: impl Into<String>,
        credential: Arc<dyn TokenCredential>,
    ) -> anyhow::Result<Self> {
        let vault_url = vault_url.into();
        info!("Initializing Key Vault client for {}", vault_url);

        let client = SecretClient::new(&vault_url, credential, None)
            .map_err(|e| anyhow!("Failed to create Key Vault client for {}: {}", vault_url, e))?;

        Ok(Self { client, vault_url })
    }

    async fn fetch_secret(&self, name: &str) -> Result<String, RemoteError> {
        let secret: Secret = self.client.get_secret(name, None).await?.into_body()?;
        secret
            .value
            .ok_or_else(|| RemoteError::Body("secret has no value".to_string()))
    }

    /// Read the first page of secret metadata. Values are not requested.
    pub async fn list_first_secret(&self) -> Result<(), RemoteError> {
        let mut pager = pin!(self.client.list_secret_properties(None)?);
        pager.try_next().await?;
        Ok(())
    }
}

#[async_trait]
impl SecretVault for VaultClient {
    async fn get_secret(&self, name: &str) -> Result<String, CloudError> {
        debug!("Fetching secret: {}", name);
        match self.fetch_secret(name).await {
            Ok(value) => {
                info!("Secret '{}' fetched", name);
                Ok(value)
            }
            Err(e) => {
                error!("Failed to fetch secret '{}': {}", name, e);
                Err(CloudError::SecretUnavailable {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn is_healthy(&self) -> bool {
        match self.list_first_secret().await {
            Ok(()) => {
                info!("Key Vault health check OK");
                true
            }
            Err(e) => {
                error!("Key Vault health check FAILED: {}", e);
                false
            }
        }
    }

    fn endpoint_url(&self) -> &str {
        &self.vault_url
    }
}
