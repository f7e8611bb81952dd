//! Clients for the two Azure services the greeting service talks to:
//! Key Vault secrets and a single Blob Storage container.
//!
//! Handlers only see the [`SecretVault`] and [`BlobStore`] traits. The REST
//! implementations ([`VaultClient`], [`BlobClient`]) authenticate with an
//! `azure_core` token credential; [`memory`] holds in-process backends.

pub mod blob;
pub mod credential;
pub mod error;
pub mod memory;
pub mod vault;

mod xml;

use async_trait::async_trait;

pub use blob::BlobClient;
pub use credential::ambient_credential;
pub use error::{CloudError, RemoteError};
pub use vault::VaultClient;

/// Read access to a secrets vault.
#[async_trait]
pub trait SecretVault: Send + Sync {
    /// Fetch the latest version of a secret. Every call is a remote round-trip.
    async fn get_secret(&self, name: &str) -> Result<String, CloudError>;

    /// `true` iff secret metadata can be listed. Never fails.
    async fn is_healthy(&self) -> bool;

    /// Configured vault address.
    fn endpoint_url(&self) -> &str;
}

/// Operations on one fixed blob container.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `content` as UTF-8, replacing any existing blob of that name.
    async fn upload(&self, name: &str, content: &str) -> Result<(), CloudError>;

    /// Read the whole blob as text.
    async fn download(&self, name: &str) -> Result<String, CloudError>;

    /// Every blob name in the container.
    async fn list(&self) -> Result<Vec<String>, CloudError>;

    /// Transport failures read as `false`.
    async fn exists(&self, name: &str) -> bool;

    /// Deleting a missing blob is an error.
    async fn delete(&self, name: &str) -> Result<(), CloudError>;

    /// `true` iff the container properties can be read. Never fails.
    async fn is_healthy(&self) -> bool;

    fn account_name(&self) -> &str;

    fn container_name(&self) -> &str;
}
