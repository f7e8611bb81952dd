//! In-process [`SecretVault`] and [`BlobStore`] backends.
//!
//! Both can be switched "offline" to emulate an unreachable service: every
//! operation then fails the way the REST clients fail on a transport error.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CloudError;
use crate::{BlobStore, SecretVault};

const OFFLINE: &str = "service unreachable";

pub struct MemoryVault {
    url: String,
    secrets: RwLock<HashMap<String, String>>,
    online: AtomicBool,
}

impl MemoryVault {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            secrets: RwLock::new(HashMap::new()),
            online: AtomicBool::new(true),
        }
    }

    pub fn with_secret(mut self, name: &str, value: &str) -> Self {
        self.secrets
            .get_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    pub async fn set_secret(&self, name: &str, value: &str) {
        self.secrets
            .write()
            .await
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretVault for MemoryVault {
    async fn get_secret(&self, name: &str) -> Result<String, CloudError> {
        let unavailable = |reason: &str| CloudError::SecretUnavailable {
            name: name.to_string(),
            reason: reason.to_string(),
        };
        if !self.is_online() {
            return Err(unavailable(OFFLINE));
        }
        self.secrets
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| unavailable("secret not found"))
    }

    async fn is_healthy(&self) -> bool {
        self.is_online()
    }

    fn endpoint_url(&self) -> &str {
        &self.url
    }
}

pub struct MemoryBlobStore {
    account_name: String,
    container_name: String,
    blobs: RwLock<BTreeMap<String, String>>,
    online: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new(account_name: impl Into<String>, container_name: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            container_name: container_name.into(),
            blobs: RwLock::new(BTreeMap::new()),
            online: AtomicBool::new(true),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, name: &str, content: &str) -> Result<(), CloudError> {
        if !self.is_online() {
            return Err(CloudError::BlobWrite {
                name: name.to_string(),
                reason: OFFLINE.to_string(),
            });
        }
        self.blobs
            .write()
            .await
            .insert(name.to_string(), content.to_string());
        Ok(())
    }

    async fn download(&self, name: &str) -> Result<String, CloudError> {
        if !self.is_online() {
            return Err(CloudError::BlobRead {
                name: name.to_string(),
                reason: OFFLINE.to_string(),
            });
        }
        self.blobs
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| CloudError::BlobNotFound {
                name: name.to_string(),
                reason: "The specified blob does not exist.".to_string(),
            })
    }

    async fn list(&self) -> Result<Vec<String>, CloudError> {
        if !self.is_online() {
            return Err(CloudError::BlobList {
                container: self.container_name.clone(),
                reason: OFFLINE.to_string(),
            });
        }
        Ok(self.blobs.read().await.keys().cloned().collect())
    }

    async fn exists(&self, name: &str) -> bool {
        self.is_online() && self.blobs.read().await.contains_key(name)
    }

    async fn delete(&self, name: &str) -> Result<(), CloudError> {
        let reason = if !self.is_online() {
            OFFLINE
        } else if self.blobs.write().await.remove(name).is_some() {
            return Ok(());
        } else {
            "The specified blob does not exist."
        };
        Err(CloudError::BlobDelete {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    }

    async fn is_healthy(&self) -> bool {
        self.is_online()
    }

    fn account_name(&self) -> &str {
        &self.account_name
    }

    fn container_name(&self) -> &str {
        &self.container_name
    }
}
