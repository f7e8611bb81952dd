use std::sync::Arc;

use async_trait::async_trait;
use azure_core::credentials::TokenCredential;
use chrono::Utc;
use pkg_constants::azure::{BLOB_API_VERSION, STORAGE_SCOPE, blob_endpoint};
use reqwest::{Method, StatusCode, Url};
use tracing::{debug, error, info, warn};

use crate::BlobStore;
use crate::credential::bearer_token;
use crate::error::{CloudError, RemoteError};
use crate::xml;

/// Blob Storage client bound to one container for its whole lifetime.
pub struct BlobClient {
    http: reqwest::Client,
    endpoint: String,
    account_name: String,
    container_name: String,
    credential: Arc<dyn TokenCredential>,
}

impl BlobClient {
    /// `endpoint` overrides the public `https://{account}.blob.core.windows.net`
    /// address (private endpoints, Azurite).
    pub fn new(
        account_name: impl Into<String>,
        container_name: impl Into<String>,
        endpoint: Option<String>,
        credential: Arc<dyn TokenCredential>,
    ) -> anyhow::Result<Self> {
        let account_name = account_name.into();
        let container_name = container_name.into();
        let endpoint = endpoint.unwrap_or_else(|| blob_endpoint(&account_name));
        info!(
            "Initializing Blob Storage client - endpoint: {}, container: {}",
            endpoint, container_name
        );

        Url::parse(&endpoint)
            .map_err(|e| anyhow::anyhow!("Invalid Blob Storage endpoint {}: {}", endpoint, e))?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create Blob Storage HTTP client: {}", e))?;

        Ok(Self {
            http,
            endpoint,
            account_name,
            container_name,
            credential,
        })
    }

    fn container_url(&self) -> Result<Url, RemoteError> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| RemoteError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| RemoteError::Url(format!("{} cannot be a base", self.endpoint)))?
            .pop_if_empty()
            .push(&self.container_name);
        Ok(url)
    }

    /// Blob names keep `/` as a virtual directory separator; every other
    /// reserved character is percent-encoded. A `.` or `..` segment would be
    /// resolved away by URL normalization and address a different blob, so
    /// such names are refused.
    fn blob_url(&self, name: &str) -> Result<Url, RemoteError> {
        if name.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(RemoteError::Url(format!(
                "blob name '{}' contains a '.' or '..' path segment",
                name
            )));
        }
        let mut url = self.container_url()?;
        url.path_segments_mut()
            .map_err(|_| RemoteError::Url(format!("{} cannot be a base", self.endpoint)))?
            .extend(name.split('/'));
        Ok(url)
    }

    async fn request(&self, method: Method, url: Url) -> Result<reqwest::RequestBuilder, RemoteError> {
        let token = bearer_token(self.credential.as_ref(), STORAGE_SCOPE).await?;
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(token)
            .header("x-ms-version", BLOB_API_VERSION)
            .header("x-ms-date", rfc1123_now()))
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, RemoteError> {
        let resp = req.send().await?;
        if !resp.status().is_success() {
            return Err(RemoteError::from_response(resp).await);
        }
        Ok(resp)
    }

    async fn put_blob(&self, name: &str, content: &str) -> Result<usize, RemoteError> {
        let data = content.as_bytes().to_vec();
        let len = data.len();
        let req = self
            .request(Method::PUT, self.blob_url(name)?)
            .await?
            .header("x-ms-blob-type", "BlockBlob")
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(data);
        self.send(req).await?;
        Ok(len)
    }

    async fn get_blob(&self, name: &str) -> Result<String, RemoteError> {
        let req = self.request(Method::GET, self.blob_url(name)?).await?;
        let bytes = self.send(req).await?.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Follows `NextMarker` until the listing is exhausted.
    async fn list_blobs(&self) -> Result<Vec<String>, RemoteError> {
        let mut names = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let mut url = self.container_url()?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("restype", "container");
                query.append_pair("comp", "list");
                if let Some(m) = &marker {
                    query.append_pair("marker", m);
                }
            }

            let req = self.request(Method::GET, url).await?;
            let body = self.send(req).await?.text().await?;
            names.extend(xml::blob_names(&body));

            match xml::next_marker(&body) {
                Some(next) => marker = Some(next),
                None => break,
            }
        }

        Ok(names)
    }

    async fn head_blob(&self, name: &str) -> Result<bool, RemoteError> {
        let req = self.request(Method::HEAD, self.blob_url(name)?).await?;
        let resp = req.send().await?;
        match resp.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(RemoteError::from_response(resp).await),
        }
    }

    async fn delete_blob(&self, name: &str) -> Result<(), RemoteError> {
        let req = self.request(Method::DELETE, self.blob_url(name)?).await?;
        self.send(req).await.map(|_| ())
    }

    /// Read the container properties.
    pub async fn container_properties(&self) -> Result<(), RemoteError> {
        let mut url = self.container_url()?;
        url.query_pairs_mut().append_pair("restype", "container");
        let req = self.request(Method::GET, url).await?;
        self.send(req).await.map(|_| ())
    }
}

#[async_trait]
impl BlobStore for BlobClient {
    async fn upload(&self, name: &str, content: &str) -> Result<(), CloudError> {
        debug!("Uploading blob: {}", name);
        match self.put_blob(name, content).await {
            Ok(len) => {
                info!("Blob '{}' uploaded ({} bytes)", name, len);
                Ok(())
            }
            Err(e) => {
                error!("Failed to upload blob '{}': {}", name, e);
                Err(CloudError::BlobWrite {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn download(&self, name: &str) -> Result<String, CloudError> {
        debug!("Downloading blob: {}", name);
        match self.get_blob(name).await {
            Ok(content) => {
                info!("Blob '{}' downloaded ({} bytes)", name, content.len());
                Ok(content)
            }
            Err(e) if e.is_not_found() => {
                warn!("Blob '{}' not found", name);
                Err(CloudError::BlobNotFound {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
            Err(e) => {
                error!("Failed to download blob '{}': {}", name, e);
                Err(CloudError::BlobRead {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn list(&self) -> Result<Vec<String>, CloudError> {
        debug!("Listing blobs in container: {}", self.container_name);
        match self.list_blobs().await {
            Ok(names) => {
                info!("Found {} blobs in container {}", names.len(), self.container_name);
                Ok(names)
            }
            Err(e) => {
                error!("Failed to list blobs: {}", e);
                Err(CloudError::BlobList {
                    container: self.container_name.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn exists(&self, name: &str) -> bool {
        match self.head_blob(name).await {
            Ok(exists) => {
                debug!("Blob '{}' exists: {}", name, exists);
                exists
            }
            Err(e) => {
                error!("Failed to check blob '{}': {}", name, e);
                false
            }
        }
    }

    async fn delete(&self, name: &str) -> Result<(), CloudError> {
        debug!("Deleting blob: {}", name);
        match self.delete_blob(name).await {
            Ok(()) => {
                info!("Blob '{}' deleted", name);
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete blob '{}': {}", name, e);
                Err(CloudError::BlobDelete {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn is_healthy(&self) -> bool {
        match self.container_properties().await {
            Ok(()) => {
                info!("Blob Storage health check OK");
                true
            }
            Err(e) => {
                error!("Blob Storage health check FAILED: {}", e);
                false
            }
        }
    }

    fn account_name(&self) -> &str {
        &self.account_name
    }

    fn container_name(&self) -> &str {
        &self.container_name
    }
}

/// `x-ms-date` value, e.g. `Tue, 06 Oct 2026 08:49:37 GMT`.
fn rfc1123_now() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
