use serde::{Deserialize, Serialize};

/// Server configuration file (YAML).
///
/// Example `config.yaml`:
/// ```yaml
/// port: 8080
/// keyvault-url: https://my-kv.vault.azure.net
/// storage-account: mystorage
/// storage-container: uploads
/// blob-endpoint: http://127.0.0.1:10000/devstoreaccount1
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfigFile {
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default, alias = "keyvault-url")]
    pub keyvault_url: Option<String>,
    #[serde(default, alias = "storage-account")]
    pub storage_account: Option<String>,
    #[serde(default, alias = "storage-container")]
    pub storage_container: Option<String>,
    /// Overrides the `https://{account}.blob.core.windows.net` endpoint.
    #[serde(default, alias = "blob-endpoint")]
    pub blob_endpoint: Option<String>,
    #[serde(default, alias = "skip-secret-prefetch")]
    pub skip_secret_prefetch: Option<bool>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}
