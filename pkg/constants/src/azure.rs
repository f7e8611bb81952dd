//! Azure endpoints, API versions, and default resource names.

// ─── Key Vault ────────────────────────────────────────────────────────────

/// Default Key Vault address.
pub const DEFAULT_KEYVAULT_URL: &str = "https://hycomcminternal-kv.vault.azure.net";

// ─── Blob Storage ─────────────────────────────────────────────────────────

/// Default storage account name.
pub const DEFAULT_STORAGE_ACCOUNT: &str = "hycomcminternal";

/// Default blob container name.
pub const DEFAULT_STORAGE_CONTAINER: &str = "test-container-dev";

/// Blob REST API version (`x-ms-version`). Bearer auth needs 2017-11-09 or newer.
pub const BLOB_API_VERSION: &str = "2023-11-03";

/// OAuth2 scope for Blob Storage data-plane calls.
pub const STORAGE_SCOPE: &str = "https://storage.azure.com/.default";

/// Public blob endpoint for an account.
pub fn blob_endpoint(account: &str) -> String {
    format!("https://{}.blob.core.windows.net", account)
}

// ─── Environment ──────────────────────────────────────────────────────────

/// Client id of a user-assigned managed identity.
pub const ENV_CLIENT_ID: &str = "AZURE_CLIENT_ID";

/// Set by the workload identity webhook when a federated token is mounted.
pub const ENV_FEDERATED_TOKEN_FILE: &str = "AZURE_FEDERATED_TOKEN_FILE";
