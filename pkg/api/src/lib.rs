pub mod handlers;
pub mod prefetch;
pub mod request_id;
pub mod server;

use std::sync::Arc;

use pkg_cloud::{BlobStore, SecretVault};

/// Shared application state injected into all Axum handlers.
///
/// Both clients are built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub vault: Arc<dyn SecretVault>,
    pub blobs: Arc<dyn BlobStore>,
}
