use axum::{Router, extract::DefaultBodyLimit, middleware, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::AppState;
use crate::handlers::{azure, blobs, greeting};
use crate::prefetch::prefetch_startup_secrets;
use crate::request_id::request_id_middleware;
use pkg_cloud::{BlobClient, VaultClient, ambient_credential};

/// Server configuration passed from the binary's CLI.
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub keyvault_url: String,
    pub storage_account: String,
    pub storage_container: String,
    /// `None` means `https://{storage_account}.blob.core.windows.net`.
    pub blob_endpoint: Option<String>,
    pub prefetch_secrets: bool,
}

/// Build the full HTTP surface over the given state.
pub fn router(state: AppState) -> Router {
    let azure_routes = Router::new()
        .route("/health", get(azure::health))
        .route("/secrets/{name}", get(azure::get_secret))
        .route("/config", get(azure::db_config))
        .route("/blobs", get(blobs::list_blobs))
        .route(
            "/blobs/{name}",
            get(blobs::download_blob)
                .post(blobs::upload_blob)
                .delete(blobs::delete_blob)
                .head(blobs::blob_exists)
                // Blob content has no size cap of its own
                .layer(DefaultBodyLimit::disable()),
        );

    Router::new()
        .route("/greeting", get(greeting::greeting))
        .nest("/azure", azure_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // One ambient credential shared by both clients
    let credential = ambient_credential()?;

    let vault = VaultClient::new(config.keyvault_url, credential.clone())?;
    let blobs = BlobClient::new(
        config.storage_account,
        config.storage_container,
        config.blob_endpoint,
        credential,
    )?;

    let state = AppState {
        vault: Arc::new(vault),
        blobs: Arc::new(blobs),
    };

    serve(state, config.addr, config.prefetch_secrets).await
}

/// Run the startup secret check, then bind and serve. Nothing is bound
/// when the check fails.
pub async fn serve(state: AppState, addr: SocketAddr, prefetch_secrets: bool) -> anyhow::Result<()> {
    if prefetch_secrets {
        prefetch_startup_secrets(state.vault.as_ref()).await?;
    } else {
        info!("Startup secret prefetch disabled");
    }

    let app = router(state);

    info!("Starting API server on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
