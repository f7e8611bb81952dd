use clap::Parser;
use pkg_api::server::{ServerConfig, start_server};
use pkg_constants::azure::{DEFAULT_KEYVAULT_URL, DEFAULT_STORAGE_ACCOUNT, DEFAULT_STORAGE_CONTAINER};
use pkg_constants::network::DEFAULT_API_PORT;
use pkg_constants::paths::DEFAULT_SERVER_CONFIG;
use pkg_types::config::{ServerConfigFile, load_config_file};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "greeting-server", about = "Greeting service with Azure Key Vault and Blob Storage")]
struct Cli {
    /// Path to YAML config file
    #[arg(long, short, default_value = DEFAULT_SERVER_CONFIG)]
    config: String,

    /// Port to listen on
    #[arg(long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Key Vault address
    #[arg(long, env = "AZURE_KEYVAULT_URL")]
    keyvault_url: Option<String>,

    /// Storage account holding the blob container
    #[arg(long, env = "AZURE_STORAGE_ACCOUNT_NAME")]
    storage_account: Option<String>,

    /// Blob container used by the /azure/blobs endpoints
    #[arg(long, env = "AZURE_STORAGE_CONTAINER_NAME")]
    storage_container: Option<String>,

    /// Blob service endpoint (defaults to the account's public endpoint)
    #[arg(long, env = "AZURE_STORAGE_BLOB_ENDPOINT")]
    blob_endpoint: Option<String>,

    /// Start without checking the database secrets in Key Vault
    #[arg(long)]
    skip_secret_prefetch: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    // Load config file (returns defaults if file not found)
    let file_cfg: ServerConfigFile = load_config_file(&cli.config)?;
    info!("Config file: {}", cli.config);

    // Merge: CLI args / env > config file > defaults
    let port = cli.port.or(file_cfg.port).unwrap_or(DEFAULT_API_PORT);
    let keyvault_url = cli
        .keyvault_url
        .or(file_cfg.keyvault_url)
        .unwrap_or_else(|| DEFAULT_KEYVAULT_URL.to_string());
    let storage_account = cli
        .storage_account
        .or(file_cfg.storage_account)
        .unwrap_or_else(|| DEFAULT_STORAGE_ACCOUNT.to_string());
    let storage_container = cli
        .storage_container
        .or(file_cfg.storage_container)
        .unwrap_or_else(|| DEFAULT_STORAGE_CONTAINER.to_string());
    let blob_endpoint = cli.blob_endpoint.or(file_cfg.blob_endpoint);
    let skip_prefetch = cli.skip_secret_prefetch || file_cfg.skip_secret_prefetch.unwrap_or(false);

    info!("Starting greeting-server");
    info!("  Port:       {}", port);
    info!("  Key Vault:  {}", keyvault_url);
    info!("  Storage:    {}/{}", storage_account, storage_container);
    if let Some(endpoint) = &blob_endpoint {
        info!("  Blob endpoint: {}", endpoint);
    }

    let config = ServerConfig {
        addr: SocketAddr::from(([0, 0, 0, 0], port)),
        keyvault_url,
        storage_account,
        storage_container,
        blob_endpoint,
        prefetch_secrets: !skip_prefetch,
    };

    start_server(config).await?;

    Ok(())
}
