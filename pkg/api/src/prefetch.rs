//! Startup check that the vault is reachable and the database secrets exist.
//!
//! The values are only fetched, never kept: a vault that cannot serve them
//! at boot aborts the process instead of letting it serve degraded.

use anyhow::Context;
use pkg_cloud::SecretVault;
use pkg_constants::secrets::{DB_PASSWORD_SECRET, DB_USERNAME_SECRET};
use tracing::{error, info};

/// Secrets read at startup, in order.
pub const STARTUP_SECRETS: [&str; 2] = [DB_USERNAME_SECRET, DB_PASSWORD_SECRET];

pub async fn prefetch_startup_secrets(vault: &dyn SecretVault) -> anyhow::Result<()> {
    info!("Loading secrets from Key Vault {}", vault.endpoint_url());

    for name in STARTUP_SECRETS {
        let value = match vault.get_secret(name).await {
            Ok(v) => v,
            Err(e) => {
                error!("Failed to load secrets from Key Vault: {}", e);
                return Err(e)
                    .context("Cannot start application - Key Vault secrets are not accessible");
            }
        };
        info!("{} loaded (length: {})", name, value.chars().count());
    }

    info!("All startup secrets loaded");
    Ok(())
}
