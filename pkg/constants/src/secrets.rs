//! Names of the Key Vault secrets the service reads by itself.
//!
//! The startup prefetch and the `/azure/config` endpoint read different
//! username secrets; both names exist in the vault.

/// Database username fetched at startup.
pub const DB_USERNAME_SECRET: &str = "greeting-db-username";

/// Database user returned by `/azure/config`.
pub const DB_USER_SECRET: &str = "greeting-db-user";

/// Database password (startup prefetch and `/azure/config`).
pub const DB_PASSWORD_SECRET: &str = "greeting-db-password";

/// Replacement appended to the visible prefix of a masked value.
pub const MASK: &str = "***";

/// Number of leading characters left visible by masking.
pub const MASK_VISIBLE_CHARS: usize = 2;
