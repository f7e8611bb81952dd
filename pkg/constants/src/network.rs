//! Network-related constants.

/// Default port for the HTTP API.
pub const DEFAULT_API_PORT: u16 = 8080;

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "greeting-service";

/// Response header carrying the per-request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
