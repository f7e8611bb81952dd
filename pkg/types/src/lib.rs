pub mod azure;
pub mod config;
pub mod greeting;
