//! Centralized constants for the greeting service.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod azure;
pub mod network;
pub mod paths;
pub mod secrets;
