pub mod azure;
pub mod blobs;
pub mod greeting;
