//! Object-store abstraction for generated assets.
//!
//! [`store::ObjectStore`] is the narrow seam the pipeline writes
//! through; [`local::LocalStore`] and [`s3::S3Store`] are the two
//! provider implementations, selected by configuration.

pub mod local;
pub mod s3;
pub mod store;

pub use store::{AssetVisibility, ObjectStore, StorageBackendType, StorageError};
