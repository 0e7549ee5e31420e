//! pathway-storage
//!
//! Persistence for the catalog, the user directory and submitted responses.
//! `MemoryStore` keeps everything in process; `S3Store` is a thin wrapper
//! around the AWS S3 SDK using conditional writes.

pub mod client;
pub mod error;
pub mod memory;
pub mod objects;
pub mod s3;
pub mod state;
pub mod store;

pub use memory::MemoryStore;
pub use s3::S3Store;
pub use store::{update_catalog, update_directory, Store, Versioned};
