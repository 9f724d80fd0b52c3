//! Storage module for uploaded media
//!
//! Provides the local filesystem store that backs `uploads/blog`.

mod local_store;

pub use local_store::{LocalFileStore, StorageError};
