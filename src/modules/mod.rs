//! Modules layer - Infrastructure components for external resources
//!
//! Contains adapters for resources outside the database, currently the upload directory.

pub mod storage;
