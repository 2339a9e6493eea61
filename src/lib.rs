//! Imagedrop - Minimal image upload and retrieval service
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod error;
pub mod images;
pub mod server;

pub use error::{Error, Result};
