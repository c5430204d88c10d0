//! Shared foundation for the Stress Detection service
//!
//! Provides the common error type and service configuration used by the
//! web module.

pub mod config;
pub mod error;

pub use error::{Error, Result};
