//! Core module for sitectl
//!
//! Configuration, error types and the interactive I/O contract.

pub mod config;
pub mod error;
pub mod io;

pub use config::{Config, Connection, Driver, DEFAULT_CONNECTION};
pub use error::{SiteError, SiteResult};
pub use io::Io;
