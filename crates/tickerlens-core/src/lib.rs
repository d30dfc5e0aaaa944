//! Shared configuration for the tickerlens binary and its services.

pub mod config;

pub use config::{Config, ServerConfig};
