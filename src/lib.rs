//! sdkcat - SDK manifest helper
//!
//! Generates per-agent Xcode SDK descriptor fragments and aggregates them
//! into per-platform manifest files for the build pipeline.

pub mod aggregate;
pub mod config;
pub mod generate;
pub mod models;
pub mod toolchain;

pub use aggregate::{aggregate, AggregateError};
pub use config::{Config, ConfigError, Platform};
pub use generate::{generate, GenerateError};
pub use models::SdkEntry;
pub use toolchain::ToolchainError;
