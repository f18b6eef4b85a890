//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every field
//! has a default, so an empty file (or no file) yields a working server.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the fixture server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FixtureConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Where the image fixture is mounted and read from.
    pub fixture: FixtureSettings,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8800").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8800".to_string(),
        }
    }
}

/// Directory shipped with the crate that holds `green.png`.
pub const DEFAULT_RESOURCE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources");

/// Image fixture settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FixtureSettings {
    /// Request path the image responder is mounted at.
    pub route: String,

    /// Directory holding the fixture files. Relative paths resolve against
    /// the working directory.
    pub resource_dir: PathBuf,

    /// File name of the image inside `resource_dir`.
    pub image_file: String,
}

impl FixtureSettings {
    /// Full path of the image file.
    pub fn image_path(&self) -> PathBuf {
        self.resource_dir.join(&self.image_file)
    }
}

impl Default for FixtureSettings {
    fn default() -> Self {
        Self {
            route: "/cross-origin-resource-policy/resources/image.py".to_string(),
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            image_file: "green.png".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
