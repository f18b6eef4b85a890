//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the mount path can be registered next to `/health`
//! - Validate value ranges (timeouts > 0, address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FixtureConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use std::path::{Component, Path};

use thiserror::Error;

use crate::config::schema::FixtureConfig;

/// Path reserved for the liveness endpoint.
pub const HEALTH_ROUTE: &str = "/health";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("fixture.route {0:?} must start with '/' and contain no '{{', '}}' or '*'")]
    Route(String),

    #[error("fixture.route {0:?} collides with the health endpoint")]
    RouteReserved(String),

    #[error("fixture.image_file {0:?} must be a plain file name")]
    ImageFile(String),

    #[error("timeouts.request_secs must be greater than zero")]
    RequestTimeout,

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &FixtureConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let route = &config.fixture.route;
    if !route.starts_with('/') || route.contains(['{', '}', '*']) {
        errors.push(ValidationError::Route(route.clone()));
    } else if route == HEALTH_ROUTE {
        errors.push(ValidationError::RouteReserved(route.clone()));
    }

    if !is_plain_file_name(&config.fixture.image_file) {
        errors.push(ValidationError::ImageFile(config.fixture.image_file.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
