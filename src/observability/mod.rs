//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http::server (TraceLayer spans, request IDs)
//! fixture responders (debug events per request)
//!     → logging.rs (tracing-subscriber, fmt to stdout)
//! ```
//!
//! # Design Decisions
//! - Structured `tracing` events with request IDs as fields
//! - `RUST_LOG` wins over the configured level

pub mod logging;

pub use logging::init_logging;
