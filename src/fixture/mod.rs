//! Test fixtures served to the browser under test.
//!
//! # Data Flow
//! ```text
//! GET <route>?type=..&cached&corp=..&acao=..
//!     → http::query (decode to raw bytes)
//!     → image.rs (read green.png, decide headers)
//!     → ResponseWriter (status, headers in order, body)
//! ```
//!
//! # Design Decisions
//! - Responders only see `QueryParams` and a `ResponseWriter`, never axum types
//! - Fixture files are read on every request; nothing is cached

pub mod error;
pub mod image;

pub use error::FixtureError;
pub use image::ImageResponder;
