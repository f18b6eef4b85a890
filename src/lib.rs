//! Image fixture server for cross-origin resource policy tests.
//!
//! Serves a fixed PNG whose response headers (`Cache-Control`,
//! `cross-origin-resource-policy`, `access-control-allow-origin`,
//! `content-type`) are chosen by the query string, so a browser under test
//! can be checked against CORP and CORS behavior.

pub mod config;
pub mod fixture;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::FixtureConfig;
pub use fixture::ImageResponder;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
