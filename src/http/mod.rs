//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → request.rs (request ID assigned and propagated)
//!     → query.rs (decode query string into raw bytes)
//!     → fixture responder drives a writer.rs ResponseWriter
//!     → response.rs (WireResponse → http::Response)
//!     → Send to client
//! ```

pub mod query;
pub mod request;
pub mod response;
pub mod server;
pub mod writer;

pub use query::QueryParams;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::WireResponse;
pub use server::HttpServer;
pub use writer::{RecordingWriter, ResponseWriter, WriterError};
