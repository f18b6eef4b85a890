//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() or OS signal → server stops accepting → in-flight requests finish → exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → resolve the shutdown future
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use signals::shutdown_signal;
