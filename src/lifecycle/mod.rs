//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT / Ctrl-C → Shutdown::trigger
//!
//! Cancellation (shutdown.rs):
//!     Shutdown::trigger
//!     → every CancelToken resolves
//!     → in-flight probes and the retry delay are abandoned
//!     → the run returns Err(Cancelled), never a Failed result
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{CancelToken, Shutdown};
