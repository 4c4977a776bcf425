//! Main application modules.
//!
//! Utilities for progress logging and shutdown handling used by the scan
//! orchestrator.

pub mod logging;
pub mod shutdown;

// Re-export public API
pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
