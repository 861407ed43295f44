//! Utility functions and helpers.

pub mod format;
pub mod fs;

// Re-exports for convenience
pub use format::*;
pub use fs::*;
