//! Shared utilities for exit-format crates.

pub mod logging;

pub use logging::{init_logging, LogFormat};
