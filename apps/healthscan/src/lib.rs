//! # Healthscan Library
//!
//! This library exposes the healthscan app modules for testing and
//! integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod cli;
pub mod prompt;
pub mod slots;

// Re-export healthscan_core for convenience
pub use healthscan_core;
