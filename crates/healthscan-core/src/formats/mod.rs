//! # Formats Module
//!
//! Serialization of the persisted wizard state.
//!
//! This module contains:
//! - The JSON record written to the single storage slot
//! - Best-effort decoding that merges whatever fields are usable
//!
//! Note: File I/O stays in the app layer and the storage slots. This module
//! only converts between strings and state (pure transformations).

mod persistence;

pub use persistence::*;
