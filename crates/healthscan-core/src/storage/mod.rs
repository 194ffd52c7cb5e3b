//! # Storage Module
//!
//! Key-value slots holding the single persisted wizard record.
//!
//! A slot stores one opaque string. The wizard never interprets storage
//! failures as user errors: persistence is best effort.
//!
//! Backends:
//! - `MemorySlot`: in-process, for tests and throwaway sessions
//! - `RedbSlot`: embedded redb database (ACID, crash safe)

mod memory;
mod redb_slot;

pub use memory::MemorySlot;
pub use redb_slot::RedbSlot;

use crate::ScanError;

/// One string value under one fixed key.
pub trait StateSlot {
    /// Read the stored value, `None` if nothing has been written.
    fn get(&self) -> Result<Option<String>, ScanError>;

    /// Replace the stored value.
    fn set(&mut self, raw: &str) -> Result<(), ScanError>;

    /// Delete the stored value. Removing an empty slot is not an error.
    fn remove(&mut self) -> Result<(), ScanError>;
}

impl<S: StateSlot + ?Sized> StateSlot for Box<S> {
    fn get(&self) -> Result<Option<String>, ScanError> {
        (**self).get()
    }

    fn set(&mut self, raw: &str) -> Result<(), ScanError> {
        (**self).set(raw)
    }

    fn remove(&mut self) -> Result<(), ScanError> {
        (**self).remove()
    }
}
