//! In-memory slot.

use super::StateSlot;
use crate::ScanError;

/// Slot backed by a plain `Option<String>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySlot {
    value: Option<String>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `raw`.
    #[must_use]
    pub fn with_value(raw: impl Into<String>) -> Self {
        Self {
            value: Some(raw.into()),
        }
    }

    /// Inspect the stored value without going through the trait.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl StateSlot for MemorySlot {
    fn get(&self) -> Result<Option<String>, ScanError> {
        Ok(self.value.clone())
    }

    fn set(&mut self, raw: &str) -> Result<(), ScanError> {
        self.value = Some(raw.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), ScanError> {
        self.value = None;
        Ok(())
    }
}
