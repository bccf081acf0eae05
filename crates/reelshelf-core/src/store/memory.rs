use std::collections::HashMap;

use crate::error::Result;

use super::Slot;

/// An in-process slot store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with an existing payload.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Slot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let slot = MemorySlot::new();
        assert_eq!(slot.read("collection").unwrap(), None);
    }

    #[test]
    fn test_write_replaces_value() {
        let mut slot = MemorySlot::new().with_value("collection", "[]");
        slot.write("collection", "[1]").unwrap();
        assert_eq!(slot.get("collection"), Some("[1]"));
    }
}
