//! In-memory invoice store.
//!
//! Holds exactly one current record. Writers replace the record wholesale;
//! readers always see either the old record or the new one, never a partial
//! update. Share the store with `Arc` when multiple consumers need it.

use std::sync::RwLock;

use crate::model::InvoiceRecord;

/// Replace-only holder for the single current invoice record.
pub struct InvoiceStore {
    inner: RwLock<InvoiceRecord>,
}

impl InvoiceStore {
    /// Create a store initialized to the fixed sample record.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(InvoiceRecord::sample()),
        }
    }

    /// Create a store seeded with a specific record.
    pub fn with_record(record: InvoiceRecord) -> Self {
        Self {
            inner: RwLock::new(record),
        }
    }

    /// Clone out the current record.
    pub fn current(&self) -> InvoiceRecord {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the whole record. There is no partial mutation.
    pub fn replace(&self, record: InvoiceRecord) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = record;
    }
}

impl Default for InvoiceStore {
    fn default() -> Self {
        Self::new()
    }
}
