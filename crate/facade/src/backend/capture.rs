use std::sync::{Mutex, PoisonError};

use crate::{LogBackend, LogRecord};

/// Keeps every delivered record in memory, in delivery order.
#[derive(Debug, Default)]
pub struct CapturingBackend {
    records: Mutex<Vec<LogRecord>>,
}

impl CapturingBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the records delivered so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().clone()
    }

    /// Drain the records delivered so far.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogBackend for CapturingBackend {
    fn deliver(&self, record: LogRecord) {
        self.lock().push(record);
    }
}
