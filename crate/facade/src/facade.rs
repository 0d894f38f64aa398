use std::{
    collections::VecDeque,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock},
};

use tracing::debug;

use crate::{
    CallSite, Details, FacadeConfig, LogBackend, LogRecord, Severity, TracingBackend,
    UnregisteredPolicy,
};

/// Dispatches severity-tagged records to a registered [`LogBackend`].
///
/// Every entry point builds exactly one [`LogRecord`] and delivers it
/// synchronously. Nothing here fails: without a backend the record is handled
/// by the [`UnregisteredPolicy`], which drops it by default.
///
/// Registration takes the write side of a lock and log calls the read side,
/// so a backend may be swapped while other threads are logging. The lock is
/// never held while a backend runs.
pub struct LogFacade {
    backend: RwLock<Option<Arc<dyn LogBackend>>>,
    policy: RwLock<UnregisteredPolicy>,
    pending: Mutex<VecDeque<LogRecord>>,
}

impl LogFacade {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            backend: RwLock::new(None),
            policy: RwLock::new(UnregisteredPolicy::Drop),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    #[must_use]
    pub fn with_config(config: &FacadeConfig) -> Self {
        let facade = Self::new();
        facade.configure(config);
        facade
    }

    /// Apply `config`. Retained records that the new policy no longer allows
    /// are discarded, oldest first.
    pub fn configure(&self, config: &FacadeConfig) {
        let policy = config.unregistered;
        *self.policy.write().unwrap_or_else(PoisonError::into_inner) = policy;
        let mut pending = self.pending();
        let keep = match policy {
            UnregisteredPolicy::Buffer { capacity } => capacity,
            UnregisteredPolicy::Drop | UnregisteredPolicy::Console => 0,
        };
        let excess = pending.len().saturating_sub(keep);
        pending.drain(..excess);
        debug!("log facade configured with {policy:?}");
    }

    /// Register `backend`, returning the one it replaces.
    ///
    /// Records retained while no backend was registered are delivered to
    /// `backend`, in their original order, before this returns. Records
    /// logged by other threads during that replay go straight to `backend`
    /// and may arrive before the older retained ones.
    pub fn set_backend(&self, backend: Arc<dyn LogBackend>) -> Option<Arc<dyn LogBackend>> {
        let (previous, retained) = {
            let mut slot = self.backend.write().unwrap_or_else(PoisonError::into_inner);
            let previous = slot.replace(backend.clone());
            let retained: Vec<LogRecord> = self.pending().drain(..).collect();
            (previous, retained)
        };
        debug!(
            replaced = previous.is_some(),
            retained = retained.len(),
            "log backend registered"
        );
        for record in retained {
            backend.deliver(record);
        }
        previous
    }

    /// Unregister the current backend, returning it.
    pub fn clear_backend(&self) -> Option<Arc<dyn LogBackend>> {
        let previous = self
            .backend
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        debug!(replaced = previous.is_some(), "log backend cleared");
        previous
    }

    #[must_use]
    pub fn has_backend(&self) -> bool {
        self.backend
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Number of records retained for the next backend.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending().len()
    }

    pub fn verbose(&self, message: impl Into<String>, site: CallSite) {
        self.log(Severity::Verbose, message.into(), None, site);
    }

    pub fn debug(&self, message: impl Into<String>, site: CallSite) {
        self.log(Severity::Debug, message.into(), None, site);
    }

    pub fn info(&self, message: impl Into<String>, site: CallSite) {
        self.log(Severity::Info, message.into(), None, site);
    }

    pub fn warning(&self, message: impl Into<String>, site: CallSite) {
        self.log(Severity::Warning, message.into(), None, site);
    }

    pub fn error(&self, message: impl Into<String>, details: Option<Details>, site: CallSite) {
        self.log(Severity::Error, message.into(), details, site);
    }

    pub fn failure(&self, message: impl Into<String>, details: Option<Details>, site: CallSite) {
        self.log(Severity::Failure, message.into(), details, site);
    }

    /// Details passed with a severity below `Error` are ignored.
    pub(crate) fn log(
        &self,
        severity: Severity,
        message: String,
        details: Option<Details>,
        site: CallSite,
    ) {
        let record = LogRecord::new(severity, message, details, site);
        let slot = self.backend.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(backend) = slot.as_ref().map(Arc::clone) {
            drop(slot);
            backend.deliver(record);
            return;
        }
        // retained under the read guard so a concurrent registration cannot
        // miss this record
        let console = self.unregistered(record);
        drop(slot);
        if let Some(record) = console {
            TracingBackend.deliver(record);
        }
    }

    /// Apply the unregistered policy, returning the record when it goes to
    /// the console.
    fn unregistered(&self, record: LogRecord) -> Option<LogRecord> {
        let policy = *self.policy.read().unwrap_or_else(PoisonError::into_inner);
        match policy {
            UnregisteredPolicy::Drop => None,
            UnregisteredPolicy::Buffer { capacity } => {
                if capacity > 0 {
                    let mut pending = self.pending();
                    while pending.len() >= capacity {
                        pending.pop_front();
                    }
                    pending.push_back(record);
                }
                None
            }
            UnregisteredPolicy::Console => Some(record),
        }
    }

    fn pending(&self) -> MutexGuard<'_, VecDeque<LogRecord>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LogFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFacade")
            .field("has_backend", &self.has_backend())
            .field(
                "policy",
                &*self.policy.read().unwrap_or_else(PoisonError::into_inner),
            )
            .field("pending", &self.pending_len())
            .finish()
    }
}
