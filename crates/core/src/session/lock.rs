//! Exclusive ticket for stock mutations
//!
//! Only one adjust or transfer form may be open per session. The ticket is
//! taken when the form opens and released when it is dropped, so closing the
//! form, submitting it, or an early `?` return all free the lock.

use std::sync::Arc;

use parking_lot::Mutex;
use stockdesk_domain::{Result, StockDeskError};

#[derive(Debug, Default)]
struct LockState {
    holder: Option<Holder>,
    issued: u64,
}

#[derive(Debug)]
struct Holder {
    serial: u64,
    label: String,
}

/// Session-wide mutation lock. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MutationLock {
    state: Arc<Mutex<LockState>>,
}

impl MutationLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock for the form described by `label`.
    ///
    /// Returns [`StockDeskError::Busy`] while another ticket is alive.
    pub fn try_acquire(&self, label: impl Into<String>) -> Result<MutationTicket> {
        let label = label.into();
        let mut state = self.state.lock();

        if let Some(holder) = &state.holder {
            tracing::warn!(held_by = %holder.label, requested = %label, "mutation_lock.busy");
            return Err(StockDeskError::Busy(format!("'{}' is still open", holder.label)));
        }

        state.issued += 1;
        let serial = state.issued;
        state.holder = Some(Holder { serial, label: label.clone() });
        tracing::debug!(serial, label = %label, "mutation_lock.acquired");

        Ok(MutationTicket { state: Arc::clone(&self.state), serial, label })
    }

    pub fn is_held(&self) -> bool {
        self.state.lock().holder.is_some()
    }

    /// Label of the current holder
    pub fn holder(&self) -> Option<String> {
        self.state.lock().holder.as_ref().map(|h| h.label.clone())
    }

    /// Fails unless `ticket` is the live ticket of this lock.
    pub fn ensure_current(&self, ticket: &MutationTicket) -> Result<()> {
        let state = self.state.lock();
        let current = Arc::ptr_eq(&self.state, &ticket.state)
            && state.holder.as_ref().is_some_and(|h| h.serial == ticket.serial);

        if current {
            Ok(())
        } else {
            Err(StockDeskError::Precondition(format!(
                "mutation ticket '{}' is no longer valid",
                ticket.label
            )))
        }
    }
}

/// Proof of holding the [`MutationLock`]; releases it on drop.
#[derive(Debug)]
pub struct MutationTicket {
    state: Arc<Mutex<LockState>>,
    serial: u64,
    label: String,
}

impl MutationTicket {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Explicit release; same as dropping the ticket.
    pub fn release(self) {}
}

impl Drop for MutationTicket {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if state.holder.as_ref().is_some_and(|h| h.serial == self.serial) {
            state.holder = None;
            tracing::debug!(serial = self.serial, label = %self.label, "mutation_lock.released");
        }
    }
}
