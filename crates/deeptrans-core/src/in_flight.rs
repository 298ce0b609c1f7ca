use std::sync::Arc;

use tokio::sync::watch;

/// Count of translations currently in flight.
///
/// Each call holds an [`InFlightGuard`]; dropping it (success, error or a
/// cancelled future) releases that call's slot and nobody else's.
#[derive(Clone)]
pub struct InFlight {
    tx: Arc<watch::Sender<usize>>,
}

impl InFlight {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn enter(&self) -> InFlightGuard {
        self.tx.send_modify(|n| *n += 1);
        InFlightGuard {
            tx: Arc::clone(&self.tx),
        }
    }

    pub fn count(&self) -> usize {
        *self.tx.borrow()
    }

    pub fn is_active(&self) -> bool {
        self.count() > 0
    }

    /// Observe the count, e.g. to drive a spinner
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.tx.subscribe()
    }
}

impl Default for InFlight {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use = "the slot is released as soon as the guard is dropped"]
pub struct InFlightGuard {
    tx: Arc<watch::Sender<usize>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.tx.send_modify(|n| *n = n.saturating_sub(1));
    }
}
