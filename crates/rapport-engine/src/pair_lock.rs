//! Per-pair execution locks.
//!
//! Interactions for the same character pair must run one at a time so ledger
//! updates never race. Locks are keyed by [`PairKey`], which is canonical
//! under argument order, so `(a, b)` and `(b, a)` contend on the same lock.
//! Unrelated pairs proceed in parallel.
//!
//! # Invariants
//!
//! - The registry mutex is never held across an await of a pair lock, so a
//!   long-running interaction cannot block lock acquisition for other pairs.
//! - [`prune`] only removes locks with no outstanding holders.
//!
//! [`prune`]: PairLocks::prune

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use rapport_types::PairKey;

/// Registry of per-pair execution locks.
///
/// Lock entries are created on demand and live until [`PairLocks::prune`]
/// removes the ones nobody holds.
#[derive(Debug, Default)]
pub struct PairLocks {
    locks: Mutex<BTreeMap<PairKey, Arc<Mutex<()>>>>,
}

impl PairLocks {
    /// Create an empty lock registry.
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(BTreeMap::new()),
        }
    }

    /// Acquire the execution lock for a pair, waiting if another interaction
    /// for the same pair is in flight.
    ///
    /// The returned guard releases the lock on drop.
    pub async fn acquire(&self, pair: PairKey) -> OwnedMutexGuard<()> {
        let handle = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(pair).or_default())
        };
        handle.lock_owned().await
    }

    /// Drop lock entries that no task currently holds or waits on.
    ///
    /// Returns the number of entries removed. Call periodically in
    /// long-running deployments to keep the registry bounded by the set of
    /// active pairs rather than every pair ever seen.
    pub async fn prune(&self) -> usize {
        let mut locks = self.locks.lock().await;
        let before = locks.len();
        locks.retain(|_, handle| Arc::strong_count(handle) > 1);
        before.saturating_sub(locks.len())
    }

    /// Number of lock entries currently registered.
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    /// Whether the registry holds no lock entries.
    pub async fn is_empty(&self) -> bool {
        self.locks.lock().await.is_empty()
    }
}
