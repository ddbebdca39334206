//! Per-community mutation serialization.
//!
//! Join/leave and creation are two-write operations (membership ledger +
//! community member list). The stores expose no cross-store transaction, so
//! these mutations are serialized per community id: writers for the same
//! community queue behind one async mutex, writers for different
//! communities proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

use crate::domain::foundation::CommunityId;

/// Registry of per-community async mutexes.
///
/// Lock entries are created on first use and kept for the process lifetime;
/// the registry is shared by every handler that mutates membership state.
#[derive(Clone, Default)]
pub struct CommunityLocks {
    inner: Arc<Mutex<HashMap<CommunityId, Arc<tokio::sync::Mutex<()>>>>>,
}

impl CommunityLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the mutation lock for a community, waiting if a concurrent
    /// mutation holds it.
    pub async fn acquire(&self, community_id: CommunityId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().expect("community lock registry poisoned");
            map.entry(community_id)
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
