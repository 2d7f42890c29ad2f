//! Keyed exclusive sections.
//!
//! Each key (a game or a player) gets its own async mutex, so holding the
//! section for one game never blocks another.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Guard for one keyed section; the section is released on drop.
pub type SectionGuard = OwnedMutexGuard<()>;

pub struct LockRegistry<K> {
    sections: Mutex<HashMap<K, Arc<AsyncMutex<()>>>>,
}

impl<K> Default for LockRegistry<K> {
    fn default() -> Self {
        Self {
            sections: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> LockRegistry<K>
where
    K: Eq + Hash + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`.
    pub async fn acquire(&self, key: K) -> SectionGuard {
        let section = {
            let mut sections = self.sections.lock().unwrap_or_else(PoisonError::into_inner);
            // Entries nobody holds or waits on can go; waiters keep a clone.
            sections.retain(|k, m| *k == key || Arc::strong_count(m) > 1);
            Arc::clone(sections.entry(key).or_default())
        };
        section.lock_owned().await
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.sections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
