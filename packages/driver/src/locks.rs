//! Per-collection write locks.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Lock serializing every mutation of one collection.
pub(crate) type CollectionLock = Arc<Mutex<()>>;

/// Registry handing out exactly one lock per collection name.
///
/// The map has its own guard, so two callers touching a collection for the
/// first time at the same moment end up sharing a single lock.
#[derive(Default)]
pub(crate) struct LockRegistry {
    locks: Mutex<HashMap<String, CollectionLock>>,
}

impl LockRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get_or_create(&self, collection: &str) -> CollectionLock {
        let mut locks = self.locks.lock();
        if let Some(lock) = locks.get(collection) {
            return Arc::clone(lock);
        }

        let lock = CollectionLock::default();
        locks.insert(collection.to_owned(), Arc::clone(&lock));
        lock
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.locks.lock().len()
    }
}
