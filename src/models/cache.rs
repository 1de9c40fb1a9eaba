use std::sync::{Mutex, MutexGuard};

/// A single cached upstream value and the time it was fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue<T> {
    pub value: Option<T>,
    pub fetched_at_millis: u64,
}

impl<T> Default for CachedValue<T> {
    fn default() -> Self {
        Self {
            value: None,
            fetched_at_millis: 0,
        }
    }
}

impl<T> CachedValue<T> {
    /// An empty entry is never fresh, whatever its timestamp says.
    pub fn is_fresh(&self, now_millis: u64, ttl_millis: u64) -> bool {
        self.value.is_some() && now_millis.saturating_sub(self.fetched_at_millis) < ttl_millis
    }
}

/// Outcome of reading one cache slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    /// Served from a fresh entry, no upstream call.
    Cached(T),
    /// Upstream refresh succeeded.
    Fetched(T),
    /// Refresh failed; the last good value is returned.
    Stale { value: T, error: String },
    /// Refresh failed and nothing was ever cached.
    Unavailable { error: String },
}

impl<T: Copy> Lookup<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Lookup::Cached(v) | Lookup::Fetched(v) => Some(*v),
            Lookup::Stale { value, .. } => Some(*value),
            Lookup::Unavailable { .. } => None,
        }
    }
}

impl<T> Lookup<T> {
    pub fn error(&self) -> Option<&str> {
        match self {
            Lookup::Stale { error, .. } | Lookup::Unavailable { error } => Some(error.as_str()),
            _ => None,
        }
    }
}

/// Shared slot for one cached value. The lock is held only for the copy
/// in or out, never across an upstream call.
pub struct CacheSlot<T> {
    ttl_millis: u64,
    entry: Mutex<CachedValue<T>>,
}

impl<T: Copy> CacheSlot<T> {
    pub fn new(ttl_millis: u64) -> Self {
        Self {
            ttl_millis,
            entry: Mutex::new(CachedValue::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CachedValue<T>> {
        self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_if_fresh(&self, now_millis: u64) -> Option<T> {
        let entry = self.lock();
        if entry.is_fresh(now_millis, self.ttl_millis) {
            entry.value
        } else {
            None
        }
    }

    /// Last stored value regardless of age.
    pub fn last_known(&self) -> Option<T> {
        self.lock().value
    }

    /// Stores `value` unless the slot already holds one fetched later.
    /// Returns the newer value that was kept in that case.
    pub fn put(&self, value: T, now_millis: u64) -> Option<T> {
        let mut entry = self.lock();
        if entry.value.is_some() && now_millis < entry.fetched_at_millis {
            return entry.value;
        }
        *entry = CachedValue {
            value: Some(value),
            fetched_at_millis: now_millis,
        };
        None
    }

    pub fn snapshot(&self) -> CachedValue<T> {
        self.lock().clone()
    }
}
