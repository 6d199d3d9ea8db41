use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::phonetic::domain::similarity_cache::SimilarityCache;

type PairKey = (String, String);

#[derive(Debug, Default)]
struct Slots {
    entries: HashMap<PairKey, (f64, u64)>,
    recency: BTreeMap<u64, PairKey>,
    tick: u64,
}

impl Slots {
    fn touch(&mut self, key: &PairKey) -> Option<f64> {
        let tick = self.tick + 1;
        let (value, last) = self.entries.get_mut(key)?;
        let previous = std::mem::replace(last, tick);
        let value = *value;
        self.tick = tick;
        if let Some(k) = self.recency.remove(&previous) {
            self.recency.insert(tick, k);
        }
        Some(value)
    }
}

/// Bounded least-recently-used memo of code-pair similarities.
///
/// Shared between threads behind a mutex. A capacity of zero turns the
/// cache off: lookups always miss and inserts are dropped.
#[derive(Debug)]
pub struct LruSimilarityCache {
    capacity: usize,
    slots: Mutex<Slots>,
}

impl LruSimilarityCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Mutex::new(Slots::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        // A panic while holding the lock leaves the maps consistent.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        let mut slots = self.lock();
        slots.entries.clear();
        slots.recency.clear();
    }
}

impl SimilarityCache for LruSimilarityCache {
    fn get(&self, a: &str, b: &str) -> Option<f64> {
        if self.capacity == 0 {
            return None;
        }
        self.lock().touch(&(a.to_string(), b.to_string()))
    }

    fn insert(&self, a: &str, b: &str, value: f64) {
        if self.capacity == 0 {
            return;
        }
        let key = (a.to_string(), b.to_string());
        let mut slots = self.lock();
        slots.tick += 1;
        let tick = slots.tick;

        if let Some((_, previous)) = slots.entries.insert(key.clone(), (value, tick)) {
            slots.recency.remove(&previous);
        }
        slots.recency.insert(tick, key);

        while slots.entries.len() > self.capacity {
            let Some((_, oldest)) = slots.recency.pop_first() else {
                break;
            };
            slots.entries.remove(&oldest);
            log::trace!("evicted similarity {}/{}", oldest.0, oldest.1);
        }
    }
}
