// File: src/core/cache.rs
use crate::core::types::RhymeCandidate;
use std::collections::HashMap;

struct CacheSlot {
    candidates: Vec<RhymeCandidate>,
    last_used: u64,
}

/// Memoizes ranked candidates per `"{word}:{max_results}"` key.
///
/// With a capacity of 0 the cache grows without bound. Otherwise the least
/// recently used key is evicted once the capacity is reached.
pub struct RhymeCache {
    capacity: usize,
    slots: HashMap<String, CacheSlot>,
    clock: u64,
}

impl RhymeCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: HashMap::new(),
            clock: 0,
        }
    }

    pub fn key(word: &str, max_results: usize) -> String {
        format!("{}:{}", word, max_results)
    }

    pub fn get(&mut self, key: &str) -> Option<Vec<RhymeCandidate>> {
        self.clock += 1;
        let now = self.clock;
        self.slots.get_mut(key).map(|slot| {
            slot.last_used = now;
            slot.candidates.clone()
        })
    }

    pub fn insert(&mut self, key: String, candidates: Vec<RhymeCandidate>) {
        self.clock += 1;
        let full = self.capacity > 0 && self.slots.len() >= self.capacity;
        if full && !self.slots.contains_key(&key) {
            self.evict_least_recent();
        }
        let slot = CacheSlot {
            candidates,
            last_used: self.clock,
        };
        self.slots.insert(key, slot);
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .slots
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.slots.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{MeterInfo, RhymeType};

    fn candidate(text: &str) -> Vec<RhymeCandidate> {
        vec![RhymeCandidate {
            text: text.to_string(),
            rhyme_type: RhymeType::Perfect,
            score: 1.0,
            meter_info: MeterInfo {
                syllables: 1,
                stress_pattern: None,
            },
        }]
    }

    #[test]
    fn test_key_format() {
        assert_eq!(RhymeCache::key("tijd", 6), "tijd:6");
    }

    #[test]
    fn test_unbounded_when_capacity_zero() {
        let mut cache = RhymeCache::new(0);
        for i in 0..100 {
            cache.insert(format!("w{i}:6"), candidate("x"));
        }
        assert_eq!(cache.len(), 100);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = RhymeCache::new(2);
        cache.insert("a:6".into(), candidate("a"));
        cache.insert("b:6".into(), candidate("b"));
        // touch a so b becomes the oldest
        assert!(cache.get("a:6").is_some());
        cache.insert("c:6".into(), candidate("c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b:6").is_none());
        assert_eq!(cache.get("a:6").unwrap()[0].text, "a");
        assert_eq!(cache.get("c:6").unwrap()[0].text, "c");
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let mut cache = RhymeCache::new(1);
        cache.insert("a:6".into(), candidate("a"));
        cache.insert("a:6".into(), candidate("b"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a:6").unwrap()[0].text, "b");
    }
}
