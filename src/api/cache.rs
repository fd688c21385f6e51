use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt,
};

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Resource types a cached response can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Auth,
    Movie,
}

/// Endpoint plus normalized (sorted) query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    endpoint: String,
    params: BTreeMap<String, String>,
}

impl QueryKey {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.endpoint)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, name, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    body: Value,
    tags: Vec<Tag>,
    fetched_at: DateTime<Utc>,
}

/// Response cache with a tag index.
///
/// Mutations invalidate tags; every entry carrying an invalidated tag is
/// dropped and its key reported back as stale. The generation counter moves on
/// every invalidation so a fetch that started before it can be discarded.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    index: HashMap<Tag, HashSet<QueryKey>>,
    generation: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<&Value> {
        self.entries.get(key).map(|entry| &entry.body)
    }

    pub fn fetched_at(&self, key: &QueryKey) -> Option<DateTime<Utc>> {
        self.entries.get(key).map(|entry| entry.fetched_at)
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: QueryKey, tags: &[Tag], body: Value) {
        self.unlink(&key);
        for tag in tags {
            self.index.entry(*tag).or_default().insert(key.clone());
        }
        self.entries.insert(
            key,
            CacheEntry {
                body,
                tags: tags.to_vec(),
                fetched_at: Utc::now(),
            },
        );
    }

    /// Inserts only if no invalidation happened since `generation` was read.
    pub fn insert_if_current(
        &mut self,
        generation: u64,
        key: QueryKey,
        tags: &[Tag],
        body: Value,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.insert(key, tags, body);
        true
    }

    /// Drops every entry tagged with any of `tags` and returns the stale keys, sorted.
    pub fn invalidate(&mut self, tags: &[Tag]) -> Vec<QueryKey> {
        self.generation += 1;

        let mut stale: Vec<QueryKey> = tags
            .iter()
            .filter_map(|tag| self.index.remove(tag))
            .flatten()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        stale.sort();

        for key in &stale {
            self.unlink(key);
            self.entries.remove(key);
        }
        stale
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.entries.clear();
        self.index.clear();
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn keys_for(&self, tag: Tag) -> Vec<QueryKey> {
        let mut keys: Vec<QueryKey> = self
            .index
            .get(&tag)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn unlink(&mut self, key: &QueryKey) {
        let Some(entry) = self.entries.get(key) else {
            return;
        };
        for tag in &entry.tags {
            if let Some(keys) = self.index.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.index.remove(tag);
                }
            }
        }
    }
}
