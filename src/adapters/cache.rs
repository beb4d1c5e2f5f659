use crate::core::{SearchHit, SearchProvider};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Trims the query and collapses internal whitespace runs to one space.
pub fn normalize_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bounded least-recently-used map from normalized query to hits.
#[derive(Debug)]
pub struct QueryCache {
    capacity: usize,
    entries: HashMap<String, Vec<SearchHit>>,
    // 最前面是最久未使用的
    order: VecDeque<String>,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, key: &str) -> Option<Vec<SearchHit>> {
        let hits = self.entries.get(key)?.clone();
        self.touch(key);
        Some(hits)
    }

    pub fn insert(&mut self, key: String, hits: Vec<SearchHit>) {
        if self.entries.insert(key.clone(), hits).is_some() {
            self.touch(&key);
            return;
        }

        self.order.push_back(key);
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                tracing::debug!("Evicting cached query: {}", evicted);
                self.entries.remove(&evicted);
            }
        }
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

/// Serves repeated queries from memory for the lifetime of the process.
/// Only successful searches are stored.
pub struct CachedSearch<P> {
    inner: P,
    cache: Mutex<QueryCache>,
}

impl<P> CachedSearch<P> {
    pub fn new(inner: P, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(QueryCache::new(capacity)),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl<P: SearchProvider> SearchProvider for CachedSearch<P> {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let key = normalize_query(query);

        // 鎖不能跨越 await
        let cached = self.cache.lock().ok().and_then(|mut cache| cache.get(&key));
        if let Some(hits) = cached {
            tracing::debug!("Serving cached results for query: {}", key);
            return Ok(hits);
        }

        let hits = self.inner.search(&key).await?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, hits.clone());
        }
        Ok(hits)
    }
}
