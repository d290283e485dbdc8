//! Cache gateway
//!
//! The client never decides what to cache. It only owns a [`CachePool`],
//! namespaces keys and commits deferred writes when it is dropped.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::config::CACHE_NAMESPACE;

/// A cached value
#[derive(Debug, Clone, PartialEq)]
pub struct CacheItem {
    pub key: String,
    pub value: Value,
    /// Time to live; `None` never expires
    pub ttl: Option<Duration>,
}

impl CacheItem {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

/// Pluggable item pool with deferred writes
pub trait CachePool: Send + Sync + fmt::Debug {
    /// Fetch a live item
    fn get_item(&self, key: &str) -> Option<CacheItem>;

    fn has_item(&self, key: &str) -> bool {
        self.get_item(key).is_some()
    }

    /// Persist an item immediately
    fn save(&mut self, item: CacheItem) -> bool;

    /// Queue an item until the next [`commit`](CachePool::commit)
    fn save_deferred(&mut self, item: CacheItem) -> bool;

    fn delete_item(&mut self, key: &str) -> bool;

    fn clear(&mut self) -> bool;

    /// Persist every deferred item
    fn commit(&mut self) -> bool;
}

/// Pool that stores nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidCachePool;

impl CachePool for VoidCachePool {
    fn get_item(&self, _key: &str) -> Option<CacheItem> {
        None
    }

    fn save(&mut self, _item: CacheItem) -> bool {
        true
    }

    fn save_deferred(&mut self, _item: CacheItem) -> bool {
        true
    }

    fn delete_item(&mut self, _key: &str) -> bool {
        true
    }

    fn clear(&mut self) -> bool {
        true
    }

    fn commit(&mut self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
struct StoredItem {
    item: CacheItem,
    expires_at: Option<Instant>,
}

impl StoredItem {
    fn new(item: CacheItem) -> Self {
        let expires_at = item.ttl.map(|ttl| Instant::now() + ttl);
        Self { item, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// In-process pool with TTL expiry
#[derive(Debug, Default)]
pub struct MemoryCachePool {
    items: HashMap<String, StoredItem>,
    deferred: Vec<CacheItem>,
}

impl MemoryCachePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items waiting for commit
    pub fn deferred_len(&self) -> usize {
        self.deferred.len()
    }
}

impl CachePool for MemoryCachePool {
    fn get_item(&self, key: &str) -> Option<CacheItem> {
        self.items
            .get(key)
            .filter(|stored| !stored.is_expired())
            .map(|stored| stored.item.clone())
    }

    fn save(&mut self, item: CacheItem) -> bool {
        self.items.insert(item.key.clone(), StoredItem::new(item));
        true
    }

    fn save_deferred(&mut self, item: CacheItem) -> bool {
        self.deferred.push(item);
        true
    }

    fn delete_item(&mut self, key: &str) -> bool {
        self.deferred.retain(|item| item.key != key);
        self.items.remove(key);
        true
    }

    fn clear(&mut self) -> bool {
        self.items.clear();
        self.deferred.clear();
        true
    }

    fn commit(&mut self) -> bool {
        for item in std::mem::take(&mut self.deferred) {
            self.items.insert(item.key.clone(), StoredItem::new(item));
        }
        true
    }
}

/// Owns the client's cache pool
#[derive(Debug, Default)]
pub struct CacheGateway {
    pool: Option<Box<dyn CachePool>>,
}

impl CacheGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix `key` with the client namespace
    pub fn key(&self, key: &str) -> String {
        format!("{}{}", CACHE_NAMESPACE, key)
    }

    pub fn set_pool(&mut self, pool: Box<dyn CachePool>) {
        self.pool = Some(pool);
    }

    /// The pool, defaulting to [`VoidCachePool`] on first use
    pub fn pool(&mut self) -> &mut dyn CachePool {
        self.pool.get_or_insert_with(|| Box::new(VoidCachePool)).as_mut()
    }

    /// Commit deferred writes
    pub fn flush(&mut self) -> bool {
        tracing::trace!("Committing deferred cache items");
        self.pool().commit()
    }
}
