//! A keyed, tag-invalidated cache for data fetched from remote services.
//!
//! Entries expire after a fixed time-to-live. Callers asking for the same key
//! while a fetch is in progress wait for that fetch instead of starting their
//! own.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dioxus_logger::tracing;
use tokio::sync::Mutex;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::ApiError;

/// Groups cache entries so that related data can be invalidated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::IntoStaticStr)]
pub enum QueryTag {
    Rates,
    Balance,
    Jettons,
}

/// Identifies one cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub tag: QueryTag,
    pub account: Option<String>,
    pub wallet: Option<String>,
    pub params: Vec<String>,
}

impl QueryKey {
    pub fn new(tag: QueryTag) -> Self {
        Self {
            tag,
            account: None,
            wallet: None,
            params: Vec::new(),
        }
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn wallet(mut self, wallet: impl Into<String>) -> Self {
        self.wallet = Some(wallet.into());
        self
    }

    pub fn param(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }
}

#[derive(Clone, Debug)]
struct CachedEntry<V> {
    value: V,
    fetched_at: Instant,
}

#[derive(Debug)]
struct Entries<V> {
    values: HashMap<QueryKey, CachedEntry<V>>,
    /// Bumped by every invalidation of the tag.
    generations: HashMap<QueryTag, u64>,
}

impl<V> Entries<V> {
    fn generation(&self, tag: QueryTag) -> u64 {
        self.generations.get(&tag).copied().unwrap_or(0)
    }
}

type InFlightMap = parking_lot::Mutex<HashMap<QueryKey, Arc<Mutex<()>>>>;

/// A caller's claim on the per-key fetch lock.
///
/// The map entry lives as long as any caller holds a claim, so late arrivals
/// queue behind the same lock. The last claim dropped removes it, including
/// when the fetching future is cancelled.
struct InFlight<'a> {
    map: &'a InFlightMap,
    key: &'a QueryKey,
    lock: Arc<Mutex<()>>,
}

impl<'a> InFlight<'a> {
    fn join(map: &'a InFlightMap, key: &'a QueryKey) -> Self {
        let lock = map.lock().entry(key.clone()).or_default().clone();
        Self { map, key, lock }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut map = self.map.lock();
        // Clones are only taken under the map lock: two means the map and us.
        let last = map
            .get(self.key)
            .is_some_and(|lock| Arc::ptr_eq(lock, &self.lock) && Arc::strong_count(&self.lock) == 2);
        if last {
            map.remove(self.key);
        }
    }
}

pub struct QueryCache<V> {
    ttl: Duration,
    entries: RwLock<Entries<V>>,
    in_flight: InFlightMap,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(Entries {
                values: HashMap::new(),
                generations: HashMap::new(),
            }),
            in_flight: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key` if it is still fresh.
    pub async fn get(&self, key: &QueryKey) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .values
            .get(key)
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .map(|e| e.value.clone())
    }

    pub async fn set(&self, key: QueryKey, value: V) {
        let mut entries = self.entries.write().await;
        entries.values.insert(
            key,
            CachedEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Returns the fresh cached value for `key`, or runs `fetch` and caches its
    /// result. Errors are returned to the caller and not cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: QueryKey, fetch: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>>,
    {
        if let Some(value) = self.get(&key).await {
            tracing::debug!("cache hit: {:?}", key);
            return Ok(value);
        }

        let claim = InFlight::join(&self.in_flight, &key);
        let _guard = claim.lock.lock().await;

        // Another caller may have completed the fetch while we waited.
        if let Some(value) = self.get(&key).await {
            tracing::debug!("cache filled while waiting: {:?}", key);
            return Ok(value);
        }

        let generation = self.entries.read().await.generation(key.tag);
        tracing::debug!("cache miss, fetching: {:?}", key);
        let result = fetch().await;

        if let Ok(value) = &result {
            let mut entries = self.entries.write().await;
            if entries.generation(key.tag) == generation {
                entries.values.insert(
                    key.clone(),
                    CachedEntry {
                        value: value.clone(),
                        fetched_at: Instant::now(),
                    },
                );
            } else {
                tracing::debug!("discarding fetch raced by invalidation: {:?}", key);
            }
        }

        result
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight.lock().len()
    }

    /// Drops every entry carrying `tag` and returns how many were removed.
    ///
    /// Fetches for the tag that are still running will not store their result.
    pub async fn invalidate(&self, tag: QueryTag) -> usize {
        let mut entries = self.entries.write().await;
        *entries.generations.entry(tag).or_insert(0) += 1;
        let before = entries.values.len();
        entries.values.retain(|k, _| k.tag != tag);
        let removed = before - entries.values.len();
        let tag_name: &'static str = tag.into();
        tracing::info!("invalidated {} cached {} queries", removed, tag_name);
        removed
    }

    pub async fn invalidate_key(&self, key: &QueryKey) -> bool {
        self.entries.write().await.values.remove(key).is_some()
    }
}
