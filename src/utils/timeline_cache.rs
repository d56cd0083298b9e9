//! Time-boxed cache for rendered listings.
//!
//! Entries are only ever dropped by expiry or an explicit [`TimelineCache::expire`];
//! writes to posts do not invalidate anything.

use std::{
    future::Future,
    time::{Duration, Instant},
};

use axum::body::Bytes;
use moka::{sync::Cache, Expiry};
use tracing::debug;

use super::app_error::AppError;

pub const INDEX_PAGE_KEY_PREFIX: &str = "index_page";

/// Upper bound on stored pages, least recently used ones go first.
const MAX_CACHED_PAGES: u64 = 1_000;

pub trait TimelineCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Bytes>;
    fn set(&self, key: &str, value: Bytes, ttl: Duration);
    fn expire(&self, key: &str);
}

#[derive(Clone)]
struct CachedPage {
    body: Bytes,
    ttl: Duration,
}

/// Each page lives for the ttl it was stored with, counted from its last write.
struct PageExpiry;

impl Expiry<String, CachedPage> for PageExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedPage,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedPage,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

pub struct MemoryTimelineCache {
    inner: Cache<String, CachedPage>,
}

impl MemoryTimelineCache {
    pub fn new() -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_CACHED_PAGES)
                .expire_after(PageExpiry)
                .build(),
        }
    }
}

impl Default for MemoryTimelineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineCache for MemoryTimelineCache {
    fn get(&self, key: &str) -> Option<Bytes> {
        self.inner.get(key).map(|page| page.body)
    }

    fn set(&self, key: &str, value: Bytes, ttl: Duration) {
        self.inner
            .insert(key.to_string(), CachedPage { body: value, ttl });
    }

    fn expire(&self, key: &str) {
        self.inner.invalidate(key);
    }
}

/// Never stores anything, every lookup renders.
#[derive(Default)]
pub struct NoopTimelineCache;

impl TimelineCache for NoopTimelineCache {
    fn get(&self, _key: &str) -> Option<Bytes> {
        None
    }

    fn set(&self, _key: &str, _value: Bytes, _ttl: Duration) {}

    fn expire(&self, _key: &str) {}
}

pub fn index_page_key(page_number: usize) -> String {
    format!("{INDEX_PAGE_KEY_PREFIX}:{page_number}")
}

/// Returns the cached bytes for `key`, or renders, stores and returns them.
/// Failed renders are not cached.
pub async fn get_or_render<F, Fut>(
    cache: &dyn TimelineCache,
    key: &str,
    ttl: Duration,
    render: F,
) -> Result<Bytes, AppError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Bytes, AppError>>,
{
    if let Some(cached) = cache.get(key) {
        debug!("Timeline cache hit for `{key}`");
        return Ok(cached);
    }

    let rendered = render().await?;
    cache.set(key, rendered.clone(), ttl);

    Ok(rendered)
}
