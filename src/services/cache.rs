use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::database::models::LandingPage;

struct CacheEntry {
    stored_at: Instant,
    landing: Option<LandingPage>,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    /// Bumped on every invalidation of a domain.
    generations: HashMap<String, u64>,
}

impl CacheState {
    fn generation(&self, domain: &str) -> u64 {
        self.generations.get(domain).copied().unwrap_or(0)
    }
}

/// Published landing per domain, kept for a fixed TTL.
///
/// A cached `None` (nothing published yet) is a hit too, so unpublished
/// domains do not query the database on every request.
///
/// Fills carry the generation observed before the database read; a fill
/// whose generation was invalidated in the meantime is dropped.
#[derive(Clone)]
pub struct PublishedCache {
    ttl: Duration,
    state: Arc<RwLock<CacheState>>,
}

impl PublishedCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Arc::new(RwLock::new(CacheState::default())),
        }
    }

    /// Cached value on a hit, otherwise the generation to hand back to `insert`.
    pub async fn lookup(&self, domain: &str) -> Result<Option<LandingPage>, u64> {
        let state = self.state.read().await;
        match state.entries.get(domain) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Ok(entry.landing.clone()),
            _ => Err(state.generation(domain)),
        }
    }

    /// Returns false when `domain` was invalidated after `generation` was read.
    pub async fn insert(&self, domain: &str, generation: u64, landing: Option<LandingPage>) -> bool {
        let mut state = self.state.write().await;
        if state.generation(domain) != generation {
            return false;
        }

        let ttl = self.ttl;
        state.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        state.entries.insert(
            domain.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                landing,
            },
        );
        true
    }

    pub async fn invalidate(&self, domain: &str) {
        let mut state = self.state.write().await;
        state.entries.remove(domain);
        *state.generations.entry(domain.to_string()).or_insert(0) += 1;
    }
}

impl std::fmt::Debug for PublishedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishedCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}
