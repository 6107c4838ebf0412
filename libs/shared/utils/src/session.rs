use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info};
use uuid::Uuid;

use shared_models::session::SessionStorage;

use crate::search::SearchDebouncer;

pub const SESSION_COOKIE: &str = "psicoclinic_session";

/// Server-side state of one browser session.
#[derive(Debug)]
pub struct SessionEntry {
    pub id: String,
    pub storage: SessionStorage,
    searches: Mutex<HashMap<String, Arc<SearchDebouncer>>>,
    created: Instant,
    // Milliseconds after `created` of the last request.
    last_seen_ms: AtomicU64,
}

impl SessionEntry {
    fn new(id: String) -> Self {
        Self {
            id,
            storage: SessionStorage::new(),
            searches: Mutex::new(HashMap::new()),
            created: Instant::now(),
            last_seen_ms: AtomicU64::new(0),
        }
    }

    /// Marks the session as used now.
    pub fn touch(&self) {
        let elapsed = self.created.elapsed().as_millis() as u64;
        self.last_seen_ms.fetch_max(elapsed, Ordering::Relaxed);
    }

    pub fn idle_for(&self) -> Duration {
        let last_seen = self.created + Duration::from_millis(self.last_seen_ms.load(Ordering::Relaxed));
        Instant::now().saturating_duration_since(last_seen)
    }

    /// Debouncer for one search box of this session, created on first use.
    pub async fn debouncer(&self, key: &str, delay: Duration) -> Arc<SearchDebouncer> {
        let mut searches = self.searches.lock().await;
        searches
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(SearchDebouncer::new(delay)))
            .clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    entries: Arc<RwLock<HashMap<String, Arc<SessionEntry>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Arc<SessionEntry> {
        let id = Uuid::new_v4().to_string();
        let entry = Arc::new(SessionEntry::new(id.clone()));
        self.entries.write().await.insert(id.clone(), entry.clone());
        debug!("Created session {}", id);
        entry
    }

    pub async fn get(&self, id: &str) -> Option<Arc<SessionEntry>> {
        self.entries.read().await.get(id).cloned()
    }

    pub async fn remove(&self, id: &str) {
        if self.entries.write().await.remove(id).is_some() {
            debug!("Removed session {}", id);
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Drops every session idle for at least `max_idle`. Returns how many went.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|id, entry| {
            let keep = entry.idle_for() < max_idle;
            if !keep {
                debug!("Evicting idle session {}", id);
            }
            keep
        });
        before - entries.len()
    }

    /// Background task running [`Self::evict_idle`] every `period`.
    pub fn spawn_sweeper(&self, max_idle: Duration, period: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let evicted = registry.evict_idle(max_idle).await;
                if evicted > 0 {
                    info!("Evicted {} idle sessions", evicted);
                }
            }
        })
    }
}
