use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::session::{Role, Session};

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

struct Entry {
    session: Session,
    /// Milliseconds since the store's epoch.
    last_access: AtomicU64,
}

/// In-memory session registry shared by all handlers.
///
/// Each closure passed to [`read`](Self::read) or [`write`](Self::write) runs
/// under the lock, so it must stay synchronous and short. Sessions untouched
/// for longer than the TTL are dropped by [`evict_idle`](Self::evict_idle).
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    epoch: Instant,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            epoch: Instant::now(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    pub async fn create(&self, role: Role) -> Session {
        self.evict_idle().await;
        let session = Session::new(role);
        let entry = Entry {
            session: session.clone(),
            last_access: AtomicU64::new(self.now_ms()),
        };
        self.inner.write().await.insert(session.id(), entry);
        debug!(session_id = %session.id(), %role, "session created");
        session
    }

    pub async fn read<R>(&self, id: Uuid, f: impl FnOnce(&Session) -> R) -> Option<R> {
        let now = self.now_ms();
        let map = self.inner.read().await;
        let entry = map.get(&id)?;
        entry.last_access.store(now, Ordering::Relaxed);
        Some(f(&entry.session))
    }

    pub async fn write<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        let now = self.now_ms();
        let mut map = self.inner.write().await;
        let entry = map.get_mut(&id)?;
        *entry.last_access.get_mut() = now;
        Some(f(&mut entry.session))
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.inner.write().await.remove(&id).is_some();
        if removed {
            debug!(session_id = %id, "session removed");
        }
        removed
    }

    /// Drops sessions idle for longer than the TTL. Returns how many were dropped.
    pub async fn evict_idle(&self) -> usize {
        let cutoff = self.ttl.as_millis() as u64;
        let now = self.now_ms();
        let mut map = self.inner.write().await;
        let before = map.len();
        map.retain(|_, e| now.saturating_sub(e.last_access.load(Ordering::Relaxed)) <= cutoff);
        let evicted = before - map.len();
        if evicted > 0 {
            info!(evicted, remaining = map.len(), "idle sessions evicted");
        }
        evicted
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
