// src/services/session_store.rs
// DOCUMENTATION: In-memory registry of live locator sessions
// PURPOSE: Hand out per-visit state by id and expire idle visits

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use super::session::LocatorSession;

pub type SharedSession = Arc<Mutex<LocatorSession>>;

/// Session entry with idle tracking
#[derive(Debug)]
struct SessionEntry {
    session: SharedSession,
    last_access: Instant,
}

impl SessionEntry {
    fn new(session: LocatorSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            last_access: Instant::now(),
        }
    }

    fn is_expired(&self, idle_ttl: Duration) -> bool {
        self.last_access.elapsed() > idle_ttl
    }
}

/// Thread-safe session registry
/// DOCUMENTATION: Sessions expire after `idle_ttl` without a request
pub struct SessionStore {
    store: RwLock<HashMap<Uuid, SessionEntry>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Register a session and return its shared handle
    pub async fn insert(&self, session: LocatorSession) -> SharedSession {
        let id = session.id;
        let entry = SessionEntry::new(session);
        let handle = entry.session.clone();
        self.store.write().await.insert(id, entry);
        log::debug!("Session {} registered", id);
        handle
    }

    /// Look up a live session, refreshing its idle timer
    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        let mut store = self.store.write().await;

        match store.get_mut(id) {
            Some(entry) if !entry.is_expired(self.idle_ttl) => {
                entry.last_access = Instant::now();
                Some(entry.session.clone())
            }
            Some(_) => {
                log::debug!("Session {} EXPIRED", id);
                store.remove(id);
                None
            }
            None => None,
        }
    }

    /// Drop a session; returns whether it existed
    pub async fn remove(&self, id: &Uuid) -> bool {
        self.store.write().await.remove(id).is_some()
    }

    /// Clear expired sessions
    pub async fn cleanup(&self) {
        let mut store = self.store.write().await;
        let before_count = store.len();
        let idle_ttl = self.idle_ttl;
        store.retain(|_, entry| !entry.is_expired(idle_ttl));
        let after_count = store.len();

        if before_count > after_count {
            log::info!(
                "Session cleanup: removed {} idle sessions ({} remaining)",
                before_count - after_count,
                after_count
            );
        }
    }

    pub async fn stats(&self) -> SessionStats {
        let store = self.store.read().await;
        let total = store.len();
        let expired = store
            .values()
            .filter(|e| e.is_expired(self.idle_ttl))
            .count();

        SessionStats {
            total_sessions: total,
            expired_sessions: expired,
            active_sessions: total - expired,
        }
    }
}

/// Session statistics
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_sessions: usize,
    pub expired_sessions: usize,
    pub active_sessions: usize,
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically removes idle sessions
pub fn start_cleanup_task(store: Arc<SessionStore>, interval: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(interval);

        loop {
            interval.tick().await;
            store.cleanup().await;
        }
    });
}
