use credtech_core::dashboard::DashboardView;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Upper bound on live dashboard views; the least recently seen one is
/// unmounted to make room.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// A dashboard view instance bound to one browser session.
#[derive(Debug)]
pub struct SessionEntry {
    view: DashboardView,
    last_seen: Mutex<Instant>,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            view: DashboardView::default(),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    fn touch(&self) {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    fn last_seen(&self) -> Instant {
        *self.last_seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Live dashboard views keyed by session id. Removing an entry unmounts its
/// view, so responses still in flight for it are dropped.
#[derive(Debug)]
pub struct DashboardSessions {
    entries: RwLock<HashMap<Uuid, Arc<SessionEntry>>>,
    max_sessions: usize,
}

impl Default for DashboardSessions {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl DashboardSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Returns the live session for `id`, or mounts a new one under a fresh id.
    pub async fn open(&self, id: Option<Uuid>) -> (Uuid, Arc<SessionEntry>) {
        if let Some(id) = id {
            if let Some(entry) = self.get(id).await {
                return (id, entry);
            }
        }

        let id = Uuid::new_v4();
        let entry = Arc::new(SessionEntry::new());

        let mut entries = self.entries.write().await;
        while entries.len() >= self.max_sessions {
            let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen())
                .map(|(id, _)| *id)
            else {
                break;
            };
            if let Some(evicted) = entries.remove(&oldest) {
                evicted.view.unmount();
            }
            tracing::warn!(
                session = %oldest,
                max = self.max_sessions,
                "session limit reached; evicted oldest dashboard view"
            );
        }
        entries.insert(id, Arc::clone(&entry));
        drop(entries);

        tracing::debug!(session = %id, "dashboard view mounted");
        (id, entry)
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<SessionEntry>> {
        let entry = self.entries.read().await.get(&id).cloned()?;
        entry.touch();
        Some(entry)
    }

    pub async fn close(&self, id: Uuid) -> bool {
        let Some(entry) = self.entries.write().await.remove(&id) else {
            return false;
        };
        entry.view.unmount();
        tracing::debug!(session = %id, "dashboard view unmounted");
        true
    }

    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| {
            let live = entry.last_seen().elapsed() <= max_idle;
            if !live {
                entry.view.unmount();
            }
            live
        });
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_reuses_live_sessions() {
        let sessions = DashboardSessions::new();
        let (id, _) = sessions.open(None).await;
        let (again, _) = sessions.open(Some(id)).await;
        assert_eq!(id, again);
        assert_eq!(sessions.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_ids_get_a_fresh_session() {
        let sessions = DashboardSessions::new();
        let stranger = Uuid::new_v4();
        let (id, _) = sessions.open(Some(stranger)).await;
        assert_ne!(id, stranger);
        assert!(sessions.get(stranger).await.is_none());
    }

    #[tokio::test]
    async fn close_unmounts_the_view() {
        let sessions = DashboardSessions::new();
        let (id, entry) = sessions.open(None).await;

        assert!(sessions.close(id).await);
        assert!(!entry.view().is_mounted());
        assert!(sessions.is_empty().await);
        assert!(!sessions.close(id).await);
    }

    #[tokio::test]
    async fn evicts_only_idle_sessions() {
        let sessions = DashboardSessions::new();
        let (stale_id, stale) = sessions.open(None).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        let (fresh_id, _) = sessions.open(None).await;

        let evicted = sessions.evict_idle(Duration::from_millis(20)).await;

        assert_eq!(evicted, 1);
        assert!(!stale.view().is_mounted());
        assert!(sessions.get(stale_id).await.is_none());
        assert!(sessions.get(fresh_id).await.is_some());
    }

    #[tokio::test]
    async fn open_at_capacity_evicts_least_recently_seen() {
        let sessions = DashboardSessions::with_capacity(2);
        let (oldest_id, oldest) = sessions.open(None).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let (kept_id, _) = sessions.open(None).await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        let (newest_id, _) = sessions.open(None).await;

        assert_eq!(sessions.len().await, 2);
        assert!(!oldest.view().is_mounted());
        assert!(sessions.get(oldest_id).await.is_none());
        assert!(sessions.get(kept_id).await.is_some());
        assert!(sessions.get(newest_id).await.is_some());
    }

    #[tokio::test]
    async fn touched_sessions_survive_the_limit() {
        let sessions = DashboardSessions::with_capacity(2);
        let (first_id, _) = sessions.open(None).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let (second_id, second) = sessions.open(None).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        sessions.get(first_id).await;

        sessions.open(None).await;

        assert!(sessions.get(first_id).await.is_some());
        assert!(sessions.get(second_id).await.is_none());
        assert!(!second.view().is_mounted());
    }
}
