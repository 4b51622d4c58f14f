use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use dashmap::DashMap;
use crate::models::{ClassificationResult, DiagnosisContext};
use tracing::{debug, info};

/// Identity of one prediction request within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionTicket {
    pub session_id: String,
    pub seq: u64,
}

#[derive(Debug, Default)]
struct SessionEntry {
    latest_seq: u64,
    context: Option<DiagnosisContext>,
    touched: Option<Instant>,
}

/// Per-session diagnosis context with last-request-wins ordering.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionEntry>>,
    // Store-wide so a ticket issued before `clear` never matches a later one
    next_seq: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new prediction for `session_id`. Supersedes anything in flight
    /// and clears the previous context.
    pub fn begin(&self, session_id: &str) -> PredictionTicket {
        let mut entry = self.sessions.entry(session_id.to_string()).or_default();
        // Issued under the entry lock so seq order matches begin order per session
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
        entry.latest_seq = seq;
        entry.context = None;
        entry.touched = Some(Instant::now());
        PredictionTicket { session_id: session_id.to_string(), seq }
    }

    /// Store the result unless a newer prediction was started meanwhile.
    pub fn commit(&self, ticket: &PredictionTicket, result: &ClassificationResult) -> bool {
        let Some(mut entry) = self.sessions.get_mut(&ticket.session_id) else {
            return false;
        };
        if entry.latest_seq != ticket.seq {
            debug!(
                session = %ticket.session_id,
                seq = ticket.seq,
                latest = entry.latest_seq,
                "Discarding superseded prediction"
            );
            return false;
        }
        entry.context = Some(DiagnosisContext::new(result.clone()));
        entry.touched = Some(Instant::now());
        true
    }

    pub fn context(&self, session_id: &str) -> Option<DiagnosisContext> {
        let mut entry = self.sessions.get_mut(session_id)?;
        entry.touched = Some(Instant::now());
        entry.context.clone()
    }

    pub fn clear(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Drop sessions idle for longer than `ttl`. Returns how many were removed.
    pub fn purge_idle(&self, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| {
            entry.touched.map_or(false, |t| t.elapsed() <= ttl)
        });
        before.saturating_sub(self.sessions.len())
    }

    /// Run `purge_idle` every `interval` until the returned handle is aborted.
    pub fn spawn_purge_task(&self, ttl: Duration, interval: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = store.purge_idle(ttl);
                if removed > 0 {
                    info!(removed, remaining = store.len(), "Purged idle sessions");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(label: &str) -> ClassificationResult {
        ClassificationResult::new(label, 80.0)
    }

    #[test]
    fn test_commit_then_read() {
        let store = SessionStore::new();
        let ticket = store.begin("s1");
        assert!(store.commit(&ticket, &result("mel")));
        assert_eq!(store.context("s1").unwrap().label(), "mel");
    }

    #[test]
    fn test_late_response_cannot_overwrite_newer() {
        let store = SessionStore::new();
        let first = store.begin("s1");
        let second = store.begin("s1");

        assert!(store.commit(&second, &result("bcc")));
        assert!(!store.commit(&first, &result("mel")));
        assert_eq!(store.context("s1").unwrap().label(), "bcc");
    }

    #[test]
    fn test_superseded_request_finishing_first_is_dropped() {
        let store = SessionStore::new();
        let first = store.begin("s1");
        let _second = store.begin("s1");

        assert!(!store.commit(&first, &result("mel")));
        assert!(store.context("s1").is_none());
    }

    #[test]
    fn test_new_prediction_clears_context() {
        let store = SessionStore::new();
        let ticket = store.begin("s1");
        store.commit(&ticket, &result("nv"));
        store.begin("s1");
        assert!(store.context("s1").is_none());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.begin("a");
        let b = store.begin("b");
        assert!(store.commit(&a, &result("df")));
        assert!(store.commit(&b, &result("vasc")));
        assert_eq!(store.context("a").unwrap().label(), "df");
        assert_eq!(store.context("b").unwrap().label(), "vasc");
    }

    #[test]
    fn test_commit_after_clear_is_ignored() {
        let store = SessionStore::new();
        let ticket = store.begin("s1");
        assert!(store.clear("s1"));
        assert!(!store.commit(&ticket, &result("mel")));
        assert!(store.context("s1").is_none());
        assert!(!store.clear("s1"));
    }

    #[test]
    fn test_ticket_from_before_clear_cannot_commit_into_new_session() {
        let store = SessionStore::new();
        let stale = store.begin("s1");
        store.clear("s1");
        let fresh = store.begin("s1");
        assert_ne!(stale.seq, fresh.seq);
        assert!(!store.commit(&stale, &result("mel")));
        assert!(store.commit(&fresh, &result("bkl")));
        assert_eq!(store.context("s1").unwrap().label(), "bkl");
    }

    #[test]
    fn test_purge_idle() {
        let store = SessionStore::new();
        store.begin("old");
        std::thread::sleep(Duration::from_millis(30));
        store.begin("fresh");

        let removed = store.purge_idle(Duration::from_millis(20));
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.context("old").is_none());
    }

    #[tokio::test]
    async fn test_purge_task_expires_sessions() {
        let store = SessionStore::new();
        store.begin("s1");
        let handle = store.spawn_purge_task(Duration::from_millis(10), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(150)).await;
        handle.abort();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        let ticket = store.begin("s1");
        other.commit(&ticket, &result("akiec"));
        assert_eq!(store.context("s1").unwrap().label(), "akiec");
        assert!(!store.is_empty());
    }
}
