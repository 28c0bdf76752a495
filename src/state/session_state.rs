// src/state/session_state.rs
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::APP_DIR;
use crate::file::{FileHandler, RonFileHandler};

/// The two keys written together when a search succeeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub search_results: Option<String>,
    pub search_query: Option<String>,
}

/// Cache of the raw taxonomy payload, keyed by the exact query that fetched it.
/// It is never the source of truth: a lookup for any other query misses.
#[derive(Debug)]
pub struct SessionCache {
    snapshot: SessionSnapshot,
    path: Option<PathBuf>,
    handler: RonFileHandler<SessionSnapshot>,
}

impl SessionCache {
    pub fn in_memory() -> Self {
        Self { snapshot: SessionSnapshot::default(), path: None, handler: RonFileHandler::new() }
    }

    /// Backed by a file so a restart can pick up where the last search left off.
    pub fn persistent(path: PathBuf) -> Self {
        let handler = RonFileHandler::new();
        let snapshot = if path.exists() {
            handler.load(&path).unwrap_or_else(|e| {
                warn!("discarding unreadable session cache: {:#}", e);
                SessionSnapshot::default()
            })
        } else {
            SessionSnapshot::default()
        };
        Self { snapshot, path: Some(path), handler }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join(APP_DIR).join("session.ron"))
    }

    pub fn store(&mut self, query: &str, raw_results: &str) {
        self.snapshot = SessionSnapshot {
            search_results: Some(raw_results.to_string()),
            search_query: Some(query.to_string()),
        };
        self.persist();
    }

    /// The stored payload, only if it was fetched for `current_query`.
    pub fn lookup(&self, current_query: Option<&str>) -> Option<&str> {
        let current = current_query?;
        match (&self.snapshot.search_query, &self.snapshot.search_results) {
            (Some(stored), Some(results)) if stored == current => Some(results.as_str()),
            (Some(stored), _) => {
                debug!("session cache holds {:?}, not {:?}", stored, current);
                None
            }
            _ => None,
        }
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    fn persist(&self) {
        if let Some(path) = &self.path {
            if let Err(e) = self.handler.save(&self.snapshot, path) {
                warn!("failed to persist session cache: {:#}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_requires_matching_query() {
        let mut cache = SessionCache::in_memory();
        cache.store("sleep apps", r#"{"Health": {}}"#);

        assert_eq!(cache.lookup(Some("sleep apps")), Some(r#"{"Health": {}}"#));
        assert_eq!(cache.lookup(Some("Sleep apps")), None);
        assert_eq!(cache.lookup(None), None);
    }

    #[test]
    fn empty_cache_misses() {
        assert_eq!(SessionCache::in_memory().lookup(Some("anything")), None);
    }

    #[test]
    fn survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.ron");

        let mut cache = SessionCache::persistent(path.clone());
        cache.store("keto", r#"{"Health": {"Diet": {}}}"#);
        drop(cache);

        let reopened = SessionCache::persistent(path);
        assert_eq!(reopened.lookup(Some("keto")), Some(r#"{"Health": {"Diet": {}}}"#));
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.ron");
        std::fs::write(&path, "this is not ron (").unwrap();

        let cache = SessionCache::persistent(path);
        assert_eq!(cache.snapshot(), &SessionSnapshot::default());
    }
}
