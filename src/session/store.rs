//! In-memory session records with a fixed time-to-live.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clock::Clock;

use super::cookie::generate_id;

/// One server-side session record.
///
/// Carries no application fields yet; the record's existence is the state.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Outcome of attaching a session to a request.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: String,
    /// True when this request caused the record to be created.
    pub is_new: bool,
}

/// Keyed store of live sessions.
///
/// Expiry is judged against the injected clock, never the wall clock
/// directly. Expired records are dropped when presented again and by the
/// periodic sweep.
pub struct SessionStore {
    records: RwLock<HashMap<String, Session>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Attach a session for the presented identifier, creating one if the
    /// identifier is absent, unknown, or expired.
    ///
    /// A client-proposed identifier is never adopted as-is; new records
    /// always get a server-generated id.
    pub async fn resolve(&self, presented: Option<&str>) -> SessionHandle {
        let now = self.clock.now();

        // Fast path: a live record for the presented id.
        if let Some(id) = presented {
            let records = self.records.read().await;
            if let Some(record) = records.get(id) {
                if !record.is_expired(now) {
                    return SessionHandle {
                        id: record.id.clone(),
                        is_new: false,
                    };
                }
            }
        }

        let mut records = self.records.write().await;

        // Re-check under the write lock; another task may have resolved the
        // same id between the two lock acquisitions.
        if let Some(id) = presented {
            match records.get(id) {
                Some(record) if !record.is_expired(now) => {
                    return SessionHandle {
                        id: record.id.clone(),
                        is_new: false,
                    };
                }
                Some(_) => {
                    records.remove(id);
                }
                None => {}
            }
        }

        let record = Session {
            id: generate_id(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        let handle = SessionHandle {
            id: record.id.clone(),
            is_new: true,
        };
        records.insert(record.id.clone(), record);
        handle
    }

    /// True when a live (non-expired) record exists for `id`.
    pub async fn contains(&self, id: &str) -> bool {
        let now = self.clock.now();
        let records = self.records.read().await;
        records.get(id).is_some_and(|record| !record.is_expired(now))
    }

    /// Number of stored records, expired-but-unswept included.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Drop every record whose expiry has passed. Returns how many went.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        before - records.len()
    }
}
