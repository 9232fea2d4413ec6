// Application state module
// Everything a connection task needs, shared behind one Arc

use std::sync::Arc;
use std::time::Instant;

use crate::clock::Clock;
use crate::session::SessionStore;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub sessions: SessionStore,
    started: Instant,
}

impl AppState {
    /// Create `AppState` with the given clock driving session expiry and
    /// health timestamps.
    #[must_use]
    pub fn new(config: Config, clock: Arc<dyn Clock>) -> Self {
        let ttl = chrono::Duration::seconds(config.session.ttl_secs);
        let sessions = SessionStore::new(ttl, Arc::clone(&clock));

        Self {
            config,
            clock,
            sessions,
            started: Instant::now(),
        }
    }

    /// Seconds since this state was built, which is process start for all
    /// practical purposes. Monotonic by construction.
    #[must_use]
    pub fn uptime_seconds(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}
