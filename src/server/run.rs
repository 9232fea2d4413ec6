// Accept loop module
// Drives connection acceptance, the periodic session sweep, and shutdown

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

use super::connection::spawn_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop until `shutdown` fires.
///
/// Expired sessions are reaped lazily on presentation; the timer here just
/// keeps abandoned records from lingering in memory.
#[allow(clippy::ignored_unit_patterns)]
pub async fn serve(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    let sweep_secs = state.config.session.sweep_interval_secs.max(1);
    let mut sweep = tokio::time::interval(Duration::from_secs(sweep_secs));
    sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // An interval's first tick completes immediately; consume it here so the
    // first sweep happens one full period in.
    sweep.tick().await;

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        spawn_connection(stream, peer_addr, Arc::clone(&state));
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = sweep.tick() => {
                let removed = state.sessions.purge_expired().await;
                logger::log_session_sweep(removed);
            }

            _ = shutdown.notified() => {
                logger::log_server_stop("Signal received, server exiting");
                break;
            }
        }
    }
}
