// Server module entry
// Listener setup, per-connection serving, the accept loop, and shutdown

pub mod connection;
pub mod listener;
pub mod run;
pub mod signal;

// Re-export commonly used entry points
pub use listener::create_listener;
pub use run::serve;
pub use signal::spawn_shutdown_listener;
