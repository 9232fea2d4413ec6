//! Session layer.
//!
//! Opaque-cookie sessions held in memory: the store owns the records, the
//! cookie helpers translate between records and the `Cookie`/`Set-Cookie`
//! headers. Nothing is persisted; a restart forgets every session.

mod cookie;
mod store;

pub use cookie::{build_set_cookie, cookie_value};
pub use store::{Session, SessionHandle, SessionStore};
