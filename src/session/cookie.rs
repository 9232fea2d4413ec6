//! Session cookie parsing and construction.

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Length of generated session identifiers. 64 alphanumeric characters
/// carry well over the recommended 64 bits of session-id entropy.
const ID_LENGTH: usize = 64;

/// Generate a fresh opaque session identifier.
pub(super) fn generate_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Extract the named cookie's value from a `Cookie` header.
///
/// Returns `None` when the header is absent, the cookie is not present, or
/// its value is empty.
#[must_use]
pub fn cookie_value<'a>(header: Option<&'a str>, name: &str) -> Option<&'a str> {
    let header = header?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name && !value.is_empty()).then_some(value)
    })
}

/// Build the `Set-Cookie` value issued with a new session.
///
/// Mirrors the demo's cookie settings: http-only, scoped to the whole site,
/// expiring with the session record.
#[must_use]
pub fn build_set_cookie(name: &str, id: &str, ttl_secs: i64) -> String {
    format!("{name}={id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}")
}
