//! Request dispatch pipeline
//!
//! Entry point for HTTP request processing. Stages run in a fixed order and
//! any stage may finish the request; later stages never see a request a
//! stage has already answered.

use std::convert::Infallible;
use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue, COOKIE, IF_NONE_MATCH, REFERER, SET_COOKIE, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{HeaderMap, Method, Request, Response, Version};

use crate::config::AppState;
use crate::error::RequestError;
use crate::handler::{routes, security, static_assets};
use crate::http::body::{self, ParsedBody};
use crate::logger::{self, AccessLogEntry};
use crate::session::{self, SessionHandle};

/// Everything the route table needs once the early stages have run.
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub body: ParsedBody,
    pub session: SessionHandle,
}

/// Main entry point for HTTP request handling.
///
/// Always resolves to a response; request-level failures become their
/// status code here and never reach the connection task.
pub async fn handle_request<B>(
    request: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Display,
{
    let started = Instant::now();
    let (parts, raw_body) = request.into_parts();

    // 1. Hardening headers accumulate here and are merged into whatever
    //    response comes out, short-circuit or not.
    let mut outgoing = HeaderMap::new();
    security::apply(&mut outgoing);

    let mut response = match run_stages(&parts, raw_body, &state, &mut outgoing).await {
        Ok(response) => response,
        Err(error) => {
            if matches!(error, RequestError::Internal(_)) {
                logger::log_error(&format!("Request failed: {error}"));
            }
            error.into_response()
        }
    };

    // insert, not append: one copy of each accumulated header
    for (name, value) in &outgoing {
        response.headers_mut().insert(name, value.clone());
    }

    if state.config.logging.access_log {
        logger::log_access(&access_entry(&parts, remote_addr, &response, started));
    }

    Ok(response)
}

/// The short-circuiting stage sequence behind the response envelope.
async fn run_stages<B>(
    parts: &Parts,
    raw_body: B,
    state: &AppState,
    outgoing: &mut HeaderMap,
) -> Result<Response<Full<Bytes>>, RequestError>
where
    B: Body,
    B::Error: Display,
{
    let path = parts.uri.path().to_string();

    // 2. Decode the body before any routing decision, so a malformed
    //    payload is a 400 no matter which path it was aimed at.
    let parsed = body::decode(&parts.headers, raw_body, state.config.http.max_body_size).await?;

    // 3. Resolve the session; new ones queue a Set-Cookie.
    let resolved = attach_session(parts, state, outgoing).await;

    // 4. Static assets, GET only.
    if parts.method == Method::GET {
        let revalidation = header_str(&parts.headers, IF_NONE_MATCH);
        if let Some(response) =
            static_assets::serve(&state.config.assets.root, &path, revalidation).await?
        {
            return Ok(response);
        }
    }

    // 5. Route table decides everything else.
    let context = RequestContext {
        method: parts.method.clone(),
        path,
        body: parsed,
        session: resolved,
    };
    routes::route(&context, state)
}

/// Look up the request's session record, creating one on first contact.
async fn attach_session(
    parts: &Parts,
    state: &AppState,
    outgoing: &mut HeaderMap,
) -> SessionHandle {
    let cookie_name = &state.config.session.cookie_name;
    let presented = session::cookie_value(header_str(&parts.headers, COOKIE), cookie_name);
    let handle = state.sessions.resolve(presented).await;

    if handle.is_new {
        let cookie =
            session::build_set_cookie(cookie_name, &handle.id, state.config.session.ttl_secs);
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                outgoing.insert(SET_COOKIE, value);
            }
            Err(e) => logger::log_error(&format!("Failed to encode session cookie: {e}")),
        }
    }

    handle
}

fn access_entry(
    parts: &Parts,
    remote_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: Instant,
) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        remote_addr.to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = version_label(parts.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes =
        usize::try_from(response.body().size_hint().exact().unwrap_or(0)).unwrap_or(usize::MAX);
    entry.referer = header_str(&parts.headers, REFERER).map(ToString::to_string);
    entry.user_agent = header_str(&parts.headers, USER_AGENT).map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn version_label(version: Version) -> &'static str {
    if version == Version::HTTP_11 {
        "1.1"
    } else if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else if version == Version::HTTP_3 {
        "3"
    } else {
        "0.9"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::Config;
    use chrono::{TimeZone, Utc};

    fn test_state() -> Arc<AppState> {
        let mut config = Config::default();
        config.logging.access_log = false;
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        Arc::new(AppState::new(config, Arc::new(clock)))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:9999".parse().unwrap()
    }

    fn get(path: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    #[tokio::test]
    async fn security_headers_reach_success_responses() {
        let state = test_state();
        let response = handle_request(get("/"), state, peer()).await.unwrap();

        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "SAMEORIGIN");
    }

    #[tokio::test]
    async fn security_headers_reach_error_responses_once() {
        let state = test_state();
        let response = handle_request(get("/missing"), state, peer())
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
        assert_eq!(
            response
                .headers()
                .get_all("x-content-type-options")
                .iter()
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn malformed_body_short_circuits_before_routing() {
        let state = test_state();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/definitely-not-a-route")
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from_static(b"{broken")))
            .unwrap();

        let response = handle_request(request, Arc::clone(&state), peer())
            .await
            .unwrap();

        // 400 beats the 404 the route table would have produced.
        assert_eq!(response.status(), 400);
        // The body stage failed first, so no session was established.
        assert!(state.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn first_request_sets_a_session_cookie() {
        let state = test_state();
        let response = handle_request(get("/health"), Arc::clone(&state), peer())
            .await
            .unwrap();

        let cookie = response.headers()["set-cookie"].to_str().unwrap();
        assert!(cookie.starts_with("sid="));
        assert!(cookie.contains("HttpOnly"));
        assert_eq!(state.sessions.len().await, 1);
    }

    #[tokio::test]
    async fn replayed_session_cookie_is_not_reissued() {
        let state = test_state();
        let first = handle_request(get("/health"), Arc::clone(&state), peer())
            .await
            .unwrap();
        let cookie = first.headers()["set-cookie"].to_str().unwrap();
        let pair = cookie.split(';').next().unwrap().to_string();

        let replay = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .header("cookie", &pair)
            .body(Full::new(Bytes::new()))
            .unwrap();
        let second = handle_request(replay, Arc::clone(&state), peer())
            .await
            .unwrap();

        assert!(second.headers().get("set-cookie").is_none());
        assert_eq!(state.sessions.len().await, 1);
    }

    #[test]
    fn version_labels_match_the_wire() {
        assert_eq!(version_label(Version::HTTP_10), "1.0");
        assert_eq!(version_label(Version::HTTP_11), "1.1");
        assert_eq!(version_label(Version::HTTP_2), "2");
    }
}
