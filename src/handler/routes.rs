//! Route table
//!
//! The last pipeline stage: a fixed match over method and path. Anything the
//! table does not name is a `NotFound`, including non-GET methods aimed at
//! known paths.

use chrono::SecondsFormat;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response, StatusCode};
use serde::Serialize;

use crate::config::AppState;
use crate::error::RequestError;
use crate::handler::pages::render_home_page;
use crate::handler::pipeline::RequestContext;
use crate::http::response::{html_response, json_response};
use crate::manifest;

/// `GET /health` payload.
#[derive(Debug, Serialize)]
struct HealthPayload {
    status: &'static str,
    timestamp: String,
    dependencies: usize,
}

/// `GET /api/info` payload.
#[derive(Debug, Serialize)]
struct InfoPayload {
    app: &'static str,
    version: &'static str,
    runtime: &'static str,
    uptime: f64,
}

/// Dispatch a fully prepared request to its handler.
pub fn route(
    context: &RequestContext,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, RequestError> {
    match (&context.method, context.path.as_str()) {
        (&Method::GET, "/") => Ok(html_response(render_home_page())),
        (&Method::GET, "/health") => Ok(json_response(StatusCode::OK, &health_payload(state))),
        (&Method::GET, "/api/info") => Ok(json_response(StatusCode::OK, &info_payload(state))),
        _ => Err(RequestError::NotFound {
            method: context.method.to_string(),
            path: context.path.clone(),
        }),
    }
}

fn health_payload(state: &AppState) -> HealthPayload {
    HealthPayload {
        status: "healthy",
        timestamp: state
            .clock
            .now()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        dependencies: manifest::runtime_dependency_count(),
    }
}

fn info_payload(state: &AppState) -> InfoPayload {
    InfoPayload {
        app: manifest::APP_NAME,
        version: manifest::APP_VERSION,
        runtime: manifest::RUNTIME_VERSION,
        uptime: state.uptime_seconds(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::Config;
    use crate::http::ParsedBody;
    use crate::session::SessionHandle;
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use std::sync::Arc;

    fn test_state() -> AppState {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        AppState::new(Config::default(), Arc::new(clock))
    }

    fn get(path: &str) -> RequestContext {
        RequestContext {
            method: Method::GET,
            path: path.to_string(),
            body: ParsedBody::Absent,
            session: SessionHandle {
                id: "fixed-test-session".to_string(),
                is_new: false,
            },
        }
    }

    async fn body_json(response: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn home_page_is_html() {
        let state = test_state();
        let response = route(&get("/"), &state).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/html; charset=utf-8"
        );

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Socket Security Demo"));
    }

    #[tokio::test]
    async fn health_reports_status_timestamp_and_dependencies() {
        let state = test_state();
        let response = route(&get("/health"), &state).unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let value = body_json(response).await;
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["timestamp"], "2025-06-01T12:00:00.000Z");
        assert_eq!(
            value["dependencies"],
            manifest::runtime_dependency_count() as u64
        );
    }

    #[tokio::test]
    async fn info_reports_application_metadata() {
        let state = test_state();
        let response = route(&get("/api/info"), &state).unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let value = body_json(response).await;
        assert_eq!(value["app"], "Socket NodeGoat Demo");
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(value["runtime"], manifest::RUNTIME_VERSION);
        assert!(value["uptime"].as_f64().unwrap() >= 0.0);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let state = test_state();
        let err = route(&get("/missing"), &state).unwrap_err();
        assert!(matches!(err, RequestError::NotFound { .. }));
    }

    #[tokio::test]
    async fn known_path_with_wrong_method_is_not_found() {
        let state = test_state();
        let mut context = get("/health");
        context.method = Method::POST;

        let err = route(&context, &state).unwrap_err();
        let RequestError::NotFound { method, path } = err else {
            panic!("expected NotFound");
        };
        assert_eq!(method, "POST");
        assert_eq!(path, "/health");
    }
}
