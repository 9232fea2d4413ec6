//! Request body decoding module
//!
//! Content-type driven decoding for the pipeline's body stage: JSON bodies
//! become a structured value, form-encoded bodies become flat key/value
//! pairs, anything else passes through untouched. Oversized and malformed
//! bodies fail the request before routing happens.

use http_body_util::BodyExt;
use hyper::body::Body;
use hyper::HeaderMap;
use percent_encoding::percent_decode_str;

use crate::error::RequestError;

/// Decoded request body attached to the request context.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    /// No body, an empty body, or a content type the stage does not decode.
    Absent,
    /// `application/json`
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded`, flat pairs in arrival order.
    /// Nested keys are not interpreted; duplicates are kept.
    Form(Vec<(String, String)>),
}

#[derive(Clone, Copy)]
enum BodyKind {
    Json,
    Form,
}

/// Collect and decode a request body according to its declared content type.
pub async fn decode<B>(
    headers: &HeaderMap,
    body: B,
    max_body_size: u64,
) -> Result<ParsedBody, RequestError>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let Some(kind) = body_kind(headers) else {
        return Ok(ParsedBody::Absent);
    };

    // Reject on the declared length first so oversized uploads are not
    // buffered at all.
    if let Some(declared) = declared_length(headers) {
        if declared > max_body_size {
            return Err(RequestError::PayloadTooLarge {
                size: declared,
                limit: max_body_size,
            });
        }
    }

    let bytes = body
        .collect()
        .await
        .map_err(|e| RequestError::BadRequest(format!("failed to read request body: {e}")))?
        .to_bytes();

    if bytes.len() as u64 > max_body_size {
        return Err(RequestError::PayloadTooLarge {
            size: bytes.len() as u64,
            limit: max_body_size,
        });
    }
    if bytes.is_empty() {
        return Ok(ParsedBody::Absent);
    }

    match kind {
        BodyKind::Json => parse_json(&bytes),
        BodyKind::Form => parse_form(&bytes),
    }
}

/// Which decoder the declared content type selects, if any.
fn body_kind(headers: &HeaderMap) -> Option<BodyKind> {
    let content_type = headers.get("content-type")?.to_str().ok()?;
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    match media_type.as_str() {
        "application/json" => Some(BodyKind::Json),
        "application/x-www-form-urlencoded" => Some(BodyKind::Form),
        _ => None,
    }
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get("content-length")?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn parse_json(bytes: &[u8]) -> Result<ParsedBody, RequestError> {
    serde_json::from_slice(bytes)
        .map(ParsedBody::Json)
        .map_err(|e| RequestError::BadRequest(format!("invalid JSON body: {e}")))
}

fn parse_form(bytes: &[u8]) -> Result<ParsedBody, RequestError> {
    let raw = std::str::from_utf8(bytes)
        .map_err(|_| RequestError::BadRequest("form body is not valid UTF-8".to_string()))?;

    let mut pairs = Vec::new();
    for segment in raw.split('&').filter(|segment| !segment.is_empty()) {
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        pairs.push((decode_component(key)?, decode_component(value)?));
    }
    Ok(ParsedBody::Form(pairs))
}

/// Decode one form component: `+` means space, then percent-decoding.
fn decode_component(raw: &str) -> Result<String, RequestError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| RequestError::BadRequest("form component is not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};

    const LIMIT: u64 = 102_400;

    fn headers_with_type(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    fn body_of(content: &str) -> Full<Bytes> {
        Full::new(Bytes::from(content.to_string()))
    }

    #[tokio::test]
    async fn json_body_becomes_a_value() {
        let headers = headers_with_type("application/json");
        let parsed = decode(&headers, body_of(r#"{"user":"mallory","n":3}"#), LIMIT)
            .await
            .unwrap();

        let ParsedBody::Json(value) = parsed else {
            panic!("expected JSON body");
        };
        assert_eq!(value["user"], "mallory");
        assert_eq!(value["n"], 3);
    }

    #[tokio::test]
    async fn json_with_charset_parameter_still_decodes() {
        let headers = headers_with_type("application/json; charset=utf-8");
        let parsed = decode(&headers, body_of("[1,2]"), LIMIT).await.unwrap();
        assert!(matches!(parsed, ParsedBody::Json(_)));
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let headers = headers_with_type("application/json");
        let err = decode(&headers, body_of("{not json"), LIMIT)
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::BadRequest(_)));
    }

    #[tokio::test]
    async fn form_body_becomes_flat_pairs() {
        let headers = headers_with_type("application/x-www-form-urlencoded");
        let parsed = decode(&headers, body_of("name=J+Doe&city=S%C3%A3o"), LIMIT)
            .await
            .unwrap();

        assert_eq!(
            parsed,
            ParsedBody::Form(vec![
                ("name".to_string(), "J Doe".to_string()),
                ("city".to_string(), "São".to_string()),
            ])
        );
    }

    #[tokio::test]
    async fn form_key_without_value_gets_empty_string() {
        let headers = headers_with_type("application/x-www-form-urlencoded");
        let parsed = decode(&headers, body_of("flag&x=1"), LIMIT).await.unwrap();
        assert_eq!(
            parsed,
            ParsedBody::Form(vec![
                ("flag".to_string(), String::new()),
                ("x".to_string(), "1".to_string()),
            ])
        );
    }

    #[tokio::test]
    async fn duplicate_form_keys_are_kept_in_order() {
        let headers = headers_with_type("application/x-www-form-urlencoded");
        let parsed = decode(&headers, body_of("k=1&k=2"), LIMIT).await.unwrap();
        assert_eq!(
            parsed,
            ParsedBody::Form(vec![
                ("k".to_string(), "1".to_string()),
                ("k".to_string(), "2".to_string()),
            ])
        );
    }

    #[tokio::test]
    async fn undeclared_content_type_passes_through() {
        let headers = HeaderMap::new();
        let parsed = decode(&headers, body_of("whatever"), LIMIT).await.unwrap();
        assert_eq!(parsed, ParsedBody::Absent);
    }

    #[tokio::test]
    async fn unhandled_content_type_passes_through() {
        let headers = headers_with_type("text/xml");
        let parsed = decode(&headers, body_of("<a/>"), LIMIT).await.unwrap();
        assert_eq!(parsed, ParsedBody::Absent);
    }

    #[tokio::test]
    async fn empty_body_is_absent_even_with_json_type() {
        let headers = headers_with_type("application/json");
        let parsed = decode(&headers, body_of(""), LIMIT).await.unwrap();
        assert_eq!(parsed, ParsedBody::Absent);
    }

    #[tokio::test]
    async fn declared_oversize_is_rejected_up_front() {
        let mut headers = headers_with_type("application/json");
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("200000"));
        let err = decode(&headers, body_of("{}"), 1024).await.unwrap_err();
        assert!(matches!(err, RequestError::PayloadTooLarge { .. }));
    }

    #[tokio::test]
    async fn actual_oversize_is_rejected_after_collect() {
        let headers = headers_with_type("application/json");
        let big = "x".repeat(2048);
        let err = decode(&headers, body_of(&big), 1024).await.unwrap_err();
        assert!(matches!(
            err,
            RequestError::PayloadTooLarge { size: 2048, .. }
        ));
    }
}
