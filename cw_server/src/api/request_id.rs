//! Request correlation ids.
//!
//! Every request is tagged with an `x-request-id` (caller-supplied or minted
//! here), which is echoed on the response, attached to the entry and exit log
//! events, and stashed in request extensions for handlers to read.

use std::fmt;
use std::time::Instant;

use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, HeaderValue, StatusCode, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::metrics;

/// Header carrying the correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Caller-supplied id, if the header is present and readable.
fn incoming_id(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(REQUEST_ID_HEADER)?;
    value.to_str().ok().map(str::to_owned)
}

/// Tags the request with a correlation id and measures it.
///
/// The id is taken from the incoming `x-request-id` header when present,
/// otherwise a fresh UUID is minted. It is inserted into request extensions
/// (see [`RequestId`]), logged on entry and exit, and echoed back on the
/// response. Request count and latency are recorded as metrics.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let id = incoming_id(request.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    request.extensions_mut().insert(RequestId(id.clone()));
    tracing::info!(request_id = %id, %method, uri = %request.uri(), "request received");

    let started = Instant::now();
    let mut response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    metrics::http_request(method.as_str(), &path, response.status().as_u16(), elapsed_ms);

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    tracing::info!(request_id = %id, status = %response.status(), "request finished");

    response
}

/// Correlation id of the current request, readable from any handler.
///
/// Extraction relies on [`request_id_middleware`] having run; routers without
/// that layer reject the extraction with a 500.
///
/// ```no_run
/// use axum::{Router, routing::get};
/// use cw_server::api::request_id::{RequestId, request_id_middleware};
///
/// async fn whoami(id: RequestId) -> String {
///     format!("handled as {id}")
/// }
///
/// let app: Router = Router::new()
///     .route("/whoami", get(whoami))
///     .layer(axum::middleware::from_fn(request_id_middleware));
/// ```
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<RequestId>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "request id missing from extensions",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incoming_id_prefers_caller_header() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-42"));
        assert_eq!(incoming_id(&headers).as_deref(), Some("abc-42"));
    }

    #[test]
    fn test_incoming_id_absent_without_header() {
        assert_eq!(incoming_id(&HeaderMap::new()), None);
    }

    #[test]
    fn test_incoming_id_rejects_unreadable_values() {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_bytes(b"\xff\xfe").unwrap();
        headers.insert(REQUEST_ID_HEADER, value);
        assert_eq!(incoming_id(&headers), None);
    }

    #[test]
    fn test_request_id_displays_inner_value() {
        let id = RequestId("7d9f".to_string());
        assert_eq!(id.to_string(), "7d9f");
        assert_eq!(id.as_str(), "7d9f");
    }
}
