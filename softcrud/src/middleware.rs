//! Request tracking middleware
//!
//! Every request gets an `x-request-id` (kept if the client sent one) that is
//! echoed on the response and recorded on the trace span. Credential headers
//! are marked sensitive so they never reach the logs.

use http::Request;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};
use uuid::Uuid;

/// Header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Prefix of generated request ids
pub const REQUEST_ID_PREFIX: &str = "req_";

/// Sensitive headers that should be masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie", "x-api-key"];

/// Generates time-ordered request ids such as `req_0190b7c1d2e37f4a8b9c0d1e2f3a4b5c`
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid7;

impl MakeRequestId for MakeRequestUuid7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = format!("{REQUEST_ID_PREFIX}{}", Uuid::now_v7().simple());
        let header_value = http::HeaderValue::from_str(&id).ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Layer that assigns a request id to requests lacking one
pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid7> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid7)
}

/// Layer that copies the request id onto the response
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Layer that hides credential headers from logs
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new(
        SENSITIVE_HEADERS
            .iter()
            .copied()
            .map(http::HeaderName::from_static),
    )
}
