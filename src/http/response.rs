//! HTTP response building module
//!
//! Every response body is JSON. Builder failures fall back to a bare
//! response and are logged rather than propagated.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::error::ApiError;
use crate::logger;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Serialize `body` and wrap it in a response with the given status
pub fn build_json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    body: &T,
) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(json) => build_raw_json(status, Bytes::from(json)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            build_error_response(&ApiError::Internal)
        }
    }
}

/// Render an [`ApiError`] with its status and JSON envelope
pub fn build_error_response(err: &ApiError) -> Response<Full<Bytes>> {
    let status = err.status();
    match serde_json::to_vec(&err.body()) {
        Ok(json) => build_raw_json(status, Bytes::from(json)),
        Err(e) => {
            logger::log_error(&format!("Failed to serialize error body: {e}"));
            build_raw_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(
                    br#"{"error":{"status":500,"message":"Internal server error"}}"#,
                ),
            )
        }
    }
}

fn build_raw_json(status: StatusCode, body: Bytes) -> Response<Full<Bytes>> {
    let fallback = body.clone();
    Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build {status} response: {e}"));
            let mut resp = Response::new(Full::new(fallback));
            *resp.status_mut() = status;
            resp
        })
}
