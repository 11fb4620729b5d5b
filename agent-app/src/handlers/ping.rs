use super::full;
use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper::{Error, Response};

/// Health probe the AgentCore control plane polls to decide if the container is serviceable.
pub(crate) fn handler() -> Response<BoxBody<Bytes, Error>> {
    Response::builder()
        .status(hyper::StatusCode::OK)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(full(r#"{"status":"Healthy"}"#))
        .expect("Failed to create a response")
}
