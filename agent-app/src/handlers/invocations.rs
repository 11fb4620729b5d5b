use super::full;
use crate::AGENT;
use agent_app_types::{InvocationRequest, InvocationResult, SESSION_ID_HEADER, UNKNOWN_SESSION_ID};
use http_body_util::{combinators::BoxBody, BodyExt};
use hyper::body::Bytes;
use hyper::{Error, Request, Response, StatusCode};
use tracing::{info, warn};

/// Handles one invocation posted by the AgentCore data plane.
/// Always responds with an [`InvocationResult`] body: agent failures come back
/// `failure`-tagged with HTTP 200, only an unreadable payload gets a 400.
pub(crate) async fn handler(req: Request<hyper::body::Incoming>) -> Response<BoxBody<Bytes, Error>> {
    let session_id = req
        .headers()
        .get(SESSION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(UNKNOWN_SESSION_ID)
        .to_owned();

    let body = match req.into_body().collect().await {
        Ok(v) => v.to_bytes(),
        Err(e) => panic!("Failed to read invocation body: {:?}", e),
    };

    info!("Session ID: {session_id}");
    info!("Received payload: {}", String::from_utf8_lossy(&body));

    let request = match parse_request(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!("Malformed invocation payload: {e}");
            let result = InvocationResult::failure(
                String::new(),
                format!("malformed request payload: {e}"),
                &session_id,
            );
            return json_response(StatusCode::BAD_REQUEST, &result);
        }
    };

    let result = AGENT.get().await.handle(request, &session_id).await;
    json_response(StatusCode::OK, &result)
}

/// An empty body is a valid invocation and gets the default prompt downstream.
fn parse_request(body: &[u8]) -> Result<InvocationRequest, serde_json::Error> {
    if body.is_empty() {
        return Ok(InvocationRequest::default());
    }
    serde_json::from_slice(body)
}

fn json_response(status: StatusCode, result: &InvocationResult) -> Response<BoxBody<Bytes, Error>> {
    let body =
        serde_json::to_string(result).expect("InvocationResult always serializes. It's a bug.");

    Response::builder()
        .status(status)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(full(body))
        .expect("Failed to create a response")
}
