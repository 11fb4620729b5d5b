use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Substituted when the invocation payload has no `prompt` field.
pub const DEFAULT_PROMPT: &str = "Hello!";

/// The AgentCore data plane passes the session id to the container in this header.
pub const SESSION_ID_HEADER: &str = "x-amzn-bedrock-agentcore-runtime-session-id";

/// Reported when the hosting runtime did not supply a session id.
pub const UNKNOWN_SESSION_ID: &str = "unknown";

/// An invocation payload as posted by the AgentCore data plane.
/// Only `prompt` is meaningful to the agent; any other fields travel through untouched.
#[derive(Deserialize, Debug, Default)]
pub struct InvocationRequest {
    pub prompt: Option<String>,
    /// Fields the agent does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome tag of an invocation.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum InvocationStatus {
    Success,
    Failure,
}

impl InvocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// What the handler returns to the data plane for every invocation, success or failure.
/// Failures carry the error text in `response` so the caller always gets the same shape.
#[derive(Serialize, Deserialize, Debug)]
pub struct InvocationResult {
    pub status: InvocationStatus,
    pub prompt: String,
    pub response: String,
    pub session_id: String,
}

impl InvocationResult {
    pub fn success(prompt: String, response: String, session_id: &str) -> Self {
        Self {
            status: InvocationStatus::Success,
            prompt,
            response,
            session_id: session_id.to_owned(),
        }
    }

    pub fn failure(prompt: String, error: String, session_id: &str) -> Self {
        Self {
            status: InvocationStatus::Failure,
            prompt,
            response: error,
            session_id: session_id.to_owned(),
        }
    }
}
