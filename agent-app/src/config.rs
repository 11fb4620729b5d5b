use core::net::SocketAddrV4;
use std::env::var;

/// The AgentCore container contract expects the app on 0.0.0.0:8080.
const DEFAULT_LISTENER: &str = "0.0.0.0:8080";
const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-3-5-sonnet-20241022-v2:0";
const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Provide clear and concise responses.";

pub(crate) struct Config {
    /// E.g. 0.0.0.0:8080
    pub listener: SocketAddrV4,
    /// Bedrock model id the agent answers with
    pub model_id: String,
    /// System prompt baked into every conversation
    pub system_prompt: String,
}

impl Config {
    /// Creates a new Config instance from environment variables and defaults.
    /// Panics if a set variable cannot be parsed.
    pub fn from_env() -> Self {
        let listener_str = var("AGENT_APP_LISTENER").unwrap_or_else(|_e| DEFAULT_LISTENER.to_string());
        let listener = listener_str.parse::<SocketAddrV4>().expect(
            "Invalid address in AGENT_APP_LISTENER env var. Must be ip:port, e.g. 0.0.0.0:8080",
        );

        let model_id = var("AGENT_MODEL_ID").unwrap_or_else(|_e| DEFAULT_MODEL_ID.to_string());
        let system_prompt =
            var("AGENT_SYSTEM_PROMPT").unwrap_or_else(|_e| DEFAULT_SYSTEM_PROMPT.to_string());

        Self {
            listener,
            model_id,
            system_prompt,
        }
    }
}
