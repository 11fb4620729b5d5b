use crate::config::Config;
use agent_app_types::{InvocationRequest, InvocationResult, DEFAULT_PROMPT};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use aws_sdk_bedrockruntime::Client as BedrockClient;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub(crate) enum AgentError {
    #[error("model request could not be built: {0}")]
    Request(String),
    #[error("model call failed: {0}")]
    Model(String),
    #[error("model returned no text content")]
    EmptyResponse,
}

/// One capability: produce a response for a prompt.
/// The concrete backend is swappable, which is also what the tests rely on.
#[async_trait]
pub(crate) trait Model: Send + Sync {
    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String, AgentError>;
}

/// Bedrock Converse backend.
pub(crate) struct BedrockModel {
    client: BedrockClient,
    model_id: String,
}

#[async_trait]
impl Model for BedrockModel {
    async fn generate(&self, system_prompt: &str, prompt: &str) -> Result<String, AgentError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt.to_owned()))
            .build()
            .map_err(|e| AgentError::Request(e.to_string()))?;

        let output = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system_prompt.to_owned()))
            .messages(message)
            .send()
            .await
            .map_err(|e| AgentError::Model(DisplayErrorContext(&e).to_string()))?;

        // a converse response carries a list of content blocks, only the text ones matter here
        let text = output
            .output()
            .and_then(|o| o.as_message().ok())
            .map(|m| {
                m.content()
                    .iter()
                    .filter_map(|block| block.as_text().ok())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AgentError::EmptyResponse);
        }

        Ok(text)
    }
}

/// A minimal agent: a name, a system prompt and a model to run prompts through.
pub(crate) struct Agent {
    name: String,
    system_prompt: String,
    model: Box<dyn Model>,
}

impl Agent {
    pub(crate) fn new(name: &str, system_prompt: &str, model: Box<dyn Model>) -> Self {
        Self {
            name: name.to_owned(),
            system_prompt: system_prompt.to_owned(),
            model,
        }
    }

    /// Builds the agent with the Bedrock backend using the ambient AWS credentials.
    pub(crate) async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::load_from_env().await;
        let model = BedrockModel {
            client: BedrockClient::new(&sdk_config),
            model_id: config.model_id.clone(),
        };

        Self::new("SimpleAgent", &config.system_prompt, Box::new(model))
    }

    /// Runs the agent for one invocation and always produces a result:
    /// a model failure becomes a `failure`-tagged result rather than an escaped error,
    /// so the hosting runtime sees a stable response shape.
    pub(crate) async fn handle(
        &self,
        request: InvocationRequest,
        session_id: &str,
    ) -> InvocationResult {
        let prompt = request.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_owned());

        info!("Agent {} prompt: {}", self.name, prompt);

        match self.model.generate(&self.system_prompt, &prompt).await {
            Ok(response) => InvocationResult::success(prompt, response, session_id),
            Err(e) => {
                error!("Agent call failed: {e}");
                InvocationResult::failure(prompt, e.to_string(), session_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_app_types::{InvocationStatus, UNKNOWN_SESSION_ID};
    use serde_json::json;

    struct EchoModel;

    #[async_trait]
    impl Model for EchoModel {
        async fn generate(&self, _system_prompt: &str, prompt: &str) -> Result<String, AgentError> {
            Ok(format!("echo: {prompt}"))
        }
    }

    struct FailingModel;

    #[async_trait]
    impl Model for FailingModel {
        async fn generate(&self, _system_prompt: &str, _prompt: &str) -> Result<String, AgentError> {
            Err(AgentError::Model("throttled".to_owned()))
        }
    }

    fn echo_agent() -> Agent {
        Agent::new("SimpleAgent", "be helpful", Box::new(EchoModel))
    }

    #[tokio::test]
    async fn echoes_prompt_and_session_id() {
        let request: InvocationRequest = serde_json::from_value(json!({"prompt": "2+2?"})).unwrap();
        let result = echo_agent().handle(request, UNKNOWN_SESSION_ID).await;

        assert_eq!(result.status, InvocationStatus::Success);
        assert_eq!(result.prompt, "2+2?");
        assert_eq!(result.response, "echo: 2+2?");
        assert_eq!(result.session_id, "unknown");
    }

    #[tokio::test]
    async fn missing_prompt_uses_default() {
        let result = echo_agent().handle(InvocationRequest::default(), "s-42").await;

        assert_eq!(result.status, InvocationStatus::Success);
        assert_eq!(result.prompt, DEFAULT_PROMPT);
        assert_eq!(result.session_id, "s-42");
    }

    #[tokio::test]
    async fn model_failure_becomes_failure_result() {
        let agent = Agent::new("SimpleAgent", "be helpful", Box::new(FailingModel));
        let request: InvocationRequest = serde_json::from_value(json!({"prompt": "hi"})).unwrap();
        let result = agent.handle(request, "s-1").await;

        assert_eq!(result.status, InvocationStatus::Failure);
        assert_eq!(result.prompt, "hi");
        assert!(result.response.contains("throttled"));
    }
}
