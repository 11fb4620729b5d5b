use crate::runner::RuntimeCaller;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_bedrockagentcore::error::DisplayErrorContext;
use aws_sdk_bedrockagentcore::primitives::Blob;
use aws_sdk_bedrockagentcore::Client;
use aws_types::region::Region;
use serde_json::{json, Value};
use tracing::debug;

/// Calls the AgentCore data plane with a fresh session-scoped client per target.
pub(crate) struct AgentCoreCaller {
    pub region: String,
    pub profile: Option<String>,
}

#[async_trait]
impl RuntimeCaller for AgentCoreCaller {
    async fn invoke(&self, runtime_arn: &str, session_id: &str, prompt: &str) -> Result<Value> {
        let mut loader = aws_config::from_env().region(Region::new(self.region.clone()));
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;
        let client = Client::new(&config);

        let payload = serde_json::to_vec(&json!({ "prompt": prompt }))?;
        debug!("Invoking {runtime_arn} with session {session_id}");

        let output = client
            .invoke_agent_runtime()
            .agent_runtime_arn(runtime_arn)
            .runtime_session_id(session_id)
            .qualifier("DEFAULT")
            .content_type("application/json")
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

        let bytes = output
            .response
            .collect()
            .await
            .context("failed to read the response body")?
            .into_bytes();

        serde_json::from_slice(&bytes).context("response body is not valid JSON")
    }
}
