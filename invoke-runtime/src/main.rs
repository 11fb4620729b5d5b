use anyhow::Context;
use aws_sdk_bedrockagentcore::error::DisplayErrorContext;
use aws_sdk_bedrockagentcore::primitives::Blob;
use aws_sdk_bedrockagentcore::Client;
use aws_types::region::Region;
use serde_json::{json, Value};
use std::env::{args, var};
use tracing::debug;
use tracing_subscriber::filter::EnvFilter;

mod sse;

const DEFAULT_PROMPT: &str = "Hello! Tell me a short joke about Rust programming.";
const DEFAULT_REGION: &str = "us-west-2";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .without_time()
        .compact()
        .init();

    // positional args: <runtime_arn> [prompt]
    let mut cli_args = args().skip(1);
    let runtime_arn = match cli_args.next() {
        Some(v) => v,
        None => {
            eprintln!("Usage: invoke-runtime <runtime_arn> [prompt]");
            eprintln!();
            eprintln!(
                "Example: invoke-runtime arn:aws:bedrock-agentcore:us-west-2:123456789012:runtime/example_agent-mP4koo2ihJ 'What is 2+2?'"
            );
            std::process::exit(1);
        }
    };
    let prompt = cli_args.next().unwrap_or_else(|| DEFAULT_PROMPT.to_owned());

    if let Err(e) = invoke_runtime(&runtime_arn, &prompt).await {
        eprintln!("Error invoking runtime: {e:?}");
        std::process::exit(1);
    }
}

/// Sends the prompt to the runtime and prints the response as it arrives:
/// an event stream chunk by chunk, a plain JSON body in one piece.
async fn invoke_runtime(runtime_arn: &str, prompt: &str) -> anyhow::Result<()> {
    let region = var("AWS_REGION").unwrap_or_else(|_e| DEFAULT_REGION.to_owned());
    let config = aws_config::from_env().region(Region::new(region)).load().await;
    let client = Client::new(&config);

    let payload = json!({ "prompt": prompt });

    println!("Invoking runtime: {runtime_arn}");
    println!("Payload: {}", serde_json::to_string_pretty(&payload)?);
    println!("{}", "-".repeat(60));

    let output = client
        .invoke_agent_runtime()
        .agent_runtime_arn(runtime_arn)
        .qualifier("DEFAULT")
        .content_type("application/json")
        .payload(Blob::new(serde_json::to_vec(&payload)?))
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("{}", DisplayErrorContext(&e)))?;

    let content_type = output.content_type.clone();
    let mut body = output.response;
    debug!("Response content type: {content_type}");

    println!("Response:");

    if content_type.starts_with("text/event-stream") {
        // print each chunk the moment it completes instead of buffering the stream
        let mut buffer = sse::EventBuffer::default();
        while let Some(bytes) = body
            .try_next()
            .await
            .context("failed to read the response stream")?
        {
            for event in buffer.push(&String::from_utf8_lossy(&bytes)) {
                print_chunk(&event);
            }
        }
        if let Some(event) = buffer.flush() {
            print_chunk(&event);
        }
    } else {
        let bytes = body
            .collect()
            .await
            .context("failed to read the response body")?
            .into_bytes();
        let value: Value =
            serde_json::from_slice(&bytes).context("response body is not valid JSON")?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    }

    Ok(())
}

/// A chunk carries a JSON document; anything else is printed verbatim.
fn print_chunk(data: &str) {
    match serde_json::from_str::<Value>(data) {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(pretty) => println!("{pretty}"),
            Err(_) => println!("{data}"),
        },
        Err(_) => println!("{data}"),
    }
}
