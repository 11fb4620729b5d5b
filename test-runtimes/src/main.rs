use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

mod agentcore;
mod runner;

#[derive(Debug, Parser)]
#[command(name = "test-runtimes")]
#[command(about = "Test AWS Bedrock AgentCore runtimes")]
struct Cli {
    /// ARN of the runtime to test (can be specified multiple times)
    #[arg(long = "runtime-arn", required = true)]
    runtime_arn: Vec<String>,

    /// Prompt to send to each runtime
    #[arg(long, default_value = "Hello, what can you help me with?")]
    prompt: String,

    /// AWS region
    #[arg(long, env = "AWS_REGION", default_value = "us-west-2")]
    region: String,

    /// AWS profile name (falls back to the default profile)
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .without_time()
        .compact()
        .init();

    let cli = Cli::parse();

    println!();
    println!("{}", "=".repeat(70));
    println!("AWS Bedrock AgentCore Runtime Testing");
    println!("{}", "=".repeat(70));
    println!("Region: {}", cli.region);
    println!("Profile: {}", cli.profile.as_deref().unwrap_or("default"));
    println!("Runtimes to test: {}", cli.runtime_arn.len());
    println!("{}", "=".repeat(70));

    let caller = agentcore::AgentCoreCaller {
        region: cli.region,
        profile: cli.profile,
    };

    let report =
        runner::run_tests(&caller, &cli.runtime_arn, &cli.prompt, &mut std::io::stdout()).await?;

    println!("{}", "=".repeat(70));
    println!(
        "Testing complete: {} attempted, {} succeeded, {} failed",
        report.attempted, report.succeeded, report.failed
    );
    println!("{}", "=".repeat(70));

    // per-target failures are reported above; the run itself counts as complete
    Ok(())
}
