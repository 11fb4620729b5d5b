use agent_app_types::InvocationResult;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::io::Write;

/// Seam between the test loop and the AgentCore data plane so tests can
/// substitute a mock for the AWS client.
#[async_trait]
pub(crate) trait RuntimeCaller {
    async fn invoke(&self, runtime_arn: &str, session_id: &str, prompt: &str) -> Result<Value>;
}

/// Per-run tally printed in the summary.
#[derive(Default, Debug, PartialEq, Eq)]
pub(crate) struct TestReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Session ids are unique per run and traceable back to the target:
/// `test-session-<UTC timestamp>-<display name>`.
pub(crate) fn session_id(runtime_name: &str) -> String {
    format!(
        "test-session-{}-{}",
        Utc::now().format("%Y%m%d%H%M%S"),
        runtime_name
    )
}

/// Runs every target in argument order. A failed target is reported in place
/// and does not stop the rest of the run.
pub(crate) async fn run_tests<W: Write>(
    caller: &dyn RuntimeCaller,
    runtime_arns: &[String],
    prompt: &str,
    out: &mut W,
) -> Result<TestReport> {
    let mut report = TestReport::default();

    for (idx, runtime_arn) in runtime_arns.iter().enumerate() {
        let runtime_name = format!("Runtime-{}", idx + 1);

        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(70))?;
        writeln!(out, "Testing: {runtime_name}")?;
        writeln!(out, "ARN: {runtime_arn}")?;
        writeln!(out, "Prompt: {prompt}")?;
        writeln!(out, "{}", "=".repeat(70))?;

        let session_id = session_id(&runtime_name);
        writeln!(out, "Session ID: {session_id}")?;
        writeln!(out, "Invoking runtime...")?;

        report.attempted += 1;
        match caller.invoke(runtime_arn, &session_id, prompt).await {
            Ok(response) => {
                report.succeeded += 1;
                writeln!(out, "SUCCESS")?;
                writeln!(out)?;
                // runtimes built on our agent-app answer with the InvocationResult shape;
                // surface its own status tag when they do
                if let Ok(result) = serde_json::from_value::<InvocationResult>(response.clone()) {
                    writeln!(out, "Reported status: {}", result.status.as_str())?;
                }
                writeln!(out, "Agent Response:")?;
                writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
            }
            Err(e) => {
                report.failed += 1;
                // {:?} on an anyhow error prints the whole cause chain
                writeln!(out, "ERROR: {e:?}")?;
            }
        }
        writeln!(out)?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use regex::Regex;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn session_id_matches_expected_pattern() {
        let id = session_id("Runtime-1");
        let pattern = Regex::new(r"^test-session-\d{14}-Runtime-1$").unwrap();
        assert!(pattern.is_match(&id), "unexpected session id: {id}");
    }

    /// Fails the first call, succeeds afterwards, and records every ARN it saw.
    struct FlakyCaller {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RuntimeCaller for FlakyCaller {
        async fn invoke(&self, runtime_arn: &str, _session_id: &str, _prompt: &str) -> Result<Value> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(runtime_arn.to_owned());
            if calls.len() == 1 {
                bail!("connection reset by peer");
            }
            Ok(json!({
                "status": "success",
                "prompt": "hi",
                "response": "fine",
                "session_id": "s-1",
            }))
        }
    }

    #[tokio::test]
    async fn a_failed_target_does_not_stop_the_run() {
        let caller = FlakyCaller {
            calls: Mutex::new(Vec::new()),
        };
        let arns = vec!["arn:aws:one".to_owned(), "arn:aws:two".to_owned()];
        let mut out = Vec::new();

        let report = run_tests(&caller, &arns, "hi", &mut out).await.unwrap();

        assert_eq!(
            report,
            TestReport {
                attempted: 2,
                succeeded: 1,
                failed: 1
            }
        );
        assert_eq!(*caller.calls.lock().unwrap(), arns);

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches("ERROR:").count(), 1);
        assert_eq!(printed.matches("SUCCESS").count(), 1);
        assert!(printed.contains("connection reset by peer"));
        assert!(printed.contains("Reported status: success"));
    }

    #[tokio::test]
    async fn targets_are_named_by_position() {
        let caller = FlakyCaller {
            calls: Mutex::new(vec!["padding so every call succeeds".to_owned()]),
        };
        let arns = vec!["arn:aws:one".to_owned(), "arn:aws:two".to_owned()];
        let mut out = Vec::new();

        run_tests(&caller, &arns, "hi", &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Testing: Runtime-1"));
        assert!(printed.contains("Testing: Runtime-2"));
    }
}
