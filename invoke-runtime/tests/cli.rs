use std::process::Command;

#[test]
fn missing_runtime_arn_prints_usage_and_exits_1() {
    let output = Command::new(env!("CARGO_BIN_EXE_invoke-runtime"))
        .output()
        .expect("failed to run invoke-runtime");

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage: invoke-runtime <runtime_arn> [prompt]"),
        "unexpected stderr: {stderr}"
    );
}
