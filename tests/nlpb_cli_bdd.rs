//! Behaviour tests for the `nlpb` CLI.

use assert_cmd::Command;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::process::Output;

#[derive(Default)]
struct CliContext {
    output: RefCell<Option<Output>>,
}

#[fixture]
fn cli_context() -> CliContext {
    CliContext::default()
}

#[given("the nlpb binary")]
fn given_binary(#[from(cli_context)] ctx: &CliContext) {
    let _ = ctx;
}

#[when("running with \"{args}\"")]
#[expect(
    clippy::needless_pass_by_value,
    reason = "BDD macro injects owned value"
)]
#[expect(clippy::expect_used, reason = "tests should fail loudly")]
fn when_running(args: String, #[from(cli_context)] ctx: &CliContext) {
    let output = Command::cargo_bin("nlpb")
        .unwrap_or_else(|e| panic!("failed to locate nlpb binary: {e}"))
        .env_remove("NLPB_MODEL")
        .args(args.split_whitespace())
        .output()
        .expect("failed to run nlpb");
    *ctx.output.borrow_mut() = Some(output);
}

#[then("it exits successfully")]
#[expect(clippy::expect_used, reason = "tests should fail loudly")]
fn then_success(#[from(cli_context)] ctx: &CliContext) {
    let output = ctx.output.borrow();
    let output = output.as_ref().expect("missing output");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"cache_key\":\"NlpBridge-en_core_web_md\""));
}

#[then("it exits with an error")]
#[expect(clippy::expect_used, reason = "tests should fail loudly")]
fn then_error(#[from(cli_context)] ctx: &CliContext) {
    let status = ctx.output.borrow().as_ref().expect("missing output").status;
    assert!(!status.success());
}

#[scenario(path = "tests/features/nlpb_cli.feature", index = 0)]
fn resolve_fallback(cli_context: CliContext) {
    let _ = cli_context;
}

#[scenario(path = "tests/features/nlpb_cli.feature", index = 1)]
fn unknown_language(cli_context: CliContext) {
    let _ = cli_context;
}
