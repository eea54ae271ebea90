//! End-to-end runs of the `nlpb` command logic.

mod support;

use nlp_bridge::cli::{CliError, NlpbArgs, run};
use rstest::rstest;
use std::fs;
use support::install_models;

fn args() -> NlpbArgs {
    NlpbArgs {
        model: None,
        language: Some("en".into()),
        case_sensitive: false,
        batch_size: None,
        models_dir: None,
        input: None,
        config_path: None,
    }
}

fn lines(out: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(out)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap_or_else(|e| panic!("bad json {line}: {e}")))
        .collect()
}

#[rstest]
#[case(None, "en_core_web_md", "fallback")]
#[case(Some("my_model"), "my_model", "explicit")]
fn prints_resolution(
    #[case] model: Option<&str>,
    #[case] expected: &str,
    #[case] origin: &str,
) {
    let mut args = args();
    args.model = model.map(str::to_owned);
    let mut out = Vec::new();
    run(&args, &mut out).unwrap_or_else(|e| panic!("run failed: {e}"));
    let output = lines(&out);
    assert_eq!(output.len(), 1);
    assert_eq!(output[0]["model"], expected);
    assert_eq!(output[0]["origin"], origin);
    assert_eq!(output[0]["cache_key"], format!("NlpBridge-{expected}"));
}

#[test]
fn annotates_jsonl_messages() {
    let models = install_models(&[("en_core_web_md", "en")]);
    let input = models.path().join("train.jsonl");
    fs::write(
        &input,
        "{\"text\": \"Hello there\", \"intent\": \"greet\"}\n\n{\"response\": \"Bye\", \"score\": 3}\n",
    )
    .unwrap_or_else(|e| panic!("write input: {e}"));

    let mut args = args();
    args.models_dir = Some(models.path().to_path_buf());
    args.input = Some(input);
    let mut out = Vec::new();
    run(&args, &mut out).unwrap_or_else(|e| panic!("run failed: {e}"));

    let output = lines(&out);
    assert_eq!(output.len(), 3);
    assert_eq!(output[1]["tokens"]["text_nlp_doc"], 2);
    assert_eq!(output[1]["data"]["intent"], "greet");
    assert!(output[1]["tokens"].get("response_nlp_doc").is_none());
    assert_eq!(output[2]["tokens"]["response_nlp_doc"], 1);
    assert!(output[2]["data"].get("score").is_none());
}

#[test]
fn reports_malformed_input_line() {
    let models = install_models(&[("en_core_web_md", "en")]);
    let input = models.path().join("bad.jsonl");
    fs::write(&input, "{\"text\": \"ok\"}\nnot json\n").unwrap_or_else(|e| panic!("write: {e}"));

    let mut args = args();
    args.models_dir = Some(models.path().to_path_buf());
    args.input = Some(input);
    let result = run(&args, &mut Vec::new());
    assert!(matches!(result, Err(CliError::Message { line: 2, .. })));
}

#[test]
fn rejects_zero_batch_size() {
    let mut args = args();
    args.batch_size = Some(0);
    assert!(matches!(run(&args, &mut Vec::new()), Err(CliError::Config(_))));
}
