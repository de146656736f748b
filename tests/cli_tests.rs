// ABOUTME: Integration tests for the CLI application
// ABOUTME: Drives the built binary through run, list, validate, render, resolve and init

use serde_json::json;
use std::path::Path;
use std::process::{Command, Output};

mod common;
use common::TestEnvironment;

fn elementals(env: &TestEnvironment, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_elementals"))
        .args(args)
        .current_dir(env.path())
        .env_remove("ELEMENTALS_FUNCTIONS_FILE")
        .env_remove("ELEMENTALS_ON_MISSING")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_cli_help_command() {
    let env = TestEnvironment::new();
    let output = elementals(&env, &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("elementals"));
    assert!(stdout.contains("render"));
}

#[test]
fn test_cli_version_command() {
    let env = TestEnvironment::new();
    let output = elementals(&env, &["--version"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_run_discovers_configuration() {
    let env = TestEnvironment::new();
    env.functions_file();

    let output = elementals(&env, &["run", "Multiply", "-P", "a=3", "-P", "b=4"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!({"status": "success", "data": {"a": 3, "b": 4, "product": 12}, "meta": null})
    );
}

#[test]
fn test_cli_run_error_result_exits_non_zero() {
    let env = TestEnvironment::new();
    let functions = env.functions_file();

    let output = elementals(
        &env,
        &["--functions", path_str(&functions), "run", "Multiply", "--params", r#"{"a": 3}"#],
    );

    assert!(!output.status.success());
    let result = stdout_json(&output);
    assert_eq!(result["status"], "error");
    assert_eq!(result["error"]["code"], "missing_param");
}

#[test]
fn test_cli_run_with_bundle_and_output_file() {
    let env = TestEnvironment::new();
    env.functions_file();
    let bundle = env.bundle_file(
        "bundle",
        &json!({
            "params": {"msg": "hi"},
            "savepoint": {"step": 3},
            "meta": {"call_id": "c-42", "timestamp": "2024-05-01T10:00:00Z"},
        }),
    );
    let output_file = env.output_file("echo");

    let output = elementals(
        &env,
        &[
            "run",
            "Echo",
            "--bundle",
            path_str(&bundle),
            "--output",
            path_str(&output_file),
        ],
    );

    assert!(output.status.success());
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output_file).unwrap()).unwrap();
    assert_eq!(written["data"], json!({"echo": {"msg": "hi"}, "savepoint": {"step": 3}}));
    assert_eq!(written["meta"]["call_id"], "c-42");
    assert_eq!(written["meta"]["timestamp"], "2024-05-01T10:00:00.000000Z");
}

#[test]
fn test_cli_run_unknown_function() {
    let env = TestEnvironment::new();
    env.functions_file();

    let output = elementals(&env, &["run", "Divide"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Function 'Divide' not found in configuration"));
}

#[test]
fn test_cli_list_and_validate() {
    let env = TestEnvironment::new();
    env.functions_file();

    let list = elementals(&env, &["list"]);
    assert!(list.status.success());
    let stdout = String::from_utf8_lossy(&list.stdout);
    assert!(stdout.contains("Multiply [MultiplyFunction]"));
    assert!(stdout.contains("Legacy [EchoFunction] (disabled)"));
    assert!(stdout.contains("role: business_rule_validation"));

    let validate = elementals(&env, &["validate"]);
    assert!(validate.status.success());
    assert!(String::from_utf8_lossy(&validate.stdout).contains("is valid"));
}

#[test]
fn test_cli_validate_rejects_unknown_class() {
    let env = TestEnvironment::new();
    let functions = env.write_file("configFunctions.yaml", "Divide:\n  class: DivideFunction\n");

    let output = elementals(&env, &["--functions", path_str(&functions), "validate"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("DivideFunction"));
}

#[test]
fn test_cli_render_policies() {
    let env = TestEnvironment::new();
    let bundle = env.bundle_file("bundle", &json!({"params": {"items": [{"val": 10}]}}));
    let template = env.write_file(
        "template.yaml",
        "first: $params.items[0].val\nmissing: $params.nope\n",
    );

    let keep = elementals(
        &env,
        &["render", path_str(&template), "--bundle", path_str(&bundle), "--on-missing", "keep"],
    );
    assert!(keep.status.success());
    assert_eq!(
        stdout_json(&keep),
        json!({"first": 10, "missing": "$params.nope"})
    );

    let none = elementals(&env, &["render", path_str(&template), "--bundle", path_str(&bundle)]);
    assert_eq!(stdout_json(&none), json!({"first": 10, "missing": null}));

    let error = elementals(
        &env,
        &["render", path_str(&template), "--bundle", path_str(&bundle), "--on-missing", "error"],
    );
    assert!(!error.status.success());
    assert!(String::from_utf8_lossy(&error.stderr).contains("$params.nope"));
}

#[test]
fn test_cli_resolve() {
    let env = TestEnvironment::new();
    let bundle = env.bundle_file("bundle", &json!({"params": {"map": {"name": "by-key"}}}));

    let found = elementals(&env, &["resolve", "$params.map[name]", "--bundle", path_str(&bundle)]);
    assert!(found.status.success());
    assert_eq!(stdout_json(&found), json!("by-key"));

    let fallback = elementals(
        &env,
        &["resolve", "$params.map[0]", "--bundle", path_str(&bundle), "--default", "0"],
    );
    assert_eq!(stdout_json(&fallback), json!(0));

    let strict = elementals(&env, &["resolve", "params.map", "--bundle", path_str(&bundle)]);
    assert!(!strict.status.success());
}

#[test]
fn test_cli_init_scaffolds_entry() {
    let env = TestEnvironment::new();
    let functions = env.functions_file();

    let output = elementals(&env, &["init", "sum_two", "--description", "Sum two numbers"]);
    assert!(output.status.success());

    let content = std::fs::read_to_string(&functions).unwrap();
    assert!(content.contains("SumTwo:"));
    assert!(content.contains("class: PlaceholderFunction"));

    let again = elementals(&env, &["init", "sum_two", "--description", "Again"]);
    assert!(!again.status.success());

    let forced = elementals(&env, &["init", "sum_two", "--description", "Again", "--force"]);
    assert!(forced.status.success());

    let run = elementals(&env, &["run", "SumTwo"]);
    assert!(!run.status.success());
    assert_eq!(stdout_json(&run)["error"]["code"], "not_implemented");
}
