//! Integration tests for `monobuild build`
//!
//! The bundler is replaced by `true` (always succeeds) or `false` (always
//! fails) so the orchestration can be exercised without Node.js:
//! - packages build in directory order
//! - the first failure stops the run unless --keep-going is given
//! - output directories are emptied before each build
//! - --dry-run prints the assembled requests

#![cfg(unix)]

mod common;

use common::{stderr, stdout, TestProject};

fn setup_two_packages(engine: &str) -> TestProject {
    let project = TestProject::new();
    project.add_package("alerts", "@acme/alerts");
    project.add_package("buttons-v2", "@acme/buttons");
    project.use_engine(engine);
    project
}

#[test]
fn test_build_succeeds_with_each_variant() {
    let project = setup_two_packages("true");

    let output = project.run(&["build"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Building alerts (Vue 3)"));
    assert!(out.contains("Building buttons-v2 (Vue 2)"));
    assert!(out.contains("✓ Built alerts"));
    assert!(out.contains("✓ Built buttons-v2"));
    assert!(out.contains("Packages built: 2/2"));
}

#[test]
fn test_build_order_follows_directory_names() {
    let project = setup_two_packages("true");
    project.add_package("accordion", "@acme/accordion");

    let output = project.run(&["build"]);
    let out = stdout(&output);

    let first = out.find("Building accordion").unwrap();
    let second = out.find("Building alerts").unwrap();
    let third = out.find("Building buttons-v2").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_build_empties_output_directory() {
    let project = setup_two_packages("true");
    project.create_file("packages/alerts/dist/stale.umd.js", "old bundle");

    let output = project.run(&["build"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.file_exists("packages/alerts/dist"));
    assert!(!project.file_exists("packages/alerts/dist/stale.umd.js"));
}

#[test]
fn test_build_fails_fast() {
    let project = setup_two_packages("false");
    project.create_file("packages/buttons-v2/dist/index.es.js", "previous build");

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Building alerts"));
    assert!(!out.contains("Building buttons-v2"));
    assert!(stderr(&output).contains("Failed to build alerts"));
    assert!(out.contains("Not attempted: buttons-v2"));
    // Packages never attempted keep their previous artifacts
    assert!(project.file_exists("packages/buttons-v2/dist/index.es.js"));
}

#[test]
fn test_failure_reported_once() {
    let project = setup_two_packages("false");

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    assert_eq!(stderr(&output).matches("Failed to build alerts").count(), 1);
}

#[test]
fn test_keep_going_attempts_every_package() {
    let project = setup_two_packages("false");

    let output = project.run(&["build", "--keep-going"]);

    assert!(!output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Building alerts"));
    assert!(out.contains("Building buttons-v2"));
    let err = stderr(&output);
    assert!(err.contains("Failed to build alerts"));
    assert!(err.contains("Failed to build buttons-v2"));
}

#[test]
fn test_json_report() {
    let project = setup_two_packages("false");

    let output = project.run(&["--json", "build"]);

    assert!(!output.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["outcomes"].as_array().unwrap().len(), 1);
    assert_eq!(report["outcomes"][0]["identifier"], "alerts");
    assert_eq!(report["outcomes"][0]["succeeded"], false);
    assert_eq!(report["stopped_at"], "alerts");
    assert_eq!(report["skipped"], serde_json::json!(["buttons-v2"]));
}

#[test]
fn test_dry_run_prints_requests() {
    let project = setup_two_packages("false");

    let output = project.run(&["build", "--dry-run"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let planned: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let planned = planned.as_array().unwrap();
    assert_eq!(planned.len(), 2);

    assert_eq!(planned[0]["identifier"], "alerts");
    assert_eq!(planned[0]["variant"], "current");
    assert_eq!(planned[0]["request"]["library_name"], "@acme/alerts");
    assert_eq!(planned[0]["request"]["plugins"][0]["module"], "@vitejs/plugin-vue");

    assert_eq!(planned[1]["variant"], "legacy");
    assert_eq!(planned[1]["request"]["plugins"][0]["module"], "vite-plugin-vue2");
    assert_eq!(planned[1]["request"]["plugins"][0]["export"], "createVuePlugin");

    for entry in planned {
        assert_eq!(entry["request"]["external"], serde_json::json!(["vue"]));
        assert_eq!(entry["request"]["globals"]["vue"], "Vue");
        assert_eq!(entry["request"]["formats"], serde_json::json!(["es", "umd"]));
    }
}

#[test]
fn test_package_filter() {
    let project = setup_two_packages("true");

    let output = project.run(&["build", "--package", "buttons-v2"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(!out.contains("Building alerts"));
    assert!(out.contains("Building buttons-v2"));
}

#[test]
fn test_unknown_package_filter() {
    let project = setup_two_packages("true");

    let output = project.run(&["build", "--package", "missing"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("'missing' not found"));
}

#[test]
fn test_missing_metadata_aborts_before_building() {
    let project = setup_two_packages("true");
    project.create_dir("packages/zz-no-metadata");

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    assert!(!stdout(&output).contains("Building"));
    assert!(stderr(&output).contains("package.json"));
}

#[test]
fn test_node_flag_overrides_config() {
    let project = setup_two_packages("false");

    let output = project.run(&["build", "--node", "true"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_node_env_overrides_config() {
    let project = setup_two_packages("false");

    let output = project.run_with_env(&["build"], &[("MONOBUILD_NODE", "true")]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Packages built: 2/2"));
}

#[test]
fn test_node_flag_overrides_env() {
    let project = setup_two_packages("true");

    let output = project.run_with_env(
        &["build", "--node", "false"],
        &[("MONOBUILD_NODE", "true")],
    );

    assert!(!output.status.success());
}

#[test]
fn test_out_dir_outside_package_rejected() {
    let project = setup_two_packages("true");
    project.create_file(
        "monobuild.toml",
        "[engine]\nnode = \"true\"\n[package]\nout_dir = \"..\"\n",
    );

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid out_dir"));
    assert!(project.file_exists("packages/alerts/package.json"));
    assert!(project.file_exists("packages/buttons-v2/package.json"));
}

#[test]
fn test_missing_engine_binary() {
    let project = setup_two_packages("monobuild-no-such-node");

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("not found in PATH"));
}

#[test]
fn test_no_packages() {
    let project = TestProject::new();
    project.use_engine("false");

    let output = project.run(&["build"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("No packages found"));
}

#[test]
fn test_missing_packages_directory() {
    let project = TestProject::new();
    std::fs::remove_dir(project.path().join("packages")).unwrap();

    let output = project.run(&["build"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Packages directory not found"));
}

#[test]
fn test_explicit_config_and_root() {
    let project = TestProject::new();
    project.create_file("libs/grid/package.json", r#"{ "name": "grid" }"#);
    project.create_file(
        "conf/custom.toml",
        "packages_dir = \"libs\"\n[engine]\nnode = \"true\"\n",
    );
    let config = project.path().join("conf/custom.toml");
    let root = project.path();

    let output = project.run(&[
        "--root",
        root.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "build",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Building grid"));
}
