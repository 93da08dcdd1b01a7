//! Integration tests comparing CLI output with the core Display
//! implementations
//!
//! The CLI renders through the same `Display` impls the library exposes, so
//! in plain mode its stdout must match them byte for byte.

use std::{path::Path, process::Command};

use tasked_core::{NextStep, PlanName, Planner, PlannerBuilder};
use tempfile::TempDir;

/// Helper function to create a test planner with temporary database
async fn create_test_planner() -> (Planner, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let planner = PlannerBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create planner");

    (planner, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &Path, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_tasked"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

fn seed(db_path: &Path) {
    run_cli_command(db_path, &["plan", "new", "release"]);
    run_cli_command(
        db_path,
        &[
            "plan",
            "add-step",
            "--references",
            "docs/build.md",
            "release",
            "build",
            "Build the binaries",
            "binaries exist",
        ],
    );
    run_cli_command(db_path, &["plan", "add-step", "release", "ship", "Ship it"]);
    run_cli_command(db_path, &["plan", "new", "empty"]);
}

#[tokio::test]
async fn test_inspect_consistency() {
    let (planner, temp_dir) = create_test_planner().await;
    let db_path = temp_dir.path().join("test.db");
    seed(&db_path);

    let cli_output = run_cli_command(&db_path, &["plan", "inspect", "release"]);
    let plan = planner
        .inspect_plan(&PlanName::new("release"))
        .await
        .expect("Failed to inspect plan");

    assert_eq!(cli_output, plan.to_string());
    assert_eq!(cli_output, plan.inspect());
}

#[tokio::test]
async fn test_list_consistency() {
    let (planner, temp_dir) = create_test_planner().await;
    let db_path = temp_dir.path().join("test.db");

    let empty = run_cli_command(&db_path, &["plan", "list"]);
    let summaries = planner.list_plans_summary().await.unwrap();
    assert_eq!(empty, summaries.to_string());

    seed(&db_path);

    let cli_output = run_cli_command(&db_path, &["plan", "list"]);
    let summaries = planner.list_plans_summary().await.unwrap();
    assert_eq!(cli_output, summaries.to_string());
    assert_eq!(
        cli_output,
        "empty [TODO] (no tasks)\nrelease [TODO] (0/2 tasks completed)\n"
    );
}

#[tokio::test]
async fn test_next_step_consistency() {
    let (planner, temp_dir) = create_test_planner().await;
    let db_path = temp_dir.path().join("test.db");
    seed(&db_path);

    let cli_output = run_cli_command(&db_path, &["plan", "next-step", "release"]);
    let name = PlanName::new("release");
    let step = planner.next_step(&name).await.unwrap();
    assert_eq!(cli_output, NextStep::new("release", step).to_string());

    let cli_output = run_cli_command(&db_path, &["plan", "next-step", "empty"]);
    assert_eq!(cli_output, "Plan 'empty' is completed - all steps are done!\n");
}
