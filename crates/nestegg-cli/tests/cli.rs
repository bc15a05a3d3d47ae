//! Tests for the `nestegg` binary
//!
//! ## Exit Code Contract
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success |
//! | 1 | Invalid plan, unreadable config, or failed write |

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn nestegg(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nestegg"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute nestegg")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// generate
// =============================================================================

#[test]
fn generate_writes_default_file() {
    let dir = tempdir().unwrap();

    let output = nestegg(&["generate"], dir.path());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created: Retirement_Simulation.xlsx"));
    assert!(dir.path().join("Retirement_Simulation.xlsx").exists());
}

#[test]
fn generate_applies_overrides() {
    let dir = tempdir().unwrap();

    let output = nestegg(
        &[
            "generate",
            "-o",
            "custom.xlsx",
            "--years",
            "20",
            "--start-year",
            "2030",
            "--scenario",
            "Aggressive",
        ],
        dir.path(),
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let mut workbook: Xlsx<_> = open_workbook(dir.path().join("custom.xlsx")).unwrap();
    let assumptions = workbook.worksheet_range("Assumptions").unwrap();
    assert_eq!(assumptions.get_value((2, 1)), Some(&Data::Float(2030.0)));
    assert_eq!(
        assumptions.get_value((29, 1)),
        Some(&Data::String("Aggressive".into()))
    );

    let projection = workbook.worksheet_formula("Projection").unwrap();
    assert_eq!(projection.end(), Some((20, 13)));
}

#[test]
fn generate_rejects_unknown_scenario() {
    let dir = tempdir().unwrap();

    let output = nestegg(&["generate", "--scenario", "Reckless"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Reckless"));
    assert!(!dir.path().join("Retirement_Simulation.xlsx").exists());
}

#[test]
fn generate_reports_missing_config() {
    let dir = tempdir().unwrap();

    let output = nestegg(&["generate", "-c", "missing.toml"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to load plan"));
}

#[test]
fn generate_reports_unwritable_output() {
    let dir = tempdir().unwrap();

    let output = nestegg(&["generate", "-o", "no/such/dir/out.xlsx"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to write workbook"));
}

// =============================================================================
// preview
// =============================================================================

#[test]
fn preview_prints_table_and_summary() {
    let dir = tempdir().unwrap();

    let output = nestegg(&["preview", "--start-year", "2025"], dir.path());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Scenario: Moderate (75 years from 2025)"));
    assert!(text.contains("Not depleted"));
    assert!(text.contains("Sustainable years:             31"));
}

#[test]
fn preview_json_matches_horizon() {
    let dir = tempdir().unwrap();

    let output = nestegg(
        &["preview", "--years", "12", "--start-year", "2025", "--format", "json"],
        dir.path(),
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0]["year"], 2025);
    assert_eq!(rows[0]["price_index"], 1.0);
    assert_eq!(json["summary"]["depletion_year"], serde_json::Value::Null);
}

#[test]
fn preview_rejects_horizon_beyond_sheet_rows() {
    let dir = tempdir().unwrap();

    let output = nestegg(&["preview", "--years", "4000000000"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("sheet limit"));
}

#[test]
fn preview_reports_overflowing_age() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("plan.toml"),
        "[assumptions]\ncurrent_age = 4294967290\n",
    )
    .unwrap();

    let output = nestegg(&["preview", "-c", "plan.toml"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("overflows"));
}

// =============================================================================
// init
// =============================================================================

#[test]
fn init_creates_plan_file() {
    let dir = tempdir().unwrap();

    let output = nestegg(&["init"], dir.path());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created: nestegg.toml"));

    let content = fs::read_to_string(dir.path().join("nestegg.toml")).unwrap();
    assert!(content.contains("horizon_years = 75"));
    assert!(content.contains("selected_scenario = \"Moderate\""));
    assert!(content.contains("[[scenarios]]"));
}

#[test]
fn init_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let existing = dir.path().join("plan.toml");
    fs::write(&existing, "# existing").unwrap();

    let output = nestegg(&["init", "-o", "plan.toml"], dir.path());

    assert!(!output.status.success(), "Command should fail");
    assert!(stderr(&output).contains("already exists"));
    assert_eq!(fs::read_to_string(&existing).unwrap(), "# existing");
}

#[test]
fn init_force_overwrites() {
    let dir = tempdir().unwrap();
    let existing = dir.path().join("plan.toml");
    fs::write(&existing, "# existing").unwrap();

    let output = nestegg(&["init", "-o", "plan.toml", "--force"], dir.path());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(fs::read_to_string(&existing).unwrap().contains("[assumptions]"));
}

#[test]
fn init_then_generate_from_config() {
    let dir = tempdir().unwrap();
    assert!(nestegg(&["init"], dir.path()).status.success());

    let output = nestegg(
        &["generate", "-c", "nestegg.toml", "--start-year", "2025"],
        dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(dir.path().join("Retirement_Simulation.xlsx").exists());
}
