//! Integration tests for the restodash binary.

use assert_cmd::Command;
use indoc::indoc;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LISTINGS: &str = indoc! {"
    name,online_order,book_table,rate,votes,approx_cost(for two people),listed_in(type)
    Jalsa,Yes,Yes,4.1/5,775,800,Buffet
    Spice Elephant,Yes,No,4.1/5,787,800,Buffet
    San Churro Cafe,Yes,No,3.8/5,918,800,Cafe
    Addhuri Udupi Bhojana,No,No,3.7/5,88,300,Dining
    Rosewood,Yes,No,NEW,0,600,Dining
"};

fn restodash(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_restodash"));
    cmd.current_dir(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("listings.csv"), LISTINGS).unwrap();
    dir
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().clone();
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_summary_json_with_filters() {
    let dir = fixture();
    let stdout = stdout_of(restodash(dir.path()).args([
        "summary",
        "listings.csv",
        "--type",
        "Buffet",
        "--format",
        "json",
    ]));

    let json: Value = serde_json::from_str(&stdout).expect("Output is not valid JSON");
    assert_eq!(json["kpis"]["total_restaurants"], 2);
    assert_eq!(json["most_voted"]["records"][0]["name"], "Spice Elephant");
    assert_eq!(json["feature_combination"]["both"], 1);
    assert_eq!(json["filter"]["service_types"][0], "Buffet");
}

#[test]
fn test_summary_terminal_plain() {
    let dir = fixture();
    let stdout = stdout_of(restodash(dir.path()).args(["summary", "listings.csv", "--plain"]));

    assert!(stdout.contains("Restaurant Dashboard"));
    assert!(stdout.contains("Total restaurants"));
    assert!(stdout.contains("San Churro Cafe"));
    assert!(!stdout.contains('\u{1b}'));
}

#[test]
fn test_summary_markdown_to_file() {
    let dir = fixture();
    restodash(dir.path())
        .args([
            "summary",
            "listings.csv",
            "--online-order",
            "no",
            "--format",
            "markdown",
            "--output",
            "report/summary.md",
        ])
        .assert()
        .success();

    let report = fs::read_to_string(dir.path().join("report/summary.md")).unwrap();
    assert!(report.starts_with("# Restaurant Dashboard"));
    assert!(report.contains("Filters: online order: No"));
    assert!(report.contains("| Total restaurants | 1 |"));
}

#[test]
fn test_export_filtered_csv() {
    let dir = fixture();
    let stdout = stdout_of(restodash(dir.path()).args([
        "export",
        "listings.csv",
        "--min-rating",
        "4",
    ]));

    assert_eq!(
        stdout,
        indoc! {"
            name,rate,votes,cost_for_two,restaurant_type,online_order,book_table
            Jalsa,4.1,775,800,Buffet,Yes,Yes
            Spice Elephant,4.1,787,800,Buffet,Yes,No
        "}
    );
}

#[test]
fn test_lenient_flag_keeps_unrated_rows() {
    let dir = fixture();
    let stdout = stdout_of(restodash(dir.path()).args(["export", "listings.csv", "--lenient"]));
    assert!(stdout.contains("Rosewood,,0,600,Dining,Yes,No"));
}

#[test]
fn test_quality_json_reports_drops() {
    let dir = fixture();
    let stdout = stdout_of(restodash(dir.path()).args([
        "quality",
        "listings.csv",
        "--format",
        "json",
    ]));

    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["rows_read"], 5);
    assert_eq!(json["rows_dropped"], 1);
    assert_eq!(json["policy"], "strict");
}

#[test]
fn test_config_default_format_and_policy() {
    let dir = fixture();
    fs::write(
        dir.path().join(".restodash.toml"),
        indoc! {r#"
            [normalize]
            policy = "lenient"

            [output]
            default_format = "json"
        "#},
    )
    .unwrap();

    let stdout = stdout_of(restodash(dir.path()).args(["quality", "listings.csv"]));
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["policy"], "lenient");
    assert_eq!(json["rows_kept"], 5);
}

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    let output = restodash(dir.path())
        .args(["summary", "nope.csv"])
        .assert()
        .failure()
        .get_output()
        .clone();

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("nope.csv"));
}

#[test]
fn test_bad_flag_value_fails() {
    let dir = fixture();
    restodash(dir.path())
        .args(["summary", "listings.csv", "--book-table", "perhaps"])
        .assert()
        .failure();
}

#[test]
fn test_nan_rating_bound_fails() {
    let dir = fixture();
    let output = restodash(dir.path())
        .args(["summary", "listings.csv", "--min-rating", "NaN"])
        .assert()
        .failure()
        .get_output()
        .clone();

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--min-rating must be a finite number"));
}

#[test]
fn test_init_creates_config_once() {
    let dir = TempDir::new().unwrap();
    restodash(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".restodash.toml").exists());

    restodash(dir.path()).arg("init").assert().failure();
    restodash(dir.path()).args(["init", "--force"]).assert().success();
}
