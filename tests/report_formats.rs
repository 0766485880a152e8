use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

fn racap_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_racap"));
    cmd.env("HOME", home);
    cmd.env_remove("RACAP_CONFIG");
    cmd.env_remove("RACAP_UI_COLOR");
    cmd.env_remove("RACAP_UI_MAX_TABLE_ROWS");
    cmd.env_remove("RACAP_DATA_DIR");
    cmd.env_remove("RACAP_DEFAULT_LOCATION");
    cmd.env_remove("RACAP_SESSION_USER");
    cmd.env_remove("RACAP_REPORT_INCLUDE_METADATA");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    racap_cmd(home).args(args).output().expect("run racap")
}

fn make_temp_home() -> PathBuf {
    static HOME_SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = HOME_SEQ.fetch_add(1, Ordering::Relaxed);
    let home = std::env::temp_dir().join(format!("racap-report-test-{}-{seq}", std::process::id()));
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(&home).expect("create home");
    home
}

#[test]
fn compliance_html_is_printable() {
    let home = make_temp_home();
    let out = run(&home, &["report", "compliance", "--format", "html"]);
    assert!(out.status.success());
    let html = String::from_utf8_lossy(&out.stdout);
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("window.print()"));
    assert!(html.contains("Compliance Summary Report"));
    assert!(html.contains("Generated by RACAP"));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn compliance_csv_has_crlf_rows_and_severity_block() {
    let home = make_temp_home();
    let output = home.join("report.csv");
    let out = run(
        &home,
        &[
            "report",
            "compliance",
            "--format",
            "csv",
            "--output",
            output.to_str().expect("utf8 path"),
        ],
    );
    assert!(out.status.success());
    let csv = std::fs::read_to_string(&output).expect("read csv");
    assert!(csv.contains("Report,Compliance Summary Report\r\n"));
    assert!(csv.contains("Severity,Passed,Failed,Compliance %\r\n"));
    assert!(csv.contains("Category,Total,Passed,Failed\r\n"));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn compliance_json_parses_with_headline_metrics() {
    let home = make_temp_home();
    let out = run(&home, &["report", "compliance", "--format", "json"]);
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(v["summaryMetrics"]["systemCompliance"], 74.0);
    assert_eq!(v["summaryMetrics"]["totalEndpoints"], 245);
    assert_eq!(v["summaryMetrics"]["totalControls"], 856);
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn host_report_text_names_the_host() {
    let home = make_temp_home();
    let out = run(&home, &["report", "host", "2", "--format", "text"]);
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.starts_with("Host Compliance Report\n"));
    assert!(text.contains("Evaluated Rules"));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn trend_report_spans_the_requested_days() {
    let home = make_temp_home();
    let out = run(
        &home,
        &["report", "trend", "--days", "7", "--format", "json"],
    );
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    let rows = v["sections"][0]["content"]["rows"]
        .as_array()
        .expect("rows");
    assert_eq!(rows.len(), 7);
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn viewer_cannot_generate_reports() {
    let home = make_temp_home();
    let out = run(&home, &["--user", "4", "report", "compliance"]);
    assert_eq!(out.status.code(), Some(10));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn auditor_can_generate_reports_and_it_is_logged() {
    let home = make_temp_home();
    let out = run(&home, &["--user", "3", "report", "compliance", "--format", "json"]);
    assert!(out.status.success());

    let out = run(&home, &["--user", "3", "audit", "show", "--json"]);
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    let actions: Vec<&str> = entries
        .as_array()
        .expect("array")
        .iter()
        .map(|e| e["action"].as_str().expect("action"))
        .collect();
    assert!(actions.contains(&"Report Generated"));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn rejected_format_leaves_no_audit_entry() {
    let home = make_temp_home();
    let out = run(&home, &["report", "compliance", "--format", "pdf"]);
    assert_eq!(out.status.code(), Some(2));

    let out = run(&home, &["--user", "3", "audit", "show", "--json"]);
    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    let actions: Vec<&str> = entries
        .as_array()
        .expect("array")
        .iter()
        .map(|e| e["action"].as_str().expect("action"))
        .collect();
    assert!(!actions.contains(&"Report Generated"), "{actions:?}");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn metadata_can_be_suppressed_by_config() {
    let home = make_temp_home();
    let out = racap_cmd(&home)
        .env("RACAP_REPORT_INCLUDE_METADATA", "false")
        .args(["report", "compliance", "--format", "json"])
        .output()
        .expect("run racap");
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert!(v.get("metadata").is_none());
    let _ = std::fs::remove_dir_all(&home);
}
