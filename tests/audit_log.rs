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
    let home = std::env::temp_dir().join(format!("racap-audit-test-{}-{seq}", std::process::id()));
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(&home).expect("create home");
    home
}

#[test]
fn first_run_bootstraps_the_log() {
    let home = make_temp_home();
    let out = run(&home, &["--user", "3", "audit", "show", "--json"]);
    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "System Initialized");
    assert_eq!(entries[0]["user"], "system");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn viewer_cannot_view_the_log() {
    let home = make_temp_home();
    let out = run(&home, &["--user", "4", "audit", "show"]);
    assert_eq!(out.status.code(), Some(10));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn count_bounds_the_window() {
    let home = make_temp_home();
    for _ in 0..3 {
        let out = run(
            &home,
            &[
                "--user", "1", "rules", "toggle", "--rule", "CIS-1.3", "--location", "DEL",
            ],
        );
        assert!(out.status.success());
    }
    let out = run(
        &home,
        &["--user", "3", "audit", "show", "--count", "2", "--json"],
    );
    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    assert_eq!(entries.as_array().expect("array").len(), 2);
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn action_filter_narrows_the_window() {
    let home = make_temp_home();
    let out = run(
        &home,
        &[
            "--user", "1", "rules", "toggle", "--rule", "CIS-1.3", "--location", "DEL",
        ],
    );
    assert!(out.status.success());

    let out = run(
        &home,
        &[
            "--user",
            "3",
            "audit",
            "show",
            "--action",
            "Rule Disabled",
            "--json",
        ],
    );
    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "Rule Disabled");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn by_user_filter_is_independent_of_the_session_user() {
    let home = make_temp_home();
    let out = run(
        &home,
        &[
            "--user", "1", "rules", "toggle", "--rule", "CIS-1.3", "--location", "DEL",
        ],
    );
    assert!(out.status.success());

    // Acting as user 3 while filtering by the entries' author.
    let out = run(
        &home,
        &[
            "--user",
            "3",
            "audit",
            "show",
            "--by-user",
            "Rajesh Kumar",
            "--json",
        ],
    );
    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["userName"], "Rajesh Kumar");

    let out = run(
        &home,
        &["--user", "3", "audit", "show", "--by-user", "System", "--json"],
    );
    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "System Initialized");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn filters_see_past_the_display_window() {
    let home = make_temp_home();
    // Disable, then enable: the Disabled entry is no longer the newest.
    for _ in 0..2 {
        let out = run(
            &home,
            &[
                "--user", "1", "rules", "toggle", "--rule", "CIS-1.3", "--location", "DEL",
            ],
        );
        assert!(out.status.success());
    }

    let out = run(
        &home,
        &[
            "--user",
            "3",
            "audit",
            "show",
            "--count",
            "1",
            "--action",
            "Rule Disabled",
            "--json",
        ],
    );
    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "Rule Disabled");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn export_writes_the_full_log_as_json() {
    let home = make_temp_home();
    let output = home.join("audit.json");
    let out = run(
        &home,
        &[
            "--user",
            "3",
            "audit",
            "export",
            "--output",
            output.to_str().expect("utf8 path"),
        ],
    );
    assert!(out.status.success());

    let body = std::fs::read_to_string(&output).expect("read export");
    let entries: serde_json::Value = serde_json::from_str(&body).expect("parse export");
    assert_eq!(entries.as_array().expect("array").len(), 1);
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn viewer_cannot_export() {
    let home = make_temp_home();
    let out = run(&home, &["--user", "4", "audit", "export"]);
    assert_eq!(out.status.code(), Some(10));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn clear_is_super_admin_only_and_leaves_a_trace() {
    let home = make_temp_home();

    // Local Admin lacks the settings capability.
    let out = run(&home, &["--user", "2", "audit", "clear"]);
    assert_eq!(out.status.code(), Some(10));

    let out = run(&home, &["--user", "1", "audit", "clear"]);
    assert!(out.status.success());

    let out = run(&home, &["--user", "3", "audit", "show", "--json"]);
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).expect("parse json");
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "Audit Log Cleared");
    let _ = std::fs::remove_dir_all(&home);
}
