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
    let home = std::env::temp_dir().join(format!("racap-exit-test-{}-{seq}", std::process::id()));
    let _ = std::fs::remove_dir_all(&home);
    std::fs::create_dir_all(&home).expect("create home");
    home
}

#[test]
fn completion_unknown_shell_exits_2() {
    let home = make_temp_home();
    let out = run(&home, &["completion", "nope"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn unknown_user_exits_2() {
    let home = make_temp_home();
    let out = run(&home, &["--user", "nobody", "dashboard"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn unknown_host_show_exits_4() {
    let home = make_temp_home();
    let out = run(&home, &["hosts", "show", "999"]);
    assert_eq!(out.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("host not found"), "{stderr}");
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn unknown_rule_toggle_exits_4() {
    let home = make_temp_home();
    let out = run(
        &home,
        &["rules", "toggle", "--rule", "CIS-9.9", "--location", "DEL"],
    );
    assert_eq!(out.status.code(), Some(4));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn unknown_report_host_exits_4() {
    let home = make_temp_home();
    let out = run(&home, &["report", "host", "999"]);
    assert_eq!(out.status.code(), Some(4));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn invalid_location_exits_2() {
    let home = make_temp_home();
    let out = run(
        &home,
        &["rules", "toggle", "--rule", "CIS-1.3", "--location", "XYZ"],
    );
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn viewer_toggle_exits_10() {
    let home = make_temp_home();
    // User 4 is the Viewer.
    let out = run(
        &home,
        &[
            "--user", "4", "rules", "toggle", "--rule", "CIS-1.3", "--location", "DEL",
        ],
    );
    assert_eq!(out.status.code(), Some(10));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn ui_requires_tty_exits_2() {
    let home = make_temp_home();
    let out = run(&home, &["ui"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn unsupported_report_format_exits_2() {
    let home = make_temp_home();
    let out = run(&home, &["report", "compliance", "--format", "pdf"]);
    assert_eq!(out.status.code(), Some(2));
    let _ = std::fs::remove_dir_all(&home);
}

#[test]
fn happy_path_exits_0() {
    let home = make_temp_home();
    let out = run(&home, &["dashboard", "--json"]);
    assert_eq!(out.status.code(), Some(0));
    let _ = std::fs::remove_dir_all(&home);
}
