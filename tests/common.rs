#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, isolated from the user's real configuration directory.
pub fn rlc() -> Command {
    let mut cmd = cargo_bin_cmd!("rlogcheck");
    cmd.env(rlogcheck::config::CONFIG_DIR_ENV, config_dir());
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn config_dir() -> PathBuf {
    env::temp_dir().join("rlogcheck_test_config")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rlogcheck.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(db_path: &str) {
    rlc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (outcome, notes, at) in [
        ("All Good", "routine review", "2025-09-01 09:00"),
        ("Issues Found", "disk alerts on web-1", "2025-09-15 14:30"),
        ("3", "", "2025-10-02 08:15"),
    ] {
        rlc()
            .args(["--db", db_path, "add", outcome, "--notes", notes, "--at", at])
            .assert()
            .success();
    }
}
