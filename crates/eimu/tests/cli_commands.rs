#![cfg(all(unix, feature = "cli"))]

use std::process::{Command, Output};

fn eimu(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eimu"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .env_remove("EIMU_PORT")
        .env_remove("EIMU_BAUD")
        .env_remove("EIMU_TIMEOUT")
        .output()
        .expect("eimu should run")
}

fn missing_port() -> String {
    format!("/dev/eimu-missing-{}", std::process::id())
}

#[test]
fn version_prints_package_version() {
    let output = eimu(&["version"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "stdout: {stdout}");
}

#[test]
fn extended_version_reports_protocol_defaults() {
    let output = eimu(&["version", "--extended"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("start=0xBB"), "stdout: {stdout}");
    assert!(stdout.contains("default_baud=921600"), "stdout: {stdout}");
}

#[test]
fn read_from_missing_port_is_transport_error() {
    let port = missing_port();
    let output = eimu(&["read", "rpy", "--port", &port]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&port), "stderr: {stderr}");
}

#[test]
fn world_frame_on_missing_port_is_transport_error() {
    let port = missing_port();
    let output = eimu(&["world-frame", "--set", "ned", "--port", &port]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn bad_timeout_is_usage_error() {
    let port = missing_port();
    let output = eimu(&["read", "rpy", "--port", &port, "--timeout", "bogus"]);

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid duration"), "stderr: {stderr}");
}

#[test]
fn zero_stream_interval_is_usage_error() {
    let port = missing_port();
    let output = eimu(&["stream", "acc", "--interval", "0ms", "--port", &port]);
    assert_eq!(output.status.code(), Some(64));
}
