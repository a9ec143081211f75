use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!("qnet-err-{}.{}", nanos, extension));
    fs::write(&path, contents).expect("config write should succeed");
    path
}

fn cmd() -> Command {
    Command::cargo_bin("qnet-sim").expect("binary should build")
}

#[test]
fn missing_queue_flags_fail() {
    cmd()
        .assert()
        .failure()
        .stderr(contains("--servers is required"));
}

#[test]
fn malformed_window_fails() {
    cmd()
        .args([
            "--servers",
            "1",
            "--arrival",
            "2",
            "--service",
            "1,1",
            "--time",
            "10",
        ])
        .assert()
        .failure()
        .stderr(contains("invalid window '2'"));
}

#[test]
fn missing_stop_condition_fails() {
    cmd()
        .args(["--servers", "1", "--arrival", "2,5", "--service", "1,1"])
        .assert()
        .failure()
        .stderr(contains("no stopping condition"));
}

#[test]
fn unknown_route_target_fails() {
    let config = r#"
max_clients = 10

[[stations]]
name = "front"
servers = 1
arrival = { low = 2.0, high = 5.0 }
service = { low = 1.0, high = 2.0 }
routes = [{ to = "nowhere", probability = 0.5 }]
"#;
    let path = write_temp_config(config, "toml");
    cmd()
        .args(["--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("unknown station 'nowhere'"));
}

#[test]
fn routing_mass_above_one_fails() {
    let config = r#"
max_clients = 10

[[stations]]
name = "front"
servers = 1
arrival = { low = 2.0, high = 5.0 }
service = { low = 1.0, high = 2.0 }
routes = [
  { to = "back", probability = 0.7 },
  { to = "back", probability = 0.7 },
]

[[stations]]
name = "back"
servers = 1
service = { low = 1.0, high = 2.0 }
"#;
    let path = write_temp_config(config, "toml");
    cmd()
        .args(["--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("routing probabilities sum"));
}

#[test]
fn zero_servers_fails() {
    cmd()
        .args([
            "--servers",
            "0",
            "--arrival",
            "2,5",
            "--service",
            "1,1",
            "--time",
            "10",
        ])
        .assert()
        .failure()
        .stderr(contains("at least one server"));
}

#[test]
fn unsupported_config_extension_fails() {
    let path = write_temp_config("stations = []", "yaml");
    cmd()
        .args(["--config", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("unsupported config format 'yaml'"));
}

#[test]
fn missing_config_file_fails() {
    cmd()
        .args(["--config", "/definitely/not/here.toml"])
        .assert()
        .failure()
        .stderr(contains("failed to read config"));
}
