use assert_cmd::Command;
use predicates::str::{contains, diff};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn write_temp_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!("qnet-config-{}.{}", nanos, extension));
    fs::write(&path, contents).expect("config write should succeed");
    path
}

#[test]
fn config_file_toml_tandem_runs() {
    let config = r#"
max_clients = 1

[[stations]]
name = "front"
servers = 1
arrival = { low = 5.0, high = 5.0 }
service = { low = 1.0, high = 1.0 }
routes = [{ to = "back", probability = 1.0 }]

[[stations]]
name = "back"
servers = 1
service = { low = 2.0, high = 2.0 }
"#;
    let path = write_temp_config(config, "toml");

    // One customer: enters front at 5, hops to back at 6, exits at 8.
    let expected = concat!(
        "Elapsed time: 8.00\n",
        "front: arrivals=1 completions=1 losses=0\n",
        "back: arrivals=1 completions=1 losses=0\n",
        "Finished customers: 1\n",
        "Blocking rate: 0.0000\n",
        "Mean response time: 3.0000\n",
    );
    let mut cmd = Command::cargo_bin("qnet-sim").expect("binary should build");
    cmd.args(["--config", path.to_str().unwrap(), "--format", "summary"]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn config_file_json_runs() {
    let config = r#"
{
  "max_clients": 1,
  "stations": [
    {
      "name": "front",
      "servers": 1,
      "arrival": { "low": 5.0, "high": 5.0 },
      "service": { "low": 1.0, "high": 1.0 },
      "routes": [{ "to": "back", "probability": 1.0 }]
    },
    {
      "name": "back",
      "servers": 1,
      "service": { "low": 2.0, "high": 2.0 }
    }
  ]
}
"#;
    let path = write_temp_config(config, "json");

    let mut cmd = Command::cargo_bin("qnet-sim").expect("binary should build");
    cmd.args(["--config", path.to_str().unwrap(), "--format", "json"]);
    cmd.assert()
        .success()
        .stdout(contains("\"mean_response_time\": 3.0"))
        .stdout(contains("\"finished\": 1"));
}

#[test]
fn cli_seed_overrides_the_config_file() {
    let config = r#"
simulation_time = 500.0
seed = 1

[[stations]]
name = "queue"
servers = 1
capacity = 3
arrival = { low = 1.0, high = 3.0 }
service = { low = 2.0, high = 4.0 }
"#;
    let path = write_temp_config(config, "toml");

    let run = |seed: &str| {
        Command::cargo_bin("qnet-sim")
            .expect("binary should build")
            .args([
                "--config",
                path.to_str().unwrap(),
                "--seed",
                seed,
                "--format",
                "json",
            ])
            .output()
            .expect("run should succeed")
    };

    let a = run("7");
    let b = run("7");
    let c = run("8");
    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
    assert_ne!(a.stdout, c.stdout);
}
