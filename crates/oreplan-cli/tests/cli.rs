//! CLI-level smoke test: run the binary end to end over a tiny instance
//! and check it exits cleanly and writes a plausible solution record.

use std::fs;
use std::process;

use assert_cmd::Command;
use predicates::prelude::*;

const INSTANCE: &str = r#"{
  "info": {"name": "smoke", "omega_1": 1.0, "omega_2": 1.0},
  "stockpiles": [
    {
      "id": 1,
      "position": 0,
      "yard": 1,
      "rails": [1],
      "capacity": 100.0,
      "weightIni": 100.0,
      "qualityIni": [{"parameter": "Fe", "value": 60.0}]
    }
  ],
  "engines": [
    {"id": 1, "speedStack": 50.0, "speedReclaim": 50.0, "posIni": 0, "rail": 1, "yards": [1]}
  ],
  "inputs": [],
  "outputs": [
    {
      "id": 1,
      "destination": "port",
      "weight": 50.0,
      "quality": [{"parameter": "Fe", "minimum": 55.0, "maximum": 65.0, "goal": 60.0, "importance": 1}],
      "time": 0.0
    }
  ],
  "distancesTravel": [[0.0]],
  "timeTravel": [[0.0]]
}"#;

#[test]
fn test_run_single_stockpile_instance_writes_solution() {
    let dir = std::env::temp_dir().join(format!("oreplan-cli-test-{}", process::id()));
    fs::create_dir_all(&dir).unwrap();
    let input_path = dir.join("instance.json");
    let output_path = dir.join("solution.json");
    fs::write(&input_path, INSTANCE).unwrap();

    Command::cargo_bin("oreplan")
        .unwrap()
        .arg(&input_path)
        .arg(&output_path)
        .arg("1")
        .assert()
        .success()
        .stderr(predicate::str::contains("solution written to"));

    let raw = fs::read_to_string(&output_path).unwrap();
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(record["objective"].is_number());
    assert!(record["outputs"].as_array().unwrap().len() == 1);

    let _ = fs::remove_dir_all(&dir);
}
