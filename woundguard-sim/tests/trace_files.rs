//! Simulated traces written to disk and replayed through the core harness

use tempfile::TempDir;
use woundguard_core::replay::{load_csv, replay};
use woundguard_core::AlertEngine;
use woundguard_sim::{run_simulation, Scenario, SimulationConfig, SweepReport};

#[test]
fn saved_trace_replays_identically() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("infection.csv");

    let config = SimulationConfig {
        sampling_interval_minutes: 30,
        seed: 11,
        ..SimulationConfig::for_scenario(Scenario::Infection)
    };
    let run = run_simulation(&config).unwrap();
    run.save_csv(&path).unwrap();

    let readings = load_csv(&path).unwrap();
    assert_eq!(readings.len(), run.trace.len());

    let mut engine = AlertEngine::with_policy(30, config.policy).unwrap();
    let outcome = replay(&mut engine, &readings);

    assert_eq!(outcome.first_alert_hours, run.first_alert_hours);
    assert_eq!(outcome.peak_violation_rate, run.peak_violation_rate);
    assert_eq!(outcome.final_status.baseline_c, run.baseline_c());
}

#[test]
fn config_file_drives_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.json");
    std::fs::write(&path, r#"{ "scenario": "normal", "days": 2, "sampling_interval_minutes": 60 }"#)
        .unwrap();

    let config = SimulationConfig::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let run = run_simulation(&config).unwrap();

    assert_eq!(run.trace.len(), 48);
    assert!(run.final_status.baseline_locked);
    assert!(!run.alert_triggered());
}

#[test]
fn empty_report_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sweep.csv");

    SweepReport::default().write_csv(std::fs::File::create(&path).unwrap()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 1);
}
