//! Infection Scenario Walkthrough
//!
//! Simulates ten days of a wound that becomes infected on day 3, runs the
//! alert engine over the noisy readings, and prints when the alert fires.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run -p woundguard-sim --example 01_infection_run
//! cargo run -p woundguard-sim --example 01_infection_run -- trace.csv
//! ```
//!
//! With a path argument the measured series is written as a replay CSV.

use woundguard_sim::{run_simulation, Scenario, SimulationConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("WoundGuard Infection Simulation");
    println!("===============================\n");

    for scenario in Scenario::ALL {
        let config = SimulationConfig::for_scenario(scenario);
        let policy = config.policy;

        println!("Scenario: {}", scenario);
        println!("  Sampling: every {} min for {} days", config.sampling_interval_minutes, config.days);
        println!("  pH threshold: {}", policy.ph_threshold);
        println!("  ΔT threshold: {}°C", policy.temp_delta_threshold_c);
        println!(
            "  Persistence: {}% of {} h",
            policy.violation_rate_threshold * 100.0,
            policy.persistence_hours
        );

        let run = run_simulation(&config)?;

        if let Some(baseline) = run.baseline_c() {
            println!("  Baseline: {:.2}°C", baseline);
        }
        match (run.first_alert_hours, run.first_alert_days()) {
            (Some(hours), Some(days)) => {
                println!("  First alert: {:.1} h (day {:.1})", hours, days)
            }
            _ => println!("  No alert"),
        }
        println!("  Peak violation rate: {:.0}%", run.peak_violation_rate * 100.0);

        // Daily summary of the measured series
        println!("\n  Day   pH     Temp    Alert");
        for point in run.trace.iter().step_by(96) {
            println!(
                "  {:>3}   {:.2}   {:.2}   {}",
                point.time_hours as u32 / 24,
                point.ph,
                point.temp_c,
                if point.alert { "ON" } else { "-" }
            );
        }
        println!();

        if scenario == Scenario::Infection {
            if let Some(path) = std::env::args().nth(1) {
                run.save_csv(&path)?;
                println!("Trace written to {}", path);
            }
        }
    }

    Ok(())
}
