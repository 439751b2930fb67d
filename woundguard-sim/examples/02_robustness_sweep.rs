//! Robustness Sweep Example
//!
//! Varies one parameter at a time around the clinical operating point and
//! reports detection latency and false positives for every run.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run -p woundguard-sim --example 02_robustness_sweep
//! cargo run -p woundguard-sim --example 02_robustness_sweep -- results.csv
//! ```

use std::fs::File;
use std::io::BufWriter;

use woundguard_sim::{run_sweep, Suite, SweepConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("WoundGuard Robustness Sweep");
    println!("===========================\n");

    let config = SweepConfig::default();
    let report = run_sweep(&config)?;

    for suite in Suite::ALL {
        println!("### {}", suite.name());
        println!("  {:<10} {:>8} {:>10} {:>10} {:>8}", "scenario", "value", "alert", "days", "peak");
        for row in report.suite(suite) {
            println!(
                "  {:<10} {:>8} {:>10} {:>10} {:>7.0}%",
                row.scenario.to_string(),
                row.value,
                row.alert_triggered,
                row.alert_days.map(|d| format!("{:.1}", d)).unwrap_or_else(|| "-".into()),
                row.peak_violation_rate * 100.0,
            );
        }
        println!();
    }

    let false_positives = report.false_positives();
    if false_positives.is_empty() {
        println!("Zero false positives across all parameter variations");
    } else {
        println!("FALSE POSITIVES DETECTED: {}", false_positives.len());
        for row in false_positives {
            println!("  {} = {}", row.suite.name(), row.value);
        }
    }

    println!("Missed detections: {}", report.missed_detections().len());

    if let Some(path) = std::env::args().nth(1) {
        report.write_csv(BufWriter::new(File::create(&path)?))?;
        println!("\nResults saved to: {}", path);
    }

    Ok(())
}
