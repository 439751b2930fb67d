//! Offline replay of recorded or simulated sensor series
//!
//! Reads the `time_hours,pH,temp` CSV files produced by the simulator and by
//! bench recordings, and drives an [`AlertEngine`] over them exactly as the
//! firmware loop would: one `update` per row, elapsed time floored to whole
//! hours.
//!
//! ## Format
//!
//! ```csv
//! time_hours,pH,temp
//! 0.0,7.1,36.8
//! 0.25,7.2,36.9
//! ```
//!
//! - The first line is a header and is discarded unread
//! - Blank lines are skipped
//! - Each row needs at least three numeric fields; extra fields are ignored
//!
//! Any failure aborts the load. A series with a hole in it produces
//! meaningless alert timings, so there is no partial recovery.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use thiserror_no_std::Error;

use crate::engine::{AlertEngine, AlertStatus};
use crate::observer::AlertObserver;
use crate::time::whole_hours;

/// Result type for replay operations
pub type ReplayResult<T> = Result<T, ReplayError>;

/// Replay input failures
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Source could not be opened or read
    #[error("Failed to read {source_name}: {source}")]
    Io {
        /// File path or stream label
        source_name: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Source had no header line
    #[error("CSV input is empty: {source_name}")]
    EmptyInput {
        /// File path or stream label
        source_name: String,
    },

    /// Header present but no data rows
    #[error("No data rows found in CSV: {source_name}")]
    NoDataRows {
        /// File path or stream label
        source_name: String,
    },

    /// Row ended before a required field
    #[error("Malformed CSV line {line} (missing {field})")]
    MissingField {
        /// 1-based line number, header included
        line: usize,
        /// Name of the absent column
        field: &'static str,
    },

    /// Field present but not a number
    #[error("Malformed CSV line {line} (invalid {field}: {value:?})")]
    InvalidNumber {
        /// 1-based line number, header included
        line: usize,
        /// Name of the offending column
        field: &'static str,
        /// Raw field text
        value: String,
    },
}

/// One row of a replay series
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorReading {
    /// Elapsed time since the dressing went on (fractional hours)
    pub time_hours: f32,
    /// Wound-bed pH
    pub ph: f32,
    /// Wound-bed temperature (°C)
    pub temp_c: f32,
}

/// Column names in file order
const FIELDS: [&str; 3] = ["time_hours", "pH", "temp"];

/// Header written by [`write_csv`]
pub const CSV_HEADER: &str = "time_hours,pH,temp";

/// Load a replay series from a CSV file
pub fn load_csv<P: AsRef<Path>>(path: P) -> ReplayResult<Vec<SensorReading>> {
    let path = path.as_ref();
    let source_name = path.display().to_string();

    let file = File::open(path).map_err(|source| ReplayError::Io {
        source_name: source_name.clone(),
        source,
    })?;

    let readings = parse_csv(BufReader::new(file), &source_name)?;
    log::info!("Loaded {} readings from {}", readings.len(), source_name);
    Ok(readings)
}

/// Parse a replay series from any buffered reader
///
/// `source_name` only labels errors.
pub fn parse_csv<R: BufRead>(reader: R, source_name: &str) -> ReplayResult<Vec<SensorReading>> {
    let io_error = |source: io::Error| ReplayError::Io {
        source_name: source_name.to_string(),
        source,
    };

    let mut lines = reader.lines();

    match lines.next() {
        Some(header) => {
            header.map_err(io_error)?;
        }
        None => {
            return Err(ReplayError::EmptyInput {
                source_name: source_name.to_string(),
            })
        }
    }

    let mut readings = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line.map_err(io_error)?;
        // Header is line 1
        let line_no = index + 2;

        if line.trim().is_empty() {
            continue;
        }

        readings.push(parse_row(&line, line_no)?);
    }

    if readings.is_empty() {
        return Err(ReplayError::NoDataRows {
            source_name: source_name.to_string(),
        });
    }

    Ok(readings)
}

fn parse_row(line: &str, line_no: usize) -> ReplayResult<SensorReading> {
    let mut fields = line.split(',').map(str::trim);
    let mut values = [0.0f32; 3];

    for (slot, name) in values.iter_mut().zip(FIELDS) {
        let raw = fields.next().ok_or(ReplayError::MissingField { line: line_no, field: name })?;
        if raw.is_empty() {
            return Err(ReplayError::MissingField { line: line_no, field: name });
        }
        *slot = raw.parse::<f32>().map_err(|_| ReplayError::InvalidNumber {
            line: line_no,
            field: name,
            value: raw.to_string(),
        })?;
    }

    let [time_hours, ph, temp_c] = values;
    Ok(SensorReading { time_hours, ph, temp_c })
}

/// Write a series in the replay format, header first
pub fn write_csv<W: Write>(mut writer: W, readings: &[SensorReading]) -> io::Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for reading in readings {
        writeln!(writer, "{},{},{}", reading.time_hours, reading.ph, reading.temp_c)?;
    }
    writer.flush()
}

/// What happened over a replayed series
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplayOutcome {
    /// Rows fed to the engine
    pub samples: usize,
    /// Rows for which `update` returned true
    pub alert_samples: usize,
    /// `time_hours` of the first alerting row
    pub first_alert_hours: Option<f32>,
    /// Highest full-window violation rate seen after any update
    pub peak_violation_rate: f32,
    /// Engine state after the last row
    pub final_status: AlertStatus,
}

impl ReplayOutcome {
    /// True if any row raised the alert
    pub fn alert_triggered(&self) -> bool {
        self.first_alert_hours.is_some()
    }
}

/// Drive `engine` over `readings` in order
///
/// Elapsed time is floored to whole hours before each update, matching the
/// firmware's hour counter.
pub fn replay<O: AlertObserver>(engine: &mut AlertEngine<O>, readings: &[SensorReading]) -> ReplayOutcome {
    let mut alert_samples = 0;
    let mut first_alert_hours = None;
    let mut peak_violation_rate = 0.0f32;

    for reading in readings {
        let alert = engine.update(reading.ph, reading.temp_c, whole_hours(reading.time_hours));

        if alert {
            alert_samples += 1;
            if first_alert_hours.is_none() {
                log::debug!("first alert at t={}h", reading.time_hours);
                first_alert_hours = Some(reading.time_hours);
            }
        }

        peak_violation_rate = peak_violation_rate.max(engine.window_fill_rate());
    }

    ReplayOutcome {
        samples: readings.len(),
        alert_samples,
        first_alert_hours,
        peak_violation_rate,
        final_status: engine.status(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> ReplayResult<Vec<SensorReading>> {
        parse_csv(Cursor::new(text), "inline")
    }

    #[test]
    fn parses_rows_after_header() {
        let readings = parse("time_hours,pH,temp\n0.0,7.1,36.8\n0.25,7.2,36.9\n").unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1], SensorReading { time_hours: 0.25, ph: 7.2, temp_c: 36.9 });
    }

    #[test]
    fn header_is_not_validated() {
        // Whatever is on line 1 is dropped, even if it looks like data
        let readings = parse("1.0,2.0,3.0\n0.5,6.9,36.7\n").unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].time_hours, 0.5);
    }

    #[test]
    fn skips_blank_lines_and_extra_fields() {
        let readings = parse("h\n\n0.0, 7.0 ,36.5,extra\n\r\n1.0,7.1,36.6\r\n").unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].ph, 7.0);
    }

    #[test]
    fn empty_input_is_fatal() {
        assert!(matches!(parse(""), Err(ReplayError::EmptyInput { .. })));
    }

    #[test]
    fn header_only_is_fatal() {
        assert!(matches!(parse("time_hours,pH,temp\n"), Err(ReplayError::NoDataRows { .. })));
    }

    #[test]
    fn short_row_is_fatal() {
        let err = parse("time_hours,pH,temp\n0.0,7.1,36.8\n0.25,7.2\n").unwrap_err();
        assert!(matches!(err, ReplayError::MissingField { line: 3, field: "temp" }));
        assert_eq!(err.to_string(), "Malformed CSV line 3 (missing temp)");
    }

    #[test]
    fn bad_number_is_fatal() {
        let err = parse("time_hours,pH,temp\nabc,7.1,36.8\n").unwrap_err();
        assert!(matches!(err, ReplayError::InvalidNumber { line: 2, field: "time_hours", .. }));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_csv("/nonexistent/woundguard/series.csv").unwrap_err();
        assert!(matches!(err, ReplayError::Io { .. }));
    }

    #[test]
    fn written_series_parses_back() {
        let series = [
            SensorReading { time_hours: 0.0, ph: 6.0, temp_c: 36.8 },
            SensorReading { time_hours: 0.25, ph: 6.1, temp_c: 36.85 },
        ];
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &series).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with(CSV_HEADER));
        assert_eq!(parse(&text).unwrap(), series);
    }

    #[test]
    fn replay_floors_time_and_reports_first_alert() {
        let mut engine = AlertEngine::new(60).unwrap();
        let mut series = Vec::new();
        for hour in 0..24 {
            series.push(SensorReading { time_hours: hour as f32 + 0.5, ph: 6.5, temp_c: 36.8 });
        }
        for hour in 24..40 {
            series.push(SensorReading { time_hours: hour as f32 + 0.5, ph: 8.0, temp_c: 38.5 });
        }

        let outcome = replay(&mut engine, &series);
        assert_eq!(outcome.samples, 40);
        assert!(outcome.final_status.baseline_locked);
        // Lock at t=24.5, 12 sample window full at t=35.5
        assert_eq!(outcome.first_alert_hours, Some(35.5));
        assert_eq!(outcome.alert_samples, 5);
        assert_eq!(outcome.peak_violation_rate, 1.0);
        assert!(outcome.alert_triggered());
    }
}
