//! CSV export for pipeline series.
//!
//! Every file has a fixed header and identical inputs produce byte-identical
//! output.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::carbon::IntensityPoint;
use crate::error::Result;
use crate::privacy::SyntheticRecord;
use crate::runner::{CarbonReport, PrivacyReport, TariffReport};
use crate::tariff::ShiftedReading;

const SHIFTED_HEADER: &str = "timestamp,hour,day_of_week,consumption_kwh,rate,\
                              flexible_kwh,essential_kwh,shifted_flexible_kwh,\
                              total_after_shift_kwh";

const RECORD_HEADER: &str = "household_id,day,total_kwh,weekday,tariff_type,occupants,home_type";

const INTENSITY_HEADER: &str = "hour,intensity_gco2_kwh,recommended";

pub const SHIFTED_READINGS_FILE: &str = "shifted_readings.csv";
pub const REAL_RECORDS_FILE: &str = "real_records.csv";
pub const SYNTHETIC_RECORDS_FILE: &str = "synthetic_records.csv";
pub const CARBON_INTENSITY_FILE: &str = "carbon_intensity.csv";

fn header(h: &str) -> impl Iterator<Item = &str> {
    h.split(',').map(str::trim)
}

/// Writes the hourly before/after shifting series.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_shifted_readings(rows: &[ShiftedReading], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header(SHIFTED_HEADER))?;
    for r in rows {
        wtr.write_record(&[
            r.reading.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            r.reading.hour.to_string(),
            r.reading.day_of_week.to_string(),
            format!("{:.4}", r.reading.consumption_kwh),
            format!("{:.4}", r.rate),
            format!("{:.4}", r.flexible_kwh),
            format!("{:.4}", r.essential_kwh),
            format!("{:.4}", r.shifted_flexible_kwh),
            format!("{:.4}", r.total_after_shift_kwh),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes a household-day table. Synthetic rows leave `household_id` empty.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_records(records: &[SyntheticRecord], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header(RECORD_HEADER))?;
    for r in records {
        wtr.write_record(&[
            r.household_id.map(|id| id.to_string()).unwrap_or_default(),
            r.day.to_string(),
            format!("{:.2}", r.total_kwh),
            r.weekday.to_string(),
            r.tariff_type.to_string(),
            r.occupants.to_string(),
            r.home_type.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the hourly intensity chart series.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_intensity(points: &[IntensityPoint], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header(INTENSITY_HEADER))?;
    for p in points {
        wtr.write_record(&[
            p.hour.to_string(),
            p.intensity.to_string(),
            p.recommended.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn create(dir: &Path, name: &str) -> Result<(PathBuf, io::BufWriter<File>)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    let file = File::create(&path)?;
    Ok((path, io::BufWriter::new(file)))
}

/// Writes `shifted_readings.csv` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn export_tariff(dir: &Path, report: &TariffReport) -> Result<Vec<PathBuf>> {
    let (path, buf) = create(dir, SHIFTED_READINGS_FILE)?;
    write_shifted_readings(&report.outcome.readings, buf)?;
    info!(path = %path.display(), rows = report.outcome.readings.len(), "exported");
    Ok(vec![path])
}

/// Writes `real_records.csv` and `synthetic_records.csv` into `dir`.
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be written.
pub fn export_privacy(dir: &Path, report: &PrivacyReport) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(2);
    for (name, records) in [
        (REAL_RECORDS_FILE, &report.real),
        (SYNTHETIC_RECORDS_FILE, &report.synthetic),
    ] {
        let (path, buf) = create(dir, name)?;
        write_records(records, buf)?;
        info!(path = %path.display(), rows = records.len(), "exported");
        written.push(path);
    }
    Ok(written)
}

/// Writes `carbon_intensity.csv` into `dir`.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn export_carbon(dir: &Path, report: &CarbonReport) -> Result<Vec<PathBuf>> {
    let (path, buf) = create(dir, CARBON_INTENSITY_FILE)?;
    write_intensity(&report.timeline, buf)?;
    info!(path = %path.display(), rows = report.timeline.len(), "exported");
    Ok(vec![path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CarbonConfig, PrivacyConfig, TariffConfig};
    use crate::runner::{run_carbon, run_privacy, run_tariff};

    fn to_string(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).ok();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn shifted_readings_header_and_rows() {
        let report = run_tariff(&TariffConfig::default()).expect("tariff run");
        let out = to_string(|b| write_shifted_readings(&report.outcome.readings, b));
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some(
                "timestamp,hour,day_of_week,consumption_kwh,rate,flexible_kwh,\
                 essential_kwh,shifted_flexible_kwh,total_after_shift_kwh"
            )
        );
        assert_eq!(lines.count(), 168);
        assert!(out.contains("2024-01-01 00:00:00,0,Mon,"));
    }

    #[test]
    fn synthetic_rows_have_empty_id() {
        let report = run_privacy(&PrivacyConfig::default()).expect("privacy run");
        let real = to_string(|b| write_records(&report.real, b));
        let syn = to_string(|b| write_records(&report.synthetic, b));
        assert_eq!(real.lines().count(), 51);
        assert_eq!(syn.lines().count(), 151);
        assert!(real.lines().nth(1).is_some_and(|l| l.starts_with("1,")));
        assert!(syn.lines().skip(1).all(|l| l.starts_with(',')));
    }

    #[test]
    fn intensity_marks_window() {
        let report = run_carbon(&CarbonConfig::default());
        let out = to_string(|b| write_intensity(&report.timeline, b));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "hour,intensity_gco2_kwh,recommended");
        assert_eq!(lines.len(), 25);
        assert_eq!(lines[16], "15,370,true");
        assert_eq!(lines[1], "0,420,false");
    }

    #[test]
    fn output_is_deterministic() {
        let a = run_tariff(&TariffConfig::default()).expect("tariff run");
        let b = run_tariff(&TariffConfig::default()).expect("tariff run");
        let out_a = to_string(|w| write_shifted_readings(&a.outcome.readings, w));
        let out_b = to_string(|w| write_shifted_readings(&b.outcome.readings, w));
        assert_eq!(out_a, out_b);
    }
}
