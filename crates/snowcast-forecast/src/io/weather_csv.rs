//! Weather observation CSV reader.
//!
//! Each usable row contributes one sample pairing today's observation with
//! the previous calendar day's baseline, so the reader carries a small
//! running state while it walks the file.
use std::collections::HashMap;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use ndarray::Array2;

/// Number of feature columns derived per sample.
pub const N_FEATURES: usize = 4;

/// Minimum number of fields a data row must carry.
const MIN_FIELDS: usize = 13;

const COL_TIMESTAMP: usize = 0;
const COL_TEMPERATURE: usize = 1;
const COL_ACCUMULATION: usize = 4;
const COL_WIND_SPEED: usize = 7;
const COL_PRECIPITATION: usize = 12;

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Feature matrix, labels and timestamp lookup produced by one load.
///
/// Feature order per row: today's temperature, today's precipitation,
/// yesterday's temperature, yesterday's accumulation.
#[derive(Debug, Clone)]
pub struct WeatherDataset {
    pub x: Array2<f64>,
    /// 1 when snow accumulated on the sample's day, 0 otherwise.
    pub y: Vec<i32>,
    /// Full timestamp string to row index in `x`/`y`.
    pub index: HashMap<String, usize>,
}

impl WeatherDataset {
    pub fn n_samples(&self) -> usize {
        self.y.len()
    }

    /// Feature vector recorded for a known timestamp.
    pub fn sample_for(&self, timestamp: &str) -> Option<[f64; N_FEATURES]> {
        let &row = self.index.get(timestamp)?;
        let mut sample = [0.0; N_FEATURES];
        for (value, feature) in sample.iter_mut().zip(self.x.row(row).iter()) {
            *value = *feature;
        }
        Some(sample)
    }

    /// Ground-truth label recorded for a known timestamp.
    pub fn label_for(&self, timestamp: &str) -> Option<i32> {
        self.index.get(timestamp).map(|&row| self.y[row])
    }
}

/// Read a weather observation CSV into a `WeatherDataset`.
///
/// Rows with an empty accumulation field are skipped entirely. The first
/// observation of each calendar date becomes the "yesterday" baseline for
/// every row of the following date; the first date seen therefore yields
/// no sample for its own first row.
pub fn load_weather_csv<P: AsRef<Path>>(path: P) -> Result<WeatherDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open weather CSV: {}", path.as_ref().display()))?;

    let mut features: Vec<f64> = Vec::new();
    let mut labels: Vec<i32> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    // First observation seen for the most recent calendar date.
    let mut baseline: Option<(NaiveDate, f64, i64)> = None;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        if record.len() < MIN_FIELDS {
            return Err(anyhow!(
                "Row {} has {} fields, expected at least {}",
                row_idx + 1,
                record.len(),
                MIN_FIELDS
            ));
        }

        // An empty accumulation field marks an unusable observation.
        if field(&record, COL_ACCUMULATION).is_empty() {
            continue;
        }

        let timestamp = field(&record, COL_TIMESTAMP).to_string();
        let datetime = NaiveDateTime::parse_from_str(&timestamp, TIMESTAMP_FORMAT)
            .with_context(|| format!("Invalid timestamp '{}' at row {}", timestamp, row_idx + 1))?;
        let date = datetime.date();

        // Temperatures are truncated toward zero before entering a sample.
        let temperature = parse_field::<f64>(&record, COL_TEMPERATURE, "temperature", row_idx)?.trunc();
        let accumulation = parse_field::<i64>(&record, COL_ACCUMULATION, "accumulation", row_idx)?;
        let _wind_speed = parse_field::<f64>(&record, COL_WIND_SPEED, "wind speed", row_idx)?;
        let precipitation = parse_field::<f64>(&record, COL_PRECIPITATION, "precipitation", row_idx)?;

        if let Some((_, prev_temperature, prev_accumulation)) = baseline {
            features.extend_from_slice(&[
                temperature,
                precipitation,
                prev_temperature,
                prev_accumulation as f64,
            ]);
            labels.push(i32::from(accumulation > 0));
            index.insert(timestamp, labels.len() - 1);
        }

        // The baseline advances once per calendar date, keeping the first
        // observation of that date. Later same-date rows reuse it.
        if baseline.map(|(baseline_date, _, _)| baseline_date) != Some(date) {
            baseline = Some((date, temperature, accumulation));
        }
    }

    let n_samples = labels.len();
    let x = Array2::from_shape_vec((n_samples, N_FEATURES), features)
        .context("Failed to build feature matrix")?;

    log::debug!("Loaded {} samples from weather CSV", n_samples);

    Ok(WeatherDataset {
        x,
        y: labels,
        index,
    })
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or_default().trim()
}

fn parse_field<T>(record: &csv::StringRecord, idx: usize, name: &str, row_idx: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    field(record, idx)
        .parse::<T>()
        .with_context(|| format!("Invalid {} at row {}", name, row_idx + 1))
}
