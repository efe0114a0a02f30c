//! Integration tests for the forecaster lifecycle: load, cache, train,
//! predict, judge.
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use snowcast_forecast::config::{ClassifierKind, ModelConfig, SelectionConfig};
use snowcast_forecast::error::ForecastError;
use snowcast_forecast::forecaster::SnowForecaster;
use snowcast_forecast::report::judge;

static FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn csv_row(ts: &str, temp: f64, accumulation: i64, wind: f64, precipitation: f64) -> String {
    format!("{ts},{temp},0,0,{accumulation},0,0,{wind},0,0,0,0,{precipitation}")
}

/// January 2015: odd days cold and snowy, even days warm and dry.
fn winter_rows() -> Vec<String> {
    let mut rows = Vec::new();
    for day in 1..=28 {
        let snowy = day % 2 == 1;
        let (temp, accumulation, precipitation) = if snowy {
            (-6.0 - (day % 3) as f64, 4, 3.0)
        } else {
            (7.0 + (day % 4) as f64, 0, 0.0)
        };
        rows.push(csv_row(
            &format!("2015/1/{day} 00:00:00"),
            temp,
            accumulation,
            1.5,
            precipitation,
        ));
    }
    rows
}

fn write_weather_csv(rows: &[String]) -> PathBuf {
    let id = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "snowcast_forecaster_{}_{}.csv",
        std::process::id(),
        id
    ));
    std::fs::write(&path, rows.join("\n")).unwrap();
    path
}

#[test]
fn train_then_predict_with_date() {
    let path = write_weather_csv(&winter_rows());
    let mut forecaster = SnowForecaster::new(&path);
    let report = forecaster.train().unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(report.candidates.len(), 5);
    assert!(forecaster.model_name().is_some());

    // Training points are cleanly separated, so the selected model should
    // reproduce the recorded outcomes.
    assert_eq!(forecaster.predict_with_date("2015/1/15 00:00:00").unwrap(), 1);
    assert_eq!(forecaster.predict_with_date("2015/1/16 00:00:00").unwrap(), 0);
    assert_eq!(forecaster.snow_observed("2015/1/15 00:00:00").unwrap(), 1);
    assert_eq!(forecaster.snow_observed("2015/1/16 00:00:00").unwrap(), 0);
}

#[test]
fn selection_report_follows_catalog_order() {
    let path = write_weather_csv(&winter_rows());
    let mut forecaster = SnowForecaster::new(&path);
    let report = forecaster.train().unwrap();
    std::fs::remove_file(&path).ok();

    let expected: Vec<&str> = ClassifierKind::catalog()
        .iter()
        .map(|kind| kind.name())
        .collect();
    let reported: Vec<&str> = report
        .candidates
        .iter()
        .map(|candidate| candidate.name)
        .collect();
    assert_eq!(reported, expected);
    assert_eq!(forecaster.model_name(), Some(report.selected));
}

#[test]
fn dataset_is_cached_after_first_load() {
    let path = write_weather_csv(&winter_rows());
    let mut forecaster = SnowForecaster::new(&path);

    let n_samples = forecaster.dataset().unwrap().n_samples();
    assert_eq!(n_samples, 27);

    // Deleting the file proves the second access never re-reads it.
    std::fs::remove_file(&path).unwrap();
    assert_eq!(forecaster.dataset().unwrap().n_samples(), n_samples);
    assert!(forecaster.train().is_ok());
}

#[test]
fn predict_before_training_is_a_precondition_error() {
    let path = write_weather_csv(&winter_rows());
    let forecaster = SnowForecaster::new(&path);
    std::fs::remove_file(&path).ok();

    let err = forecaster.predict(0.0, 0.0, 3.0, 2.0).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ForecastError>(),
        Some(ForecastError::ModelNotTrained)
    ));
}

#[test]
fn unknown_timestamp_is_a_lookup_error() {
    let path = write_weather_csv(&winter_rows());
    let mut forecaster = SnowForecaster::new(&path);
    forecaster.train().unwrap();
    std::fs::remove_file(&path).ok();

    let err = forecaster.predict_with_date("1999/1/1 00:00:00").unwrap_err();
    match err.downcast_ref::<ForecastError>() {
        Some(ForecastError::UnknownTimestamp(timestamp)) => {
            assert_eq!(timestamp, "1999/1/1 00:00:00");
        }
        other => panic!("expected UnknownTimestamp, got {:?}", other),
    }
}

#[test]
fn retraining_replaces_the_model() {
    let path = write_weather_csv(&winter_rows());
    let mut forecaster = SnowForecaster::new(&path);
    forecaster.train().unwrap();
    let first = forecaster.model_name();
    forecaster.train().unwrap();
    std::fs::remove_file(&path).ok();

    assert!(forecaster.model_name().is_some());
    assert_eq!(forecaster.model_name(), first, "selection is deterministic");
}

#[test]
fn train_with_bypasses_selection() {
    let path = write_weather_csv(&winter_rows());
    let mut forecaster = SnowForecaster::new(&path);
    let model_config = ModelConfig {
        kind: ClassifierKind::gradient_boosting(),
        ..ModelConfig::default()
    };
    forecaster.train_with(model_config).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(forecaster.model_name(), Some("GradientBoosting"));
    assert_eq!(forecaster.predict_with_date("2015/1/15 00:00:00").unwrap(), 1);
}

#[test]
fn judge_prints_for_known_timestamps() {
    let path = write_weather_csv(&winter_rows());
    let mut forecaster = SnowForecaster::with_config(&path, SelectionConfig::default());
    forecaster.train().unwrap();
    std::fs::remove_file(&path).ok();

    judge(&forecaster, "2015/1/15 00:00:00").unwrap();
    assert!(judge(&forecaster, "1999/1/1 00:00:00").is_err());
}

#[test]
fn missing_file_propagates_from_train() {
    let path = std::env::temp_dir().join("snowcast_forecaster_missing.csv");
    let mut forecaster = SnowForecaster::new(&path);
    assert!(forecaster.train().is_err());
}
