//! The forecasting object: owns the cached dataset and the trained model.
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use ndarray::Array2;

use crate::config::{ModelConfig, SelectionConfig};
use crate::error::ForecastError;
use crate::io::weather_csv::{load_weather_csv, WeatherDataset, N_FEATURES};
use crate::models::classifier_trait::SnowClassifier;
use crate::models::factory::build_model;
use crate::selection::{select_classifier, SelectionReport};

/// Forecasts whether snow will accumulate on a given day.
///
/// The object moves linearly through uninitialized, dataset-loaded,
/// model-trained; the only way back is a full re-train.
pub struct SnowForecaster {
    data_path: PathBuf,
    selection: SelectionConfig,
    dataset: Option<WeatherDataset>,
    model: Option<Box<dyn SnowClassifier>>,
}

impl SnowForecaster {
    pub fn new<P: AsRef<Path>>(data_path: P) -> Self {
        Self::with_config(data_path, SelectionConfig::default())
    }

    pub fn with_config<P: AsRef<Path>>(data_path: P, selection: SelectionConfig) -> Self {
        SnowForecaster {
            data_path: data_path.as_ref().to_path_buf(),
            selection,
            dataset: None,
            model: None,
        }
    }

    /// Load the weather CSV on first use and retain it for the lifetime of
    /// this forecaster. Later calls never touch the file again.
    pub fn dataset(&mut self) -> Result<&WeatherDataset> {
        if self.dataset.is_none() {
            let dataset = load_weather_csv(&self.data_path)?;
            log::info!(
                "Loaded {} samples from {}",
                dataset.n_samples(),
                self.data_path.display()
            );
            self.dataset = Some(dataset);
        }
        Ok(self.dataset.as_ref().expect("dataset cached above"))
    }

    /// Select the best classifier by cross-validation and fit it on the
    /// full dataset. Re-invoking discards the previous model and repeats
    /// both steps from scratch.
    pub fn train(&mut self) -> Result<SelectionReport> {
        self.dataset()?;
        let dataset = self.dataset.as_ref().expect("dataset cached above");

        let (model_config, report) = select_classifier(&dataset.x, &dataset.y, &self.selection)?;
        let mut model = build_model(model_config);
        model
            .fit(&dataset.x, &dataset.y)
            .with_context(|| format!("Failed to fit selected model {}", model_config.kind.name()))?;

        self.model = Some(model);
        Ok(report)
    }

    /// Skip selection and fit the given configuration on the full dataset.
    pub fn train_with(&mut self, model_config: ModelConfig) -> Result<()> {
        self.dataset()?;
        let dataset = self.dataset.as_ref().expect("dataset cached above");

        let mut model = build_model(model_config);
        model
            .fit(&dataset.x, &dataset.y)
            .with_context(|| format!("Failed to fit model {}", model_config.kind.name()))?;

        self.model = Some(model);
        Ok(())
    }

    /// Predict whether snow will accumulate given raw feature values.
    pub fn predict(
        &self,
        temperature: f64,
        precipitation: f64,
        prev_temperature: f64,
        prev_accumulation: f64,
    ) -> Result<i32> {
        let model = self.model.as_ref().ok_or(ForecastError::ModelNotTrained)?;
        let sample = Array2::from_shape_vec(
            (1, N_FEATURES),
            vec![temperature, precipitation, prev_temperature, prev_accumulation],
        )
        .context("Failed to shape prediction input")?;

        let predictions = model.predict(&sample)?;
        predictions
            .first()
            .copied()
            .ok_or_else(|| anyhow!("Classifier returned no prediction"))
    }

    /// Predict using the feature vector recorded for a known timestamp.
    pub fn predict_with_date(&self, timestamp: &str) -> Result<i32> {
        let dataset = self.dataset.as_ref().ok_or(ForecastError::DatasetNotLoaded)?;
        let sample = dataset
            .sample_for(timestamp)
            .ok_or_else(|| ForecastError::UnknownTimestamp(timestamp.to_string()))?;

        let [temperature, precipitation, prev_temperature, prev_accumulation] = sample;
        self.predict(temperature, precipitation, prev_temperature, prev_accumulation)
    }

    /// Ground-truth label recorded for a known timestamp.
    pub fn snow_observed(&self, timestamp: &str) -> Result<i32> {
        let dataset = self.dataset.as_ref().ok_or(ForecastError::DatasetNotLoaded)?;
        Ok(dataset
            .label_for(timestamp)
            .ok_or_else(|| ForecastError::UnknownTimestamp(timestamp.to_string()))?)
    }

    /// Name of the currently held model, if one has been trained.
    pub fn model_name(&self) -> Option<&'static str> {
        self.model.as_ref().map(|model| model.name())
    }
}
