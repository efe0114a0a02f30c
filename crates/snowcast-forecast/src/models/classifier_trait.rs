use anyhow::Result;
use ndarray::Array2;

/// A small trait abstraction for the classifier wrappers evaluated during
/// model selection. Centralizing the contract here lets implementations
/// live next to their model code while the selector and the forecaster
/// stay agnostic of the backing crate.
pub trait SnowClassifier {
    /// Fit the model. `y` uses the crate convention (1 for snow, 0 for none).
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()>;

    /// Predict hard class labels in {0, 1}, one per row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>>;

    /// Human readable name for the model
    fn name(&self) -> &'static str {
        "classifier"
    }
}
