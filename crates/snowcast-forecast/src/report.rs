//! Human-readable verdict formatting for predictions.
use anyhow::Result;

use crate::forecaster::SnowForecaster;

/// Natural-language verdict for a predicted label.
pub fn verdict(label: i32) -> &'static str {
    if label == 1 {
        "snow will accumulate"
    } else {
        "snow will not accumulate"
    }
}

/// Print the prediction and the recorded outcome for a known timestamp.
pub fn judge(forecaster: &SnowForecaster, timestamp: &str) -> Result<()> {
    println!("------");
    let predicted = forecaster.predict_with_date(timestamp)?;
    let observed = forecaster.snow_observed(timestamp)?;
    println!("{}: predicted:{} observed:{}", timestamp, predicted, observed);
    println!("{}", verdict(predicted));
    Ok(())
}

/// Format an ad-hoc parameter set for display next to its verdict.
pub fn describe_features(
    temperature: f64,
    precipitation: f64,
    prev_temperature: f64,
    prev_accumulation: f64,
) -> String {
    format!(
        "[temperature:{}] [precipitation:{}] [prev temperature:{}] [prev accumulation:{}]",
        temperature, precipitation, prev_temperature, prev_accumulation
    )
}
