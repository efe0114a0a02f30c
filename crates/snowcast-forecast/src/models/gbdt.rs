use anyhow::{anyhow, Result};
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::Array2;

use crate::config::{ClassifierKind, ModelConfig};
use crate::models::classifier_trait::SnowClassifier;

/// Gradient Boosting Decision Tree classifier backed by the gbdt crate.
///
/// Trained with log-likelihood loss, which expects labels in {-1, 1} and
/// yields positive-class probabilities from `predict`.
pub struct GradientBoostingClassifier {
    model: Option<GBDT>,
    config: ModelConfig,
}

impl GradientBoostingClassifier {
    pub fn new(config: ModelConfig) -> Self {
        GradientBoostingClassifier {
            model: None,
            config,
        }
    }
}

fn to_data_vec(x: &Array2<f64>, labels: Option<&[i32]>) -> DataVec {
    let mut data = DataVec::new();
    for row in 0..x.nrows() {
        let features = x.row(row).iter().map(|&v| v as f32).collect::<Vec<f32>>();
        let signed = labels
            .map(|y| if y[row] == 1 { 1.0 } else { -1.0 })
            .unwrap_or(0.0);
        data.push(Data::new_training_data(features, 1.0, signed, None));
    }
    data
}

impl SnowClassifier for GradientBoostingClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        let ClassifierKind::GradientBoosting {
            max_depth,
            num_boost_round,
        } = self.config.kind
        else {
            return Err(anyhow!(
                "Expected GradientBoosting parameters, got {:?}",
                self.config.kind
            ));
        };

        let mut config = Config::new();
        config.set_feature_size(x.ncols());
        config.set_shrinkage(self.config.learning_rate);
        config.set_max_depth(max_depth);
        config.set_iterations(num_boost_round);
        config.set_training_optimization_level(2);
        config.set_loss("LogLikelyhood");

        let mut gbdt = GBDT::new(&config);
        let mut train = to_data_vec(x, Some(y));
        gbdt.fit(&mut train);

        self.model = Some(gbdt);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("Gradient boosting predict called before fit"))?;
        let test = to_data_vec(x, None);
        let probabilities = model.predict(&test);
        Ok(probabilities.iter().map(|&p| i32::from(p > 0.5)).collect())
    }

    fn name(&self) -> &'static str {
        "GradientBoosting"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_and_predict_separable() {
        let x = Array2::from_shape_vec(
            (10, 2),
            vec![
                -3.0, 0.1, -2.5, 0.0, -3.2, -0.1, -2.8, 0.2, -3.5, 0.0, 3.0, 0.1, 2.5, -0.2, 3.2,
                0.0, 2.8, 0.1, 3.5, -0.1,
            ],
        )
        .unwrap();
        let y = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];

        let config = ModelConfig {
            kind: ClassifierKind::gradient_boosting(),
            ..ModelConfig::default()
        };
        let mut classifier = GradientBoostingClassifier::new(config);
        classifier.fit(&x, &y).unwrap();

        let predictions = classifier.predict(&x).unwrap();
        assert_eq!(predictions.len(), y.len());
        let correct = predictions.iter().zip(&y).filter(|(p, t)| p == t).count();
        assert!(
            correct >= 9,
            "separable data should be almost perfectly classified, got {}/10",
            correct
        );
    }

    #[test]
    fn predict_before_fit_errors() {
        let config = ModelConfig {
            kind: ClassifierKind::gradient_boosting(),
            ..ModelConfig::default()
        };
        let classifier = GradientBoostingClassifier::new(config);
        assert!(classifier.predict(&Array2::zeros((1, 2))).is_err());
    }
}
