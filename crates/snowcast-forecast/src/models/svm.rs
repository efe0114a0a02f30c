use anyhow::{anyhow, Context, Result};
use linfa::prelude::*;
use linfa::Dataset;
use linfa_svm::Svm;
use ndarray::{Array1, Array2};

use crate::config::{ClassifierKind, ModelConfig};
use crate::models::classifier_trait::SnowClassifier;

/// Linear support vector classifier backed by linfa-svm.
pub struct LinearSvmClassifier {
    model: Option<Svm<f64, bool>>,
    config: ModelConfig,
}

impl LinearSvmClassifier {
    pub fn new(config: ModelConfig) -> Self {
        LinearSvmClassifier {
            model: None,
            config,
        }
    }
}

impl SnowClassifier for LinearSvmClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        let ClassifierKind::LinearSvm { eps, c } = self.config.kind else {
            return Err(anyhow!(
                "Expected LinearSvm parameters, got {:?}",
                self.config.kind
            ));
        };

        // Positive class is "snow accumulated".
        let targets = y.iter().map(|&label| label == 1).collect::<Array1<bool>>();
        let dataset = Dataset::new(x.to_owned(), targets);

        let (c_pos, c_neg) = c;
        let params = Svm::<f64, bool>::params()
            .eps(eps)
            .pos_neg_weights(c_pos, c_neg)
            .linear_kernel();

        let model = params.fit(&dataset).context("Failed to fit linear SVM")?;
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| anyhow!("Linear SVM predict called before fit"))?;
        let predictions = model.predict(x);
        Ok(predictions.iter().map(|&hit| i32::from(hit)).collect())
    }

    fn name(&self) -> &'static str {
        "LinearSvm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn separable() -> (Array2<f64>, Vec<i32>) {
        // The first feature separates the classes on its own.
        let x = Array2::from_shape_vec(
            (10, 2),
            vec![
                -2.0, 0.3, -1.5, -0.1, -2.2, 0.2, -1.8, 0.0, -2.5, -0.3, 2.0, 0.1, 1.5, -0.2, 2.2,
                0.3, 1.8, 0.0, 2.5, -0.1,
            ],
        )
        .unwrap();
        let y = vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1];
        (x, y)
    }

    #[test]
    fn fit_and_predict_separable() {
        let (x, y) = separable();
        let config = ModelConfig {
            kind: ClassifierKind::linear_svm(),
            ..ModelConfig::default()
        };
        let mut classifier = LinearSvmClassifier::new(config);
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
            kind: ClassifierKind::linear_svm(),
            ..ModelConfig::default()
        };
        let classifier = LinearSvmClassifier::new(config);
        assert!(classifier.predict(&Array2::zeros((1, 2))).is_err());
    }
}
