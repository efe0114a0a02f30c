//! Adaptive boosting over shallow decision trees.
//!
//! Each round resamples the training set according to the current sample
//! weights, fits a shallow linfa-trees learner on the resample, and folds
//! the learner into a weighted vote. Misclassified samples gain weight so
//! later rounds concentrate on them.
use anyhow::{anyhow, Context, Result};
use linfa::prelude::*;
use linfa::Dataset;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ClassifierKind, ModelConfig};
use crate::models::classifier_trait::SnowClassifier;

/// Floor for the weighted error so the vote weight stays finite.
const MIN_ERROR: f64 = 1e-10;

pub struct AdaBoostClassifier {
    rounds: Vec<(f64, DecisionTree<f64, usize>)>,
    config: ModelConfig,
}

impl AdaBoostClassifier {
    pub fn new(config: ModelConfig) -> Self {
        AdaBoostClassifier {
            rounds: Vec::new(),
            config,
        }
    }
}

impl SnowClassifier for AdaBoostClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        let ClassifierKind::AdaBoost {
            n_rounds,
            learner_depth,
        } = self.config.kind
        else {
            return Err(anyhow!(
                "Expected AdaBoost parameters, got {:?}",
                self.config.kind
            ));
        };

        let n_samples = x.nrows();
        if n_samples == 0 {
            return Err(anyhow!("Cannot boost on an empty dataset"));
        }

        let mut weights = vec![1.0 / n_samples as f64; n_samples];
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut rounds: Vec<(f64, DecisionTree<f64, usize>)> = Vec::new();

        for _ in 0..n_rounds {
            let sampler = WeightedIndex::new(&weights).context("Invalid boosting weights")?;
            let rows = (0..n_samples)
                .map(|_| sampler.sample(&mut rng))
                .collect::<Vec<usize>>();

            let records = x.select(Axis(0), &rows);
            let targets = rows
                .iter()
                .map(|&row| y[row] as usize)
                .collect::<Array1<usize>>();
            let tree = DecisionTree::params()
                .max_depth(Some(learner_depth))
                .fit(&Dataset::new(records, targets))
                .context("Failed to fit boosting round")?;

            // Weighted error over the full training set, not the resample.
            let predictions = tree.predict(x);
            let error: f64 = predictions
                .iter()
                .zip(y.iter())
                .zip(weights.iter())
                .filter(|((&predicted, &truth), _)| predicted as i32 != truth)
                .map(|(_, &weight)| weight)
                .sum();

            // A learner no better than chance cannot contribute a vote.
            if error >= 0.5 {
                if rounds.is_empty() {
                    continue;
                }
                break;
            }

            let error = error.clamp(MIN_ERROR, 1.0 - MIN_ERROR);
            let alpha = 0.5 * ((1.0 - error) / error).ln();

            for ((weight, &predicted), &truth) in
                weights.iter_mut().zip(predictions.iter()).zip(y.iter())
            {
                let agreement = if predicted as i32 == truth { 1.0 } else { -1.0 };
                *weight *= (-alpha * agreement).exp();
            }
            let total: f64 = weights.iter().sum();
            for weight in weights.iter_mut() {
                *weight /= total;
            }

            let converged = error <= MIN_ERROR;
            rounds.push((alpha, tree));
            if converged {
                break;
            }
        }

        if rounds.is_empty() {
            return Err(anyhow!(
                "Adaptive boosting found no learner better than chance"
            ));
        }

        log::trace!("AdaBoost kept {} of {} rounds", rounds.len(), n_rounds);
        self.rounds = rounds;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        if self.rounds.is_empty() {
            return Err(anyhow!("AdaBoost predict called before fit"));
        }

        let mut scores = vec![0.0f64; x.nrows()];
        for (alpha, tree) in &self.rounds {
            let predictions = tree.predict(x);
            for (score, &label) in scores.iter_mut().zip(predictions.iter()) {
                *score += if label == 1 { *alpha } else { -*alpha };
            }
        }
        Ok(scores.iter().map(|&score| i32::from(score > 0.0)).collect())
    }

    fn name(&self) -> &'static str {
        "AdaBoost"
    }
}
