//! Bagged and randomized tree ensembles over linfa-trees base learners.
//!
//! Both wrappers vote with a forest of CART trees; they differ in where the
//! randomness comes from. The random forest bootstraps rows and keeps every
//! feature, the extra-trees variant keeps every row and randomizes the
//! feature subset each tree sees.
use anyhow::{anyhow, Context, Result};
use linfa::prelude::*;
use linfa::Dataset;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::{ClassifierKind, ModelConfig};
use crate::models::classifier_trait::SnowClassifier;

/// One fitted ensemble member: the feature columns it sees and its tree.
struct EnsembleTree {
    columns: Vec<usize>,
    tree: DecisionTree<f64, usize>,
}

fn fit_tree(
    x: &Array2<f64>,
    y: &[i32],
    rows: &[usize],
    columns: &[usize],
    max_depth: Option<usize>,
) -> Result<DecisionTree<f64, usize>> {
    let records = x.select(Axis(0), rows).select(Axis(1), columns);
    let targets = rows
        .iter()
        .map(|&row| y[row] as usize)
        .collect::<Array1<usize>>();
    let dataset = Dataset::new(records, targets);
    DecisionTree::params()
        .max_depth(max_depth)
        .fit(&dataset)
        .context("Failed to fit decision tree")
}

fn majority_vote(trees: &[EnsembleTree], x: &Array2<f64>) -> Vec<i32> {
    let mut positive_votes = vec![0usize; x.nrows()];
    for member in trees {
        let projected = x.select(Axis(1), &member.columns);
        let predictions = member.tree.predict(&projected);
        for (votes, &label) in positive_votes.iter_mut().zip(predictions.iter()) {
            if label == 1 {
                *votes += 1;
            }
        }
    }
    positive_votes
        .iter()
        .map(|&votes| i32::from(votes * 2 > trees.len()))
        .collect()
}

/// Random forest: bootstrap-sampled rows, full feature set, majority vote.
pub struct RandomForestClassifier {
    trees: Vec<EnsembleTree>,
    config: ModelConfig,
}

impl RandomForestClassifier {
    pub fn new(config: ModelConfig) -> Self {
        RandomForestClassifier {
            trees: Vec::new(),
            config,
        }
    }
}

impl SnowClassifier for RandomForestClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        let ClassifierKind::RandomForest { n_trees, max_depth } = self.config.kind else {
            return Err(anyhow!(
                "Expected RandomForest parameters, got {:?}",
                self.config.kind
            ));
        };

        let n_samples = x.nrows();
        if n_samples == 0 {
            return Err(anyhow!("Cannot fit a random forest on an empty dataset"));
        }

        let all_columns: Vec<usize> = (0..x.ncols()).collect();
        let seed = self.config.seed;

        let trees = (0..n_trees)
            .into_par_iter()
            .map(|tree_idx| -> Result<EnsembleTree> {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(tree_idx as u64));
                let rows = (0..n_samples)
                    .map(|_| rng.gen_range(0..n_samples))
                    .collect::<Vec<usize>>();
                let tree = fit_tree(x, y, &rows, &all_columns, max_depth)?;
                Ok(EnsembleTree {
                    columns: all_columns.clone(),
                    tree,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        self.trees = trees;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        if self.trees.is_empty() {
            return Err(anyhow!("Random forest predict called before fit"));
        }
        Ok(majority_vote(&self.trees, x))
    }

    fn name(&self) -> &'static str {
        "RandomForest"
    }
}

/// Extremely randomized trees: full rows, random feature subset per tree.
pub struct ExtraTreesClassifier {
    trees: Vec<EnsembleTree>,
    config: ModelConfig,
}

impl ExtraTreesClassifier {
    pub fn new(config: ModelConfig) -> Self {
        ExtraTreesClassifier {
            trees: Vec::new(),
            config,
        }
    }
}

impl SnowClassifier for ExtraTreesClassifier {
    fn fit(&mut self, x: &Array2<f64>, y: &[i32]) -> Result<()> {
        let ClassifierKind::ExtraTrees {
            n_trees,
            max_features,
        } = self.config.kind
        else {
            return Err(anyhow!(
                "Expected ExtraTrees parameters, got {:?}",
                self.config.kind
            ));
        };

        let n_samples = x.nrows();
        if n_samples == 0 {
            return Err(anyhow!("Cannot fit extra trees on an empty dataset"));
        }

        let n_features = x.ncols();
        let subset_size = max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize)
            .clamp(1, n_features);
        let all_rows: Vec<usize> = (0..n_samples).collect();
        let seed = self.config.seed;

        let trees = (0..n_trees)
            .into_par_iter()
            .map(|tree_idx| -> Result<EnsembleTree> {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(tree_idx as u64));
                let mut columns =
                    rand::seq::index::sample(&mut rng, n_features, subset_size).into_vec();
                columns.sort_unstable();
                let tree = fit_tree(x, y, &all_rows, &columns, None)?;
                Ok(EnsembleTree { columns, tree })
            })
            .collect::<Result<Vec<_>>>()?;

        self.trees = trees;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        if self.trees.is_empty() {
            return Err(anyhow!("Extra trees predict called before fit"));
        }
        Ok(majority_vote(&self.trees, x))
    }

    fn name(&self) -> &'static str {
        "ExtraTrees"
    }
}
