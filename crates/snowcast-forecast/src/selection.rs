//! Cross-validated model selection over the classifier catalog.
use anyhow::{anyhow, Context, Result};
use ndarray::{Array2, Axis};

use crate::config::{ClassifierKind, ModelConfig, SelectionConfig};
use crate::models::factory::build_model;

/// Cross-validation outcome for one catalog entry.
#[derive(Debug, Clone)]
pub struct CandidateScore {
    pub name: &'static str,
    pub mean_accuracy: f64,
    pub fold_accuracies: Vec<f64>,
}

/// Scores for every candidate, in catalog order, plus the selected kind.
#[derive(Debug, Clone)]
pub struct SelectionReport {
    pub candidates: Vec<CandidateScore>,
    pub selected: &'static str,
}

/// Evaluate every catalog entry with k-fold cross-validation and return the
/// configuration of the best-scoring kind together with the full report.
///
/// Ties favor the later catalog entry because the comparison is `>=`.
pub fn select_classifier(
    x: &Array2<f64>,
    y: &[i32],
    config: &SelectionConfig,
) -> Result<(ModelConfig, SelectionReport)> {
    let folds = stratified_folds(y, config.folds)?;

    let mut best: Option<(ModelConfig, f64)> = None;
    let mut candidates = Vec::new();

    for kind in ClassifierKind::catalog() {
        let model_config = ModelConfig::new(config.learning_rate, config.seed, kind);
        let fold_accuracies = cross_validate(model_config, x, y, &folds)?;
        let mean_accuracy = fold_accuracies.iter().sum::<f64>() / fold_accuracies.len() as f64;
        log::info!(
            "{} cross-validation accuracy: {:.4}",
            kind.name(),
            mean_accuracy
        );
        candidates.push(CandidateScore {
            name: kind.name(),
            mean_accuracy,
            fold_accuracies,
        });

        if improves(mean_accuracy, best.as_ref().map(|&(_, score)| score)) {
            best = Some((model_config, mean_accuracy));
        }
    }

    let (selected, _) = best.ok_or_else(|| anyhow!("Classifier catalog is empty"))?;
    log::info!("Selected model: {}", selected.kind.name());

    let report = SelectionReport {
        candidates,
        selected: selected.kind.name(),
    };
    Ok((selected, report))
}

fn improves(candidate: f64, best: Option<f64>) -> bool {
    best.map_or(true, |score| candidate >= score)
}

fn cross_validate(
    config: ModelConfig,
    x: &Array2<f64>,
    y: &[i32],
    folds: &[Vec<usize>],
) -> Result<Vec<f64>> {
    let mut accuracies = Vec::with_capacity(folds.len());

    for (fold_idx, test_rows) in folds.iter().enumerate() {
        let train_rows: Vec<usize> = (0..y.len()).filter(|row| !test_rows.contains(row)).collect();

        let train_x = x.select(Axis(0), &train_rows);
        let train_y: Vec<i32> = train_rows.iter().map(|&row| y[row]).collect();
        let test_x = x.select(Axis(0), test_rows);
        let test_y: Vec<i32> = test_rows.iter().map(|&row| y[row]).collect();

        let mut model = build_model(config);
        model
            .fit(&train_x, &train_y)
            .with_context(|| format!("{} failed on fold {}", config.kind.name(), fold_idx))?;
        let predictions = model.predict(&test_x)?;

        let correct = predictions
            .iter()
            .zip(test_y.iter())
            .filter(|(predicted, truth)| predicted == truth)
            .count();
        let accuracy = correct as f64 / test_y.len() as f64;
        log::trace!(
            "{} fold {}: accuracy {:.4} ({} test samples)",
            config.kind.name(),
            fold_idx,
            accuracy,
            test_y.len()
        );
        accuracies.push(accuracy);
    }

    Ok(accuracies)
}

/// Deal each class's rows round-robin across `k` folds so every training
/// split keeps both classes represented whenever a class has at least two
/// samples. Fold membership is deterministic for a given label sequence.
pub fn stratified_folds(y: &[i32], k: usize) -> Result<Vec<Vec<usize>>> {
    if k == 0 {
        return Err(anyhow!("Fold count must be positive"));
    }
    if k > y.len() {
        return Err(anyhow!(
            "Cannot split {} samples into {} folds",
            y.len(),
            k
        ));
    }

    let mut folds: Vec<Vec<usize>> = vec![Vec::new(); k];
    for class in [0i32, 1i32] {
        let rows = y
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == class)
            .map(|(row, _)| row);
        for (slot, row) in rows.enumerate() {
            folds[slot % k].push(row);
        }
    }

    if folds.iter().any(|fold| fold.is_empty()) {
        return Err(anyhow!(
            "{} folds leave at least one fold empty for {} samples",
            k,
            y.len()
        ));
    }

    Ok(folds)
}
