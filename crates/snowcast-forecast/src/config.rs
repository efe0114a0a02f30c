use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for a single classifier instance.
#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct ModelConfig {
    pub learning_rate: f32,
    pub seed: u64,

    #[serde(flatten)]
    pub kind: ClassifierKind,
}

/// Supported classifier kinds and their hyper-parameters.
///
/// The enum is closed on purpose: model selection iterates a fixed catalog
/// and the factory maps each variant to a concrete wrapper, so no classifier
/// is ever constructed from an arbitrary name.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub enum ClassifierKind {
    LinearSvm {
        eps: f64,
        c: (f64, f64),
    },
    AdaBoost {
        n_rounds: usize,
        learner_depth: usize,
    },
    ExtraTrees {
        n_trees: usize,
        max_features: Option<usize>,
    },
    GradientBoosting {
        max_depth: u32,
        num_boost_round: usize,
    },
    RandomForest {
        n_trees: usize,
        max_depth: Option<usize>,
    },
}

impl ClassifierKind {
    pub fn linear_svm() -> Self {
        ClassifierKind::LinearSvm {
            eps: 0.01,
            c: (1.0, 1.0),
        }
    }

    pub fn ada_boost() -> Self {
        ClassifierKind::AdaBoost {
            n_rounds: 25,
            learner_depth: 2,
        }
    }

    pub fn extra_trees() -> Self {
        ClassifierKind::ExtraTrees {
            n_trees: 50,
            max_features: None,
        }
    }

    pub fn gradient_boosting() -> Self {
        ClassifierKind::GradientBoosting {
            max_depth: 4,
            num_boost_round: 50,
        }
    }

    pub fn random_forest() -> Self {
        ClassifierKind::RandomForest {
            n_trees: 50,
            max_depth: None,
        }
    }

    /// The fixed catalog evaluated during model selection, in order.
    pub fn catalog() -> Vec<ClassifierKind> {
        vec![
            ClassifierKind::linear_svm(),
            ClassifierKind::ada_boost(),
            ClassifierKind::extra_trees(),
            ClassifierKind::gradient_boosting(),
            ClassifierKind::random_forest(),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClassifierKind::LinearSvm { .. } => "LinearSvm",
            ClassifierKind::AdaBoost { .. } => "AdaBoost",
            ClassifierKind::ExtraTrees { .. } => "ExtraTrees",
            ClassifierKind::GradientBoosting { .. } => "GradientBoosting",
            ClassifierKind::RandomForest { .. } => "RandomForest",
        }
    }
}

impl Default for ClassifierKind {
    fn default() -> Self {
        ClassifierKind::gradient_boosting()
    }
}

impl FromStr for ClassifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear_svm" | "linearsvm" | "svm" => Ok(ClassifierKind::linear_svm()),
            "adaboost" | "ada_boost" => Ok(ClassifierKind::ada_boost()),
            "extra_trees" | "extratrees" => Ok(ClassifierKind::extra_trees()),
            "gradient_boosting" | "gradientboosting" | "gbdt" => {
                Ok(ClassifierKind::gradient_boosting())
            }
            "random_forest" | "randomforest" => Ok(ClassifierKind::random_forest()),
            _ => Err(format!(
                "Unknown classifier kind: {}. Valid options are: linear_svm, adaboost, \
                 extra_trees, gradient_boosting, random_forest",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f32, seed: u64, kind: ClassifierKind) -> Self {
        Self {
            learning_rate,
            seed,
            kind,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            seed: 42,
            kind: ClassifierKind::default(),
        }
    }
}

/// Settings driving cross-validated model selection.
#[derive(Deserialize, Serialize, Debug, Clone, Copy)]
pub struct SelectionConfig {
    /// Number of cross-validation folds.
    pub folds: usize,
    /// Learning rate handed to the boosting classifiers.
    pub learning_rate: f32,
    /// Seed for the resampling-based classifiers.
    pub seed: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            folds: 5,
            learning_rate: 0.1,
            seed: 42,
        }
    }
}
