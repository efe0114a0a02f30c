use crate::config::{ClassifierKind, ModelConfig};
use crate::models::classifier_trait::SnowClassifier;

/// Build a boxed classifier from a `ModelConfig`.
///
/// The kind enum is closed, so this match is the whole mapping: every
/// catalog entry has exactly one constructor and nothing is built by name.
pub fn build_model(config: ModelConfig) -> Box<dyn SnowClassifier> {
    match config.kind {
        ClassifierKind::LinearSvm { .. } => {
            Box::new(crate::models::svm::LinearSvmClassifier::new(config))
        }
        ClassifierKind::AdaBoost { .. } => {
            Box::new(crate::models::adaboost::AdaBoostClassifier::new(config))
        }
        ClassifierKind::ExtraTrees { .. } => {
            Box::new(crate::models::forest::ExtraTreesClassifier::new(config))
        }
        ClassifierKind::GradientBoosting { .. } => {
            Box::new(crate::models::gbdt::GradientBoostingClassifier::new(config))
        }
        ClassifierKind::RandomForest { .. } => {
            Box::new(crate::models::forest::RandomForestClassifier::new(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClassifierKind;

    #[test]
    fn factory_covers_the_whole_catalog() {
        for kind in ClassifierKind::catalog() {
            let config = ModelConfig {
                kind,
                ..ModelConfig::default()
            };
            let model = build_model(config);
            assert_eq!(model.name(), kind.name());
        }
    }
}
