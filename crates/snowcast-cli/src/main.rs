use anyhow::Result;
use clap::{Arg, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use snowcast_forecast::config::{ClassifierKind, ModelConfig, SelectionConfig};
use snowcast_forecast::forecaster::SnowForecaster;
use snowcast_forecast::report::{describe_features, judge, verdict};

/// Timestamps judged against the recorded outcomes by the demonstration run.
const DEMO_TIMESTAMPS: [&str; 4] = [
    "2006/2/19 00:00:00",
    "2012/2/2 00:00:00",
    "2014/2/2 13:00:00",
    "2015/2/28 00:00:00",
];

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("SNOWCAST_LOG", "error,snowcast=info"))
        .init();

    let matches = Command::new("snowcast")
        .version(clap::crate_version!())
        .about("\u{2744} snowcast - Snow-accumulation forecasting from daily weather observations")
        .arg(
            Arg::new("data")
                .help("Path to the weather observation CSV")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .default_value("sample_data/data.csv"),
        )
        .arg(
            Arg::new("model_type")
                .long("model-type")
                .help("Skip model selection and train this classifier kind.")
                .value_parser([
                    "linear_svm",
                    "adaboost",
                    "extra_trees",
                    "gradient_boosting",
                    "random_forest",
                ]),
        )
        .arg(
            Arg::new("folds")
                .long("folds")
                .help("Number of cross-validation folds used during selection.")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for the resampling-based classifiers.")
                .value_parser(clap::value_parser!(u64)),
        )
        .get_matches();

    let data_path: &PathBuf = matches.get_one("data").expect("data has a default value");

    let mut selection = SelectionConfig::default();
    if let Some(&folds) = matches.get_one::<usize>("folds") {
        selection.folds = folds;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        selection.seed = seed;
    }

    let mut forecaster = SnowForecaster::with_config(data_path, selection);

    if let Some(name) = matches.get_one::<String>("model_type") {
        let kind = ClassifierKind::from_str(name).map_err(anyhow::Error::msg)?;
        let model_config = ModelConfig::new(selection.learning_rate, selection.seed, kind);
        log::info!(
            "Model selection bypassed; training:\n{}",
            serde_json::to_string_pretty(&model_config)?
        );
        forecaster.train_with(model_config)?;
        println!("------");
        println!("Using model: {}", kind.name());
    } else {
        let report = forecaster.train()?;
        for candidate in &report.candidates {
            println!("{} score: {}", candidate.name, candidate.mean_accuracy);
        }
        println!("------");
        println!("Using model: {}", report.selected);
    }

    // Judge dates whose outcome the dataset already knows.
    for timestamp in DEMO_TIMESTAMPS {
        judge(&forecaster, timestamp)?;
    }

    // Ad-hoc predictions with hand-supplied feature values: a 0 degree day
    // with snow on the ground, after a mild and then a freezing previous day.
    let (temperature, precipitation, prev_accumulation) = (0.0, 0.0, 2.0);
    for prev_temperature in [3.0, -3.0] {
        println!("------");
        let result =
            forecaster.predict(temperature, precipitation, prev_temperature, prev_accumulation)?;
        println!(
            "{}",
            describe_features(temperature, precipitation, prev_temperature, prev_accumulation)
        );
        println!("result: {}", result);
        println!("{}", verdict(result));
    }
    println!("------");

    Ok(())
}
