//! snowcast-forecast: snow-accumulation forecasting from daily weather data.
//!
//! This crate loads a weather observation CSV into per-day feature vectors,
//! selects a binary classifier by cross-validated model selection over a
//! fixed catalog (linear SVM, boosting and tree ensembles), fits the winner
//! on the full dataset, and answers single-sample predictions either from
//! raw feature values or by timestamp lookup.
//!
//! The design favors small, testable modules: model wrappers live next to
//! each other behind one trait, and the forecasting object owns both the
//! cached dataset and the trained model.
pub mod config;
pub mod error;
pub mod forecaster;
pub mod io;
pub mod models;
pub mod report;
pub mod selection;
