#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Forecast backtest result types.
//!
//! These types are the wire contract between the backtest engine and the
//! operations dashboard: per-month demand observations going in, per-fold
//! error metrics and the cross-model accuracy summary coming out.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One calendar month of aggregated service activity.
///
/// Built by aggregating completed service records by month; a backtest run
/// treats the sequence as immutable and ordered ascending by month key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyObservation {
    /// Month key in `YYYY-MM` form (e.g. "2025-07").
    pub month: String,
    /// Number of completed services in the month.
    pub services: u64,
    /// Gross merchandise value moved in the month.
    pub gmv: f64,
}

/// How aggressively the forecaster reacts to recent movement.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SensitivityMode {
    /// Wide windows, heavy smoothing.
    Low,
    /// Balanced default used by the backtest.
    Medium,
    /// Short windows, reacts fast to the latest months.
    High,
}

/// Raw forecast from one named sub-model of the ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualForecast {
    /// Sub-model name (e.g. "moving_average").
    pub name: String,
    /// The sub-model's one-step-ahead forecast.
    pub value: f64,
}

/// Combined output of an ensemble forecaster for one prediction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsembleForecast {
    /// Blended point forecast.
    pub prediction: f64,
    /// Forecaster's self-reported confidence in `[0, 1]`.
    pub confidence: f64,
    /// Per-sub-model raw forecasts, scored individually by the backtest.
    pub individual_models: Vec<IndividualForecast>,
}

/// Error metrics for a single held-out month of a walk-forward run.
///
/// Created once per fold and never mutated. Signed errors are
/// `predicted - actual`; absolute percentage errors are defined as 0 when
/// the actual value is 0 so averages stay finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestResult {
    /// Held-out month key (`YYYY-MM`).
    pub month: String,
    /// Observed service count.
    pub actual_services: u64,
    /// Observed GMV.
    pub actual_gmv: f64,
    /// Predicted service count, rounded to a whole service.
    pub predicted_services: u64,
    /// Predicted GMV derived from the train window's revenue per service.
    pub predicted_gmv: f64,
    /// Signed service-count error.
    pub services_error: f64,
    /// Signed GMV error.
    pub gmv_error: f64,
    /// Absolute percentage error on services.
    pub services_ape: f64,
    /// Absolute percentage error on GMV.
    pub gmv_ape: f64,
    /// Confidence the ensemble reported for this fold.
    pub confidence: f64,
    /// Name of the model the headline prediction came from.
    pub model: String,
}

/// Mean absolute percentage error and derived accuracy for one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelScore {
    /// Model name ("ensemble" or a sub-model name).
    pub name: String,
    /// Mean absolute percentage error across all folds.
    pub mape: f64,
    /// `100 - mape`, by construction.
    pub accuracy: f64,
}

/// Aggregate accuracy metrics over every executed fold of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestSummary {
    /// Number of folds that actually executed.
    pub total_months: usize,
    /// Mean signed service-count error.
    pub services_mean_error: f64,
    /// Mean signed GMV error.
    pub gmv_mean_error: f64,
    /// Mean absolute service-count error.
    pub services_mae: f64,
    /// Mean absolute GMV error.
    pub gmv_mae: f64,
    /// Mean absolute percentage error on services.
    pub services_mape: f64,
    /// Mean absolute percentage error on GMV.
    pub gmv_mape: f64,
    /// `100 - services_mape`, by construction.
    pub accuracy: f64,
    /// Month with the lowest services APE.
    pub best_month: Option<String>,
    /// Month with the highest services APE.
    pub worst_month: Option<String>,
    /// Name of the top entry of `model_comparison`, `"N/A"` when empty.
    pub best_model: String,
    /// Every scored model, sorted ascending by MAPE.
    pub model_comparison: Vec<ModelScore>,
}

impl Default for BacktestSummary {
    fn default() -> Self {
        Self {
            total_months: 0,
            services_mean_error: 0.0,
            gmv_mean_error: 0.0,
            services_mae: 0.0,
            gmv_mae: 0.0,
            services_mape: 0.0,
            gmv_mape: 0.0,
            accuracy: 0.0,
            best_month: None,
            worst_month: None,
            best_model: "N/A".to_string(),
            model_comparison: Vec::new(),
        }
    }
}

/// Complete output of one walk-forward backtest run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestRun {
    /// Per-fold results in increasing month order.
    pub results: Vec<BacktestResult>,
    /// Aggregate metrics over the executed folds.
    pub summary: BacktestSummary,
    /// Requested folds that did not run for lack of training history.
    pub skipped_folds: usize,
}
