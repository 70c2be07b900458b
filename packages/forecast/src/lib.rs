#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Monthly aggregation and walk-forward backtesting of demand forecasts.
//!
//! The engine validates a pluggable ensemble forecaster against history it
//! has never seen: for each held-out month the forecaster is trained on
//! everything strictly before it, and the resulting per-month error metrics
//! are rolled up into a cross-model accuracy comparison for the dashboard.

pub mod aggregate;
pub mod backtest;

use custodia_forecast_models::{EnsembleForecast, SensitivityMode};

/// Errors that can occur while producing a forecast.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    /// The forecaster was given fewer observations than it needs.
    #[error("insufficient history: {required} observations required, got {actual}")]
    InsufficientHistory {
        /// Minimum number of observations the forecaster needs.
        required: usize,
        /// Number of observations it was given.
        actual: usize,
    },

    /// The forecaster failed for a reason of its own.
    #[error("predictor error: {message}")]
    Predictor {
        /// Description of what went wrong.
        message: String,
    },
}

/// Trait every ensemble forecaster must implement.
///
/// The backtest engine treats implementations as black boxes: numeric
/// history in, a point forecast with a confidence and per-sub-model
/// breakdown out. Any error propagates out of the backtest run unchanged.
pub trait EnsemblePredictor: Send + Sync {
    /// Forecasts one step beyond `history`.
    ///
    /// `history` is ordered oldest-first and `current_value` is its most
    /// recent entry (callers may pass a fresher figure than the last closed
    /// month when one exists).
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError`] if the history is too short for the
    /// requested sensitivity or the forecaster fails internally.
    fn predict(
        &self,
        history: &[f64],
        current_value: f64,
        sensitivity: SensitivityMode,
    ) -> Result<EnsembleForecast, ForecastError>;
}
