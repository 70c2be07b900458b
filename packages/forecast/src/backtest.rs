//! Walk-forward validation of an ensemble forecaster.
//!
//! Each of the most recent `months_to_test` months is held out in turn and
//! predicted from an expanding window of everything strictly before it, so
//! no fold ever sees data from its own month or later.

use custodia_forecast_models::{
    BacktestResult, BacktestRun, BacktestSummary, ModelScore, MonthlyObservation, SensitivityMode,
};

use crate::{EnsemblePredictor, ForecastError};

/// Minimum number of training months required before the first fold.
pub const MIN_TRAINING_MONTHS: usize = 6;

/// Model name the blended headline prediction is scored under.
pub const ENSEMBLE_MODEL: &str = "ensemble";

/// Absolute percentage error of a prediction, in percent.
///
/// Defined as 0 when the actual value is 0, so months with no activity
/// cannot inject `NaN` or `Infinity` into downstream averages.
#[must_use]
pub fn absolute_percentage_error(predicted: f64, actual: f64) -> f64 {
    if actual == 0.0 {
        0.0
    } else {
        ((predicted - actual) / actual).abs() * 100.0
    }
}

/// APE observations collected for one named model across all folds.
struct ModelApes {
    name: String,
    apes: Vec<f64>,
}

/// Runs walk-forward validation of `predictor` over `observations`.
///
/// The final `months_to_test` observations are each held out in turn; the
/// predictor is trained on every month strictly before the held-out one.
/// If the series is shorter than `months_to_test + MIN_TRAINING_MONTHS`
/// (or `months_to_test` is 0) the run cannot start and the empty default
/// [`BacktestRun`] is returned — an expected boundary condition, not an
/// error. Folds whose train window is still too short are counted in
/// `skipped_folds` rather than silently dropped.
///
/// # Errors
///
/// Returns [`ForecastError`] only when the predictor itself fails; the
/// whole run aborts on the first failing fold.
#[allow(clippy::cast_precision_loss)]
pub fn run_backtest(
    observations: &[MonthlyObservation],
    months_to_test: usize,
    predictor: &dyn EnsemblePredictor,
) -> Result<BacktestRun, ForecastError> {
    if months_to_test == 0 || observations.len() < months_to_test + MIN_TRAINING_MONTHS {
        log::debug!(
            "Backtest needs {} months for {months_to_test} folds, have {}; returning empty run",
            months_to_test + MIN_TRAINING_MONTHS,
            observations.len()
        );
        return Ok(BacktestRun::default());
    }

    log::debug!(
        "Backtesting {months_to_test} folds over {} months of history",
        observations.len()
    );

    let mut results: Vec<BacktestResult> = Vec::with_capacity(months_to_test);
    let mut model_apes: Vec<ModelApes> = Vec::new();
    let mut skipped_folds = 0;

    for i in 0..months_to_test {
        let test_index = observations.len() - months_to_test + i;
        let train = &observations[..test_index];

        if train.len() < MIN_TRAINING_MONTHS {
            log::warn!(
                "Skipping fold for {}: only {} training months",
                observations[test_index].month,
                train.len()
            );
            skipped_folds += 1;
            continue;
        }

        let history: Vec<f64> = train.iter().map(|o| o.services as f64).collect();
        let current_value = history.last().copied().unwrap_or(0.0);

        let forecast = predictor.predict(&history, current_value, SensitivityMode::Medium)?;

        let predicted_services = round_services(forecast.prediction);
        let train_services: u64 = train.iter().map(|o| o.services).sum();
        let train_gmv: f64 = train.iter().map(|o| o.gmv).sum();
        let gmv_per_service = if train_services == 0 {
            0.0
        } else {
            train_gmv / train_services as f64
        };
        let predicted_gmv = predicted_services as f64 * gmv_per_service;

        let actual = &observations[test_index];
        let actual_services = actual.services as f64;
        let services_error = predicted_services as f64 - actual_services;
        let gmv_error = predicted_gmv - actual.gmv;
        let services_ape = absolute_percentage_error(predicted_services as f64, actual_services);
        let gmv_ape = absolute_percentage_error(predicted_gmv, actual.gmv);

        record_ape(&mut model_apes, ENSEMBLE_MODEL, services_ape);
        for individual in &forecast.individual_models {
            let ape = absolute_percentage_error(individual.value, actual_services);
            record_ape(&mut model_apes, &individual.name, ape);
        }

        results.push(BacktestResult {
            month: actual.month.clone(),
            actual_services: actual.services,
            actual_gmv: actual.gmv,
            predicted_services,
            predicted_gmv,
            services_error,
            gmv_error,
            services_ape,
            gmv_ape,
            confidence: forecast.confidence,
            model: ENSEMBLE_MODEL.to_string(),
        });
    }

    if skipped_folds > 0 {
        log::warn!("{skipped_folds} of {months_to_test} requested folds were skipped");
    }

    let summary = summarize(&results, &model_apes);

    Ok(BacktestRun {
        results,
        summary,
        skipped_folds,
    })
}

/// Rounds a raw ensemble prediction to a whole, non-negative service count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_services(prediction: f64) -> u64 {
    prediction.round().max(0.0) as u64
}

fn record_ape(model_apes: &mut Vec<ModelApes>, name: &str, ape: f64) {
    if let Some(existing) = model_apes.iter_mut().find(|m| m.name == name) {
        existing.apes.push(ape);
    } else {
        model_apes.push(ModelApes {
            name: name.to_string(),
            apes: vec![ape],
        });
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let count = values.len() as f64;
        values.iter().sum::<f64>() / count
    }
}

fn summarize(results: &[BacktestResult], model_apes: &[ModelApes]) -> BacktestSummary {
    if results.is_empty() {
        return BacktestSummary::default();
    }

    let services_errors: Vec<f64> = results.iter().map(|r| r.services_error).collect();
    let gmv_errors: Vec<f64> = results.iter().map(|r| r.gmv_error).collect();
    let services_abs: Vec<f64> = results.iter().map(|r| r.services_error.abs()).collect();
    let gmv_abs: Vec<f64> = results.iter().map(|r| r.gmv_error.abs()).collect();
    let services_apes: Vec<f64> = results.iter().map(|r| r.services_ape).collect();
    let gmv_apes: Vec<f64> = results.iter().map(|r| r.gmv_ape).collect();

    let services_mape = mean(&services_apes);

    let best_month = results
        .iter()
        .min_by(|a, b| a.services_ape.total_cmp(&b.services_ape))
        .map(|r| r.month.clone());
    let worst_month = results
        .iter()
        .max_by(|a, b| a.services_ape.total_cmp(&b.services_ape))
        .map(|r| r.month.clone());

    let mut model_comparison: Vec<ModelScore> = model_apes
        .iter()
        .map(|m| {
            let mape = mean(&m.apes);
            ModelScore {
                name: m.name.clone(),
                mape,
                accuracy: 100.0 - mape,
            }
        })
        .collect();
    model_comparison.sort_by(|a, b| a.mape.total_cmp(&b.mape));

    let best_model = model_comparison
        .first()
        .map_or_else(|| "N/A".to_string(), |m| m.name.clone());

    BacktestSummary {
        total_months: results.len(),
        services_mean_error: mean(&services_errors),
        gmv_mean_error: mean(&gmv_errors),
        services_mae: mean(&services_abs),
        gmv_mae: mean(&gmv_abs),
        services_mape,
        gmv_mape: mean(&gmv_apes),
        accuracy: 100.0 - services_mape,
        best_month,
        worst_month,
        best_model,
        model_comparison,
    }
}
