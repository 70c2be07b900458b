#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Default ensemble forecaster for monthly service volumes.
//!
//! Blends five simple statistical sub-models into one point forecast and
//! derives a confidence figure from how much the sub-models disagree. The
//! sensitivity mode trades smoothing for reactivity by narrowing the
//! trailing windows and raising the smoothing factor.

use custodia_forecast::{EnsemblePredictor, ForecastError};
use custodia_forecast_models::{EnsembleForecast, IndividualForecast, SensitivityMode};

/// Persistence sub-model: repeats the current value.
pub const MODEL_NAIVE: &str = "naive";
/// Unweighted trailing-window mean.
pub const MODEL_MOVING_AVERAGE: &str = "moving_average";
/// Linearly weighted trailing mean, newest month heaviest.
pub const MODEL_WEIGHTED_RECENT: &str = "weighted_recent";
/// Least-squares line over the full history, extrapolated one step.
pub const MODEL_LINEAR_TREND: &str = "linear_trend";
/// Simple exponential smoothing over the full history.
pub const MODEL_EXPONENTIAL_SMOOTHING: &str = "exponential_smoothing";

/// Stateless ensemble forecaster; every call is independent.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnsembleForecaster;

impl EnsembleForecaster {
    /// Trailing-window length for the given sensitivity.
    #[must_use]
    pub const fn window(sensitivity: SensitivityMode) -> usize {
        match sensitivity {
            SensitivityMode::Low => 9,
            SensitivityMode::Medium => 6,
            SensitivityMode::High => 3,
        }
    }

    /// Exponential smoothing factor for the given sensitivity.
    #[must_use]
    pub const fn alpha(sensitivity: SensitivityMode) -> f64 {
        match sensitivity {
            SensitivityMode::Low => 0.1,
            SensitivityMode::Medium => 0.3,
            SensitivityMode::High => 0.5,
        }
    }
}

impl EnsemblePredictor for EnsembleForecaster {
    fn predict(
        &self,
        history: &[f64],
        current_value: f64,
        sensitivity: SensitivityMode,
    ) -> Result<EnsembleForecast, ForecastError> {
        let window = Self::window(sensitivity);
        if history.len() < window {
            return Err(ForecastError::InsufficientHistory {
                required: window,
                actual: history.len(),
            });
        }

        let naive = current_value;
        let ma = moving_average(history, window);
        let weighted = weighted_recent(history, window);
        let trend = linear_trend(history);
        let smoothed = exponential_smoothing(history, Self::alpha(sensitivity));

        let blended = 0.10 * naive + 0.15 * ma + 0.25 * weighted + 0.20 * trend + 0.30 * smoothed;
        let prediction = blended.max(0.0);

        let individual_models = vec![
            IndividualForecast {
                name: MODEL_NAIVE.to_string(),
                value: naive,
            },
            IndividualForecast {
                name: MODEL_MOVING_AVERAGE.to_string(),
                value: ma,
            },
            IndividualForecast {
                name: MODEL_WEIGHTED_RECENT.to_string(),
                value: weighted,
            },
            IndividualForecast {
                name: MODEL_LINEAR_TREND.to_string(),
                value: trend,
            },
            IndividualForecast {
                name: MODEL_EXPONENTIAL_SMOOTHING.to_string(),
                value: smoothed,
            },
        ];

        let confidence = dispersion_confidence(prediction, &individual_models);

        log::debug!(
            "Ensemble forecast {prediction:.2} (confidence {confidence:.2}) from {} months at {sensitivity} sensitivity",
            history.len()
        );

        Ok(EnsembleForecast {
            prediction,
            confidence,
            individual_models,
        })
    }
}

/// Mean of the trailing `window` values.
#[allow(clippy::cast_precision_loss)]
fn moving_average(history: &[f64], window: usize) -> f64 {
    let tail = &history[history.len() - window..];
    tail.iter().sum::<f64>() / window as f64
}

/// Linearly weighted mean of the trailing `window` values; the newest value
/// carries weight `window`, the oldest weight 1.
#[allow(clippy::cast_precision_loss)]
fn weighted_recent(history: &[f64], window: usize) -> f64 {
    let tail = &history[history.len() - window..];
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (i, value) in tail.iter().enumerate() {
        let weight = (i + 1) as f64;
        weighted_sum += weight * value;
        weight_total += weight;
    }
    weighted_sum / weight_total
}

/// Least-squares line over the whole history, evaluated one step past the
/// final observation.
#[allow(clippy::cast_precision_loss)]
fn linear_trend(history: &[f64]) -> f64 {
    let n = history.len() as f64;
    let sum_x: f64 = (0..history.len()).map(|i| i as f64).sum();
    let sum_y: f64 = history.iter().sum();
    let sum_xy: f64 = history
        .iter()
        .enumerate()
        .map(|(i, y)| i as f64 * y)
        .sum();
    let sum_xx: f64 = (0..history.len()).map(|i| (i as f64).powi(2)).sum();

    let denominator = n * sum_xx - sum_x.powi(2);
    if denominator == 0.0 {
        return history.last().copied().unwrap_or(0.0);
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    slope * n + intercept
}

/// Simple exponential smoothing seeded with the oldest value.
fn exponential_smoothing(history: &[f64], alpha: f64) -> f64 {
    let mut smoothed = history.first().copied().unwrap_or(0.0);
    for value in &history[1..] {
        smoothed = alpha * value + (1.0 - alpha) * smoothed;
    }
    smoothed
}

/// Confidence from sub-model dispersion: tight agreement scores high, wide
/// disagreement low. Neutral 0.5 when the forecast itself is zero.
#[allow(clippy::cast_precision_loss)]
fn dispersion_confidence(prediction: f64, individual_models: &[IndividualForecast]) -> f64 {
    if prediction == 0.0 {
        return 0.5;
    }

    let n = individual_models.len() as f64;
    let mean = individual_models.iter().map(|m| m.value).sum::<f64>() / n;
    let variance = individual_models
        .iter()
        .map(|m| (m.value - mean).powi(2))
        .sum::<f64>()
        / n;
    let std_dev = variance.sqrt();

    (1.0 - std_dev / prediction).clamp(0.05, 0.95)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predict(history: &[f64], sensitivity: SensitivityMode) -> EnsembleForecast {
        let current = history.last().copied().unwrap_or(0.0);
        EnsembleForecaster
            .predict(history, current, sensitivity)
            .unwrap()
    }

    #[test]
    fn constant_series_forecasts_the_constant() {
        let history = vec![100.0; 12];
        let forecast = predict(&history, SensitivityMode::Medium);

        assert!((forecast.prediction - 100.0).abs() < 1e-9);
        for model in &forecast.individual_models {
            assert!(
                (model.value - 100.0).abs() < 1e-9,
                "{} should forecast 100, got {}",
                model.name,
                model.value
            );
        }
        // Perfect agreement pegs confidence at the ceiling.
        assert!((forecast.confidence - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn reports_all_five_sub_models() {
        let history = vec![10.0, 12.0, 11.0, 13.0, 15.0, 14.0];
        let forecast = predict(&history, SensitivityMode::Medium);

        let names: Vec<&str> = forecast
            .individual_models
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                MODEL_NAIVE,
                MODEL_MOVING_AVERAGE,
                MODEL_WEIGHTED_RECENT,
                MODEL_LINEAR_TREND,
                MODEL_EXPONENTIAL_SMOOTHING,
            ]
        );
    }

    #[test]
    fn short_history_is_rejected() {
        let history = vec![10.0, 20.0];
        let result = EnsembleForecaster.predict(&history, 20.0, SensitivityMode::Medium);

        assert!(matches!(
            result,
            Err(ForecastError::InsufficientHistory {
                required: 6,
                actual: 2
            })
        ));
    }

    #[test]
    fn low_sensitivity_needs_a_longer_history() {
        let history = vec![10.0; 6];
        let result = EnsembleForecaster.predict(&history, 10.0, SensitivityMode::Low);

        assert!(matches!(
            result,
            Err(ForecastError::InsufficientHistory { required: 9, .. })
        ));
    }

    #[test]
    fn forecasts_are_deterministic() {
        let history: Vec<f64> = (1..=12).map(|i| f64::from(i) * 7.5).collect();
        let first = predict(&history, SensitivityMode::Medium);
        let second = predict(&history, SensitivityMode::Medium);
        assert_eq!(first, second);
    }

    #[test]
    fn high_sensitivity_tracks_a_rising_series_more_closely() {
        let history: Vec<f64> = (1..=12).map(|i| f64::from(i) * 10.0).collect();

        let reactive = predict(&history, SensitivityMode::High);
        let smooth = predict(&history, SensitivityMode::Low);

        assert!(
            reactive.prediction > smooth.prediction,
            "high sensitivity ({}) should sit above low ({}) on a rising series",
            reactive.prediction,
            smooth.prediction
        );
    }

    #[test]
    fn linear_trend_extrapolates_a_perfect_line() {
        let history: Vec<f64> = (0..10).map(|i| f64::from(i).mul_add(5.0, 20.0)).collect();
        let forecast = predict(&history, SensitivityMode::Medium);

        let trend = forecast
            .individual_models
            .iter()
            .find(|m| m.name == MODEL_LINEAR_TREND)
            .unwrap();
        assert!(
            (trend.value - 70.0).abs() < 1e-9,
            "next point of 20 + 5i at i=10 is 70, got {}",
            trend.value
        );
    }

    #[test]
    fn all_zero_history_predicts_zero_with_neutral_confidence() {
        let history = vec![0.0; 12];
        let forecast = predict(&history, SensitivityMode::Medium);

        assert!(forecast.prediction.abs() < f64::EPSILON);
        assert!((forecast.confidence - 0.5).abs() < f64::EPSILON);
    }
}
