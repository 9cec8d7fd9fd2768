use serde::{Deserialize, Serialize};

use crate::config::TrendConfig;
use crate::drift::detect_drift;
use crate::forecast::{forecast, Forecast};
use crate::smoothing::smooth;

/// Everything a caller needs to describe a subject's recent trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub observations: usize,
    /// `None` when there is no history at all.
    pub smoothed: Option<f64>,
    pub forecast: Forecast,
    pub drift: bool,
}

/// Run smoothing, forecasting and drift detection over one history.
pub fn analyze(series: &[f64], config: &TrendConfig) -> TrendReport {
    let report = TrendReport {
        observations: series.len(),
        smoothed: smooth(series, config.alpha),
        forecast: forecast(series, config.horizon),
        drift: detect_drift(series, config.drift.tolerance, config.drift.threshold),
    };
    log::debug!(
        "analyze: n={} smoothed={:?} drift={} next={:?}",
        report.observations,
        report.smoothed,
        report.drift,
        report.forecast.predictions.first()
    );
    report
}
