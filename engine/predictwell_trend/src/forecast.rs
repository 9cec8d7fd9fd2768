//! Linear-trend forecasting with uncertainty bands.
//!
//! A history of at least [`MIN_TREND_POINTS`] scores is fitted with an
//! ordinary-least-squares line against the period index; the band width comes
//! from the fit's residual RMSE. Shorter histories fall back to a flat line at
//! the last observation with a fixed-width band. All outputs live in `[0, 1]`.

use serde::{Deserialize, Serialize};

/// Forecast horizon used when the caller has no preference.
pub const DEFAULT_HORIZON: usize = 4;

/// Histories shorter than this get the flat-line fallback.
pub const MIN_TREND_POINTS: usize = 3;

/// Half-width of the band around a flat-line forecast.
pub const SPARSE_BAND: f64 = 0.10;

/// RMSE assumed for a fit with no residual degrees of freedom.
pub const FALLBACK_RMSE: f64 = 0.10;

/// Multiplier applied to the RMSE for a roughly 90% band.
pub const BAND_Z: f64 = 1.64;

/// Point forecasts with lower and upper bounds, one entry per horizon step.
///
/// Bounds are clamped independently, so both may sit on the same boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub predictions: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

impl Forecast {
    fn with_capacity(horizon: usize) -> Self {
        Self {
            predictions: Vec::with_capacity(horizon),
            lower: Vec::with_capacity(horizon),
            upper: Vec::with_capacity(horizon),
        }
    }

    fn push(&mut self, point: f64, half_width: f64) {
        self.predictions.push(point);
        self.lower.push(clamp_unit(point - half_width));
        self.upper.push(clamp_unit(point + half_width));
    }

    /// Number of forecast steps.
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// `(prediction, lower, upper)` per step, in order.
    pub fn steps(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.predictions
            .iter()
            .zip(&self.lower)
            .zip(&self.upper)
            .map(|((&p, &lo), &hi)| (p, lo, hi))
    }
}

/// Ordinary-least-squares line fitted to a series against indices `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
    /// Root-mean-square of the fit residuals.
    pub rmse: f64,
}

impl TrendLine {
    /// Fit a line to `series`. Needs at least two points.
    ///
    /// A two-point fit is exact and has no residual information, so its RMSE
    /// is [`FALLBACK_RMSE`].
    pub fn fit(series: &[f64]) -> Option<Self> {
        let n = series.len();
        if n < 2 {
            return None;
        }
        let nf = n as f64;
        let x_mean = (nf - 1.0) / 2.0;
        let y_mean = series.iter().sum::<f64>() / nf;

        let (mut sxx, mut sxy) = (0.0, 0.0);
        for (i, &y) in series.iter().enumerate() {
            let dx = i as f64 - x_mean;
            sxx += dx * dx;
            sxy += dx * (y - y_mean);
        }
        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let rmse = if n > 2 {
            let sse: f64 = series
                .iter()
                .enumerate()
                .map(|(i, &y)| {
                    let r = y - (slope * i as f64 + intercept);
                    r * r
                })
                .sum();
            (sse / nf).sqrt()
        } else {
            FALLBACK_RMSE
        };

        Some(Self {
            slope,
            intercept,
            rmse,
        })
    }

    /// Value of the line at period index `t`.
    pub fn at(&self, t: f64) -> f64 {
        self.slope * t + self.intercept
    }
}

/// Forecast the next `horizon` periods of `series`.
///
/// Never fails. An empty series has nothing to extend and yields an empty
/// forecast; otherwise every returned sequence has length `horizon`.
pub fn forecast(series: &[f64], horizon: usize) -> Forecast {
    let n = series.len();
    let Some(&last) = series.last() else {
        log::debug!("forecast: empty history, nothing to extend");
        return Forecast::default();
    };

    let mut out = Forecast::with_capacity(horizon);
    let line = if n >= MIN_TREND_POINTS {
        TrendLine::fit(series)
    } else {
        None
    };
    match line {
        Some(line) => {
            let half_width = BAND_Z * line.rmse;
            for k in 1..=horizon {
                let t = (n - 1 + k) as f64;
                out.push(clamp_unit(line.at(t)), half_width);
            }
        }
        None => {
            log::debug!("forecast: {n} observation(s), using flat-line fallback");
            for _ in 0..horizon {
                out.push(clamp_unit(last), SPARSE_BAND);
            }
        }
    }
    out
}

fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
