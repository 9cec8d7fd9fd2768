//! Trend analytics over a subject's normalized risk-score history.
//!
//! Every function here is pure: it borrows a chronological series of scores
//! in `[0, 1]` and returns a freshly computed answer. Nothing is cached
//! between calls, so the functions can be shared freely across threads.
//!
//! - [`smooth`]: exponential moving average of the history
//! - [`forecast`]: linear-trend forecast with residual-based bands
//! - [`detect_drift`]: one-sided CUSUM check for persistent upward drift
//!
//! ```
//! use predictwell_trend::{detect_drift, forecast, smooth};
//!
//! let history = [0.10, 0.20, 0.30, 0.40, 0.50];
//! assert!(smooth(&history, 0.4).is_some());
//! assert_eq!(forecast(&history, 4).len(), 4);
//! assert!(detect_drift(&history, 0.03, 0.12));
//! ```

pub mod config;
pub mod drift;
pub mod error;
pub mod forecast;
pub mod report;
pub mod series;
pub mod smoothing;

pub use config::TrendConfig;
pub use drift::{detect_drift, DEFAULT_THRESHOLD, DEFAULT_TOLERANCE};
pub use error::{ConfigError, TrendError};
pub use forecast::{forecast, Forecast, TrendLine, DEFAULT_HORIZON};
pub use report::{analyze, TrendReport};
pub use series::validate_series;
pub use smoothing::{smooth, smoothed_series, DEFAULT_ALPHA};
