//! One-sided CUSUM detection of persistent upward drift.

/// Per-step rise absorbed before anything accumulates.
pub const DEFAULT_TOLERANCE: f64 = 0.03;

/// Accumulated rise above which drift is declared.
pub const DEFAULT_THRESHOLD: f64 = 0.12;

/// Histories shorter than this never report drift.
pub const MIN_DRIFT_POINTS: usize = 4;

/// Returns `true` once the upward cumulative sum of step changes exceeds `threshold`.
///
/// Each step adds `x[i] - x[i-1] - tolerance` to a sum floored at zero, so
/// rises smaller than `tolerance` never build up and a fall only erodes what
/// has accumulated. The scan stops at the first breach.
pub fn detect_drift(series: &[f64], tolerance: f64, threshold: f64) -> bool {
    if series.len() < MIN_DRIFT_POINTS {
        return false;
    }
    let mut s_pos = 0.0_f64;
    for (i, pair) in series.windows(2).enumerate() {
        let diff = pair[1] - pair[0];
        s_pos = (s_pos + diff - tolerance).max(0.0);
        if s_pos > threshold {
            log::debug!("detect_drift: cusum {s_pos:.4} > {threshold} at step {}", i + 1);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn drift(xs: &[f64]) -> bool {
        detect_drift(xs, DEFAULT_TOLERANCE, DEFAULT_THRESHOLD)
    }

    #[test]
    fn short_history_never_drifts() {
        assert!(!drift(&[]));
        assert!(!drift(&[0.1]));
        assert!(!drift(&[0.9, 0.95, 0.99]));
        assert!(!drift(&[0.0, 0.5, 1.0]));
    }

    #[test]
    fn sustained_ramp_is_detected() {
        crate::test_support::init_test_logger();
        assert!(drift(&[0.10, 0.20, 0.30, 0.40, 0.50]));
    }

    #[test]
    fn flat_noisy_series_is_quiet() {
        assert!(!drift(&[0.5, 0.51, 0.49, 0.50, 0.50]));
    }

    #[test]
    fn breach_on_second_step_short_circuits() {
        // 0.07 after the first step, 0.14 after the second; the tail is irrelevant
        assert!(drift(&[0.1, 0.2, 0.3, 0.0, f64::NAN]));
    }

    #[test]
    fn drop_erodes_without_full_reset() {
        // +0.10 -> 0.07, -0.02 -> 0.02, +0.10 -> 0.09, +0.05 -> 0.11
        assert!(!drift(&[0.30, 0.40, 0.38, 0.48, 0.53]));
        // one more rise pushes the retained sum over the threshold
        assert!(drift(&[0.30, 0.40, 0.38, 0.48, 0.53, 0.60]));
    }

    #[test]
    fn large_drop_clamps_at_zero() {
        // the fall floors the sum at zero instead of leaving a deficit of -0.26,
        // so two later rises of 0.10 are enough to breach
        assert!(drift(&[0.2, 0.3, 0.0, 0.1, 0.2]));
    }

    #[test]
    fn downward_trend_is_ignored() {
        assert!(!drift(&[0.9, 0.8, 0.7, 0.6, 0.5, 0.4]));
    }

    #[test]
    fn custom_parameters_are_honoured() {
        let xs = [0.10, 0.12, 0.14, 0.16, 0.18];
        assert!(!drift(&xs));
        assert!(detect_drift(&xs, 0.0, 0.05));
    }

    proptest! {
        #[test]
        fn repeated_calls_agree(xs in prop::collection::vec(0.0f64..=1.0, 0..32)) {
            prop_assert_eq!(drift(&xs), drift(&xs));
        }

        #[test]
        fn non_increasing_series_never_drifts(mut xs in prop::collection::vec(0.0f64..=1.0, 0..32)) {
            xs.sort_by(|a, b| b.total_cmp(a));
            prop_assert!(!drift(&xs));
        }
    }
}
