//! Daily monitoring signals through the weighted index into trend analysis.

use approx::assert_abs_diff_eq;
use predictwell_scoring::{band_for, DailySignals, RiskBand, SignalWeights};
use predictwell_trend::{analyze, validate_series, TrendConfig};

fn index_series(days: &[DailySignals]) -> Vec<f64> {
    let weights = SignalWeights::default();
    days.iter().map(|d| weights.score(d)).collect()
}

fn worsening_week() -> Vec<DailySignals> {
    let quiet = DailySignals::default();
    let restless = DailySignals {
        sleep_frag: 1.0,
        ..quiet
    };
    let dry = DailySignals {
        hydration_low: 1.0,
        ..restless
    };
    let dizzy = DailySignals {
        dizziness: 1.0,
        ..dry
    };
    let inactive = DailySignals {
        steps_delta: 1.0,
        ..dizzy
    };
    let fallen = DailySignals {
        recent_fall: 1.0,
        ..inactive
    };
    vec![quiet, restless, dry, dizzy, inactive, fallen]
}

#[test]
fn worsening_week_drifts_and_climbs_bands() {
    let series = index_series(&worsening_week());
    let expected = [0.0, 0.10, 0.15, 0.27, 0.43, 0.68];
    for (got, want) in series.iter().zip(expected) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
    }
    validate_series(&series).unwrap();

    let bands: Vec<_> = series.iter().map(|&s| band_for(s)).collect();
    assert_eq!(bands[0], Some(RiskBand::Low));
    assert_eq!(bands[4], Some(RiskBand::Moderate));
    assert_eq!(bands[5], Some(RiskBand::High));

    let report = analyze(&series, &TrendConfig::default());
    assert!(report.drift);
    assert_eq!(report.observations, 6);

    let predictions = &report.forecast.predictions;
    assert_eq!(predictions.len(), 4);
    assert!(predictions[0] > 0.68);
    assert!(predictions.windows(2).all(|w| w[1] >= w[0]));
    // The fitted line leaves [0, 1] by the fourth step.
    assert_eq!(predictions[3], 1.0);
    for (p, lo, hi) in report.forecast.steps() {
        assert!((0.0..=1.0).contains(&lo) && lo <= p);
        assert!((0.0..=1.0).contains(&hi) && p <= hi);
    }
}

#[test]
fn quiet_week_is_flat() {
    let series = index_series(&vec![DailySignals::default(); 7]);
    let report = analyze(&series, &TrendConfig::default());

    assert!(!report.drift);
    assert_eq!(report.smoothed, Some(0.0));
    assert_eq!(report.forecast.predictions, vec![0.0; 4]);
    assert_eq!(report.forecast.lower, vec![0.0; 4]);
    assert_eq!(report.forecast.upper, vec![0.0; 4]);
}

#[test]
fn custom_weights_change_the_index() {
    let weights = SignalWeights::from_toml_str(
        "recent_fall = 0.5\ndizziness = 0.5\northostatic_drop = 0.0\nsteps_delta = 0.0\n\
         sleep_frag = 0.0\ngait_flag = 0.0\nmed_change = 0.0\nhydration_low = 0.0\n",
    )
    .unwrap();
    let series: Vec<f64> = worsening_week().iter().map(|d| weights.score(d)).collect();
    assert_eq!(series, vec![0.0, 0.0, 0.0, 0.5, 0.5, 1.0]);

    // One jump of 0.5 is enough to cross the drift threshold.
    assert!(analyze(&series, &TrendConfig::default()).drift);
}

#[test]
fn report_serializes_for_downstream_consumers() {
    let series = index_series(&worsening_week());
    let report = analyze(&series, &TrendConfig::default());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["drift"], true);
    assert_eq!(json["forecast"]["upper"].as_array().unwrap().len(), 4);
}
