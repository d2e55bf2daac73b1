use stockwatch::{
    error::TrendError,
    services::trend::{self, TrendConfig, DEFAULT_THRESHOLD_PERCENT, DEFAULT_TRAILING_WINDOW},
};

fn flat_then(last: f64) -> Vec<f64> {
    let mut closes = vec![10.0; 7];
    closes.push(last);
    closes
}

#[test]
fn defaults_use_seven_sessions_and_one_percent() {
    let cfg = TrendConfig::default();
    assert_eq!(cfg.trailing_window, DEFAULT_TRAILING_WINDOW);
    assert_eq!(cfg.trailing_window, 7);
    assert_eq!(cfg.threshold_percent, DEFAULT_THRESHOLD_PERCENT);
    assert_eq!(cfg.required_sessions(), 8);
}

#[test]
fn two_percent_rise_notifies() {
    let signal = trend::evaluate(&flat_then(10.2), &TrendConfig::default()).unwrap();

    assert_eq!(signal.trailing_mean, 10.0);
    assert_eq!(signal.current_price, 10.2);
    assert!((signal.deviation_percent - 2.0).abs() < 1e-9);
    assert!(signal.should_notify);
}

#[test]
fn half_percent_rise_does_not_notify() {
    let signal = trend::evaluate(&flat_then(10.05), &TrendConfig::default()).unwrap();

    assert!((signal.deviation_percent - 0.5).abs() < 1e-9);
    assert!(!signal.should_notify);
}

#[test]
fn price_at_mean_has_zero_deviation() {
    let signal = trend::evaluate(&[5.0; 8], &TrendConfig::default()).unwrap();

    assert_eq!(signal.deviation_percent, 0.0);
    assert!(!signal.should_notify);
}

#[test]
fn deviation_exactly_at_threshold_notifies() {
    let mut closes = vec![100.0; 7];
    closes.push(101.0);

    let signal = trend::evaluate(&closes, &TrendConfig::default()).unwrap();
    assert_eq!(signal.deviation_percent, 1.0);
    assert!(signal.should_notify);
}

#[test]
fn exact_one_percent_rise_notifies_despite_rounding() {
    // 100 * (10.1 - 10) / 10 lands just under 1.0 in f64
    let signal = trend::evaluate(&flat_then(10.1), &TrendConfig::default()).unwrap();

    assert!(signal.deviation_percent < 1.0);
    assert!(signal.should_notify);
}

#[test]
fn just_under_threshold_stays_silent() {
    let signal = trend::evaluate(&flat_then(10.099), &TrendConfig::default()).unwrap();
    assert!(!signal.should_notify);
}

#[test]
fn huge_window_reports_insufficient_history() {
    let cfg = TrendConfig {
        trailing_window: usize::MAX,
        threshold_percent: 1.0,
    };
    assert_eq!(cfg.required_sessions(), usize::MAX);

    let err = trend::evaluate(&flat_then(10.2), &cfg).unwrap_err();
    assert!(matches!(err, TrendError::InsufficientHistory { got: 8, .. }));
}

#[test]
fn drop_below_mean_is_negative_and_silent() {
    let signal = trend::evaluate(&flat_then(9.0), &TrendConfig::default()).unwrap();

    assert!((signal.deviation_percent + 10.0).abs() < 1e-9);
    assert!(!signal.should_notify);
}

#[test]
fn evaluation_is_deterministic() {
    let closes = [12.1, 12.4, 11.9, 12.0, 12.8, 13.1, 12.9, 13.6, 13.4];
    let cfg = TrendConfig::default();

    let a = trend::evaluate(&closes, &cfg).unwrap();
    let b = trend::evaluate(&closes, &cfg).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.deviation_percent.to_bits(), b.deviation_percent.to_bits());
}

#[test]
fn only_the_sessions_before_the_latest_form_the_mean() {
    // older sessions outside the window must be ignored
    let closes = [1000.0, 1000.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.2];

    let signal = trend::evaluate(&closes, &TrendConfig::default()).unwrap();
    assert_eq!(signal.trailing_mean, 10.0);
    assert!(signal.should_notify);
}

#[test]
fn latest_session_is_excluded_from_mean() {
    let closes = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 80.0];

    let signal = trend::evaluate(&closes, &TrendConfig::default()).unwrap();
    assert_eq!(signal.trailing_mean, 4.0);
    assert_eq!(signal.current_price, 80.0);
}

#[test]
fn seven_sessions_is_insufficient() {
    let err = trend::evaluate(&[10.0; 7], &TrendConfig::default()).unwrap_err();
    assert_eq!(err, TrendError::InsufficientHistory { needed: 8, got: 7 });
}

#[test]
fn empty_series_is_insufficient() {
    let err = trend::evaluate(&[], &TrendConfig::default()).unwrap_err();
    assert!(matches!(err, TrendError::InsufficientHistory { got: 0, .. }));
}

#[test]
fn zero_mean_is_degenerate_not_infinite() {
    let mut closes = vec![0.0; 7];
    closes.push(3.5);

    let err = trend::evaluate(&closes, &TrendConfig::default()).unwrap_err();
    assert!(matches!(err, TrendError::DegenerateSeries(_)));
}

#[test]
fn zero_mean_with_zero_price_is_degenerate_not_nan() {
    let err = trend::evaluate(&[0.0; 8], &TrendConfig::default()).unwrap_err();
    assert!(matches!(err, TrendError::DegenerateSeries(_)));
}

#[test]
fn non_finite_close_is_degenerate() {
    let err = trend::evaluate(&flat_then(f64::NAN), &TrendConfig::default()).unwrap_err();
    assert!(matches!(err, TrendError::DegenerateSeries(_)));

    let mut closes = flat_then(10.0);
    closes[3] = f64::INFINITY;
    let err = trend::evaluate(&closes, &TrendConfig::default()).unwrap_err();
    assert!(matches!(err, TrendError::DegenerateSeries(_)));
}

#[test]
fn custom_threshold_and_window_are_honored() {
    let cfg = TrendConfig {
        trailing_window: 3,
        threshold_percent: 5.0,
    };
    assert_eq!(cfg.required_sessions(), 4);

    let signal = trend::evaluate(&[10.0, 10.0, 10.0, 10.4], &cfg).unwrap();
    assert!(!signal.should_notify);

    let signal = trend::evaluate(&[10.0, 10.0, 10.0, 10.6], &cfg).unwrap();
    assert!(signal.should_notify);
}

#[test]
fn zero_window_is_rejected() {
    let cfg = TrendConfig {
        trailing_window: 0,
        threshold_percent: 1.0,
    };

    let err = trend::evaluate(&[10.0; 8], &cfg).unwrap_err();
    assert!(matches!(err, TrendError::DegenerateSeries(_)));
}
