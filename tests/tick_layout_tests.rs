use chart_primitives::core::{
    LinearScale, PointScale, ScaleValue, TimeScale, subsample_indices, time_format,
};
use chart_primitives::layout::{TickLayoutOptions, compute_ticks, compute_ticks_with, diff_ticks};
use chrono::{DateTime, TimeZone, Utc};

fn yearly_dates() -> Vec<DateTime<Utc>> {
    (2018..=2022)
        .map(|year| Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap())
        .collect()
}

#[test]
fn two_ticks_over_five_years_are_first_and_last() {
    let dates = yearly_dates();
    let scale = TimeScale::from_extent(dates.iter().copied())
        .and_then(|scale| scale.with_range(0.0, 200.0))
        .expect("valid scale");

    let ticks = compute_ticks(&scale, 2);
    assert_eq!(ticks.len(), 2);
    assert_eq!(ticks[0].value, ScaleValue::Time(dates[0]));
    assert_eq!(ticks[1].value, ScaleValue::Time(dates[4]));
    assert_eq!(ticks[0].position, 0.0);
    assert_eq!(ticks[1].position, 200.0);
}

#[test]
fn year_formatter_labels_every_tick() {
    let scale = TimeScale::from_extent(yearly_dates())
        .and_then(|scale| scale.with_range(0.0, 200.0))
        .expect("valid scale");
    let options = TickLayoutOptions::new(5).with_tick_format(Some(time_format("%Y")));

    let labels: Vec<String> = compute_ticks_with(&scale, &options)
        .into_iter()
        .map(|tick| tick.label)
        .collect();
    assert_eq!(labels, vec!["2018", "2019", "2020", "2021", "2022"]);
}

#[test]
fn zero_ticks_or_empty_domain_yield_nothing() {
    let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
    assert!(compute_ticks(&scale, 0).is_empty());

    let empty = PointScale::new(Vec::<ScaleValue>::new())
        .with_range(0.0, 100.0)
        .expect("valid scale");
    assert!(compute_ticks(&empty, 5).is_empty());
}

#[test]
fn ordinal_ticks_keep_first_and_last_keys() {
    let keys: Vec<ScaleValue> = (0..10).map(|i| ScaleValue::from(format!("k{i}"))).collect();
    let scale = PointScale::new(keys)
        .with_range(0.0, 900.0)
        .expect("valid scale");

    let labels: Vec<String> = compute_ticks(&scale, 4)
        .into_iter()
        .map(|tick| tick.label)
        .collect();
    assert_eq!(labels, vec!["k0", "k3", "k6", "k9"]);
    assert_eq!(subsample_indices(10, 1), vec![0]);
    assert_eq!(subsample_indices(3, 8), vec![0, 1, 2]);
}

#[test]
fn continuous_ticks_prefer_round_values() {
    let scale = LinearScale::new(100.0, 550.0)
        .and_then(|scale| scale.with_range(100.0, 0.0))
        .expect("valid scale");
    let labels: Vec<String> = compute_ticks(&scale, 5)
        .into_iter()
        .map(|tick| tick.label)
        .collect();
    assert_eq!(labels, vec!["100", "200", "300", "400", "500"]);
}

#[test]
fn reserved_first_tick_stays_in_layout() {
    let scale = LinearScale::new(0.0, 4.0).expect("valid scale");
    let options = TickLayoutOptions::new(5).with_reserve_first_tick(true);
    let ticks = compute_ticks_with(&scale, &options);

    assert_eq!(ticks.len(), 5);
    assert!(ticks[0].reserved);
    assert_eq!(ticks.iter().filter(|tick| tick.reserved).count(), 1);
}

#[test]
fn domain_shift_diffs_by_tick_value() {
    let before = LinearScale::new(0.0, 4.0).expect("valid scale");
    let after = LinearScale::new(0.0, 8.0).expect("valid scale");

    let diff = diff_ticks(&compute_ticks(&before, 5), &compute_ticks(&after, 5));
    let values = |ticks: &[chart_primitives::layout::Tick]| -> Vec<String> {
        ticks.iter().map(|tick| tick.label.clone()).collect()
    };

    assert_eq!(values(&diff.enters), vec!["6", "8"]);
    assert_eq!(values(&diff.exits), vec!["1", "3"]);
    let updated: Vec<String> = diff
        .updates
        .iter()
        .map(|update| update.current.label.clone())
        .collect();
    assert_eq!(updated, vec!["0", "2", "4"]);
    assert!(diff.updates[1].moved());
    assert!(!diff.updates[0].moved());
}
