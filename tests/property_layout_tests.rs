use chart_primitives::core::{BandScale, LinearScale, PointScale, Scale, ScaleValue, TimeScale};
use chart_primitives::layout::compute_ticks;
use chrono::{TimeDelta, TimeZone, Utc};
use proptest::prelude::*;

fn within(position: f64, range: (f64, f64)) -> bool {
    let (lo, hi) = if range.0 <= range.1 {
        (range.0, range.1)
    } else {
        (range.1, range.0)
    };
    let slack = (hi - lo).abs() * 1e-9 + 1e-9;
    position >= lo - slack && position <= hi + slack
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn linear_ticks_match_requested_count_within_range(
        start in -1.0e6f64..1.0e6,
        span in 1.0e-3f64..1.0e6,
        range_end in 1.0f64..4000.0,
        flip in any::<bool>(),
        count in 0usize..24,
    ) {
        let (d0, d1) = if flip { (start + span, start) } else { (start, start + span) };
        let scale = LinearScale::new(d0, d1)
            .and_then(|scale| scale.with_range(0.0, range_end))
            .expect("valid scale");

        let ticks = compute_ticks(&scale, count);
        prop_assert_eq!(ticks.len(), count);
        for tick in &ticks {
            prop_assert!(within(tick.position, scale.range()));
        }
    }

    #[test]
    fn time_ticks_match_requested_count_within_range(
        start_days in 0i64..20_000,
        span_minutes in 1i64..5_000_000,
        count in 0usize..16,
    ) {
        let start = Utc.timestamp_opt(0, 0).unwrap() + TimeDelta::days(start_days);
        let end = start + TimeDelta::minutes(span_minutes);
        let scale = TimeScale::new(start, end)
            .and_then(|scale| scale.with_range(0.0, 800.0))
            .expect("valid scale");

        let ticks = compute_ticks(&scale, count);
        prop_assert_eq!(ticks.len(), count);
        for tick in &ticks {
            prop_assert!(within(tick.position, scale.range()));
        }
    }

    #[test]
    fn ordinal_ticks_never_exceed_domain_size(
        key_count in 0usize..40,
        count in 0usize..50,
        width in 1.0f64..2000.0,
    ) {
        let keys: Vec<ScaleValue> = (0..key_count).map(|i| ScaleValue::Number(i as f64)).collect();
        let point = PointScale::new(keys.clone())
            .with_range(0.0, width)
            .expect("valid scale");
        let band = BandScale::new(keys)
            .with_range(width, 0.0)
            .expect("valid scale");

        let point_ticks = compute_ticks(&point, count);
        prop_assert_eq!(point_ticks.len(), count.min(key_count));
        for tick in &point_ticks {
            prop_assert!(within(tick.position, point.range()));
        }
        if let Some(first) = point_ticks.first() {
            prop_assert_eq!(&first.value, &ScaleValue::Number(0.0));
        }

        let band_ticks = compute_ticks(&band, count);
        prop_assert_eq!(band_ticks.len(), count.min(key_count));
        for tick in &band_ticks {
            prop_assert!(within(tick.position, band.range()));
        }
    }
}
