use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Timelike, Utc, Weekday};

use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use crate::core::scale::{LinearScale, Scale, ScaleDomain, ScaleKind, evenly_spaced_values};
use crate::core::types::ScaleValue;
use crate::error::{ChartError, ChartResult};

/// Continuous scale over UTC instants.
///
/// Arithmetic runs on fractional Unix seconds, so round trips are exact to
/// the millisecond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> ChartResult<Self> {
        let linear =
            LinearScale::new(datetime_to_unix_seconds(start), datetime_to_unix_seconds(end))?;
        Ok(Self { start, end, linear })
    }

    /// Fits the domain to the earliest and latest instant in `times`.
    pub fn from_extent(times: impl IntoIterator<Item = DateTime<Utc>>) -> ChartResult<Self> {
        let mut bounds: Option<(DateTime<Utc>, DateTime<Utc>)> = None;
        for time in times {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(time), max.max(time)),
                None => (time, time),
            });
        }
        let (min, max) = bounds.ok_or_else(|| {
            ChartError::InvalidInput("cannot fit a time scale to an empty extent".to_owned())
        })?;
        Self::new(min, max)
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        self.linear = self.linear.with_range(range_start, range_end)?;
        Ok(self)
    }

    #[must_use]
    pub fn time_bounds(self) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn time_to_pixel(self, time: DateTime<Utc>) -> f64 {
        self.linear.domain_to_pixel(datetime_to_unix_seconds(time))
    }

    #[must_use]
    pub fn pixel_to_time(self, pixel: f64) -> Option<DateTime<Utc>> {
        unix_seconds_to_datetime(self.linear.pixel_to_domain(pixel))
    }
}

impl Scale for TimeScale {
    fn kind(&self) -> ScaleKind {
        ScaleKind::Time
    }

    fn to_position(&self, value: &ScaleValue) -> Option<f64> {
        match value {
            ScaleValue::Time(time) => Some(self.time_to_pixel(*time)),
            _ => None,
        }
    }

    fn invert(&self, position: f64) -> Option<ScaleValue> {
        if !position.is_finite() {
            return None;
        }
        self.pixel_to_time(position).map(ScaleValue::Time)
    }

    fn domain(&self) -> ScaleDomain {
        ScaleDomain::Continuous(ScaleValue::Time(self.start), ScaleValue::Time(self.end))
    }

    fn range(&self) -> (f64, f64) {
        self.linear.range_bounds()
    }

    fn is_degenerate(&self) -> bool {
        self.linear.is_degenerate()
    }

    /// Calendar boundaries when they land on exactly `count` instants,
    /// otherwise evenly spaced instants from domain start to domain end.
    fn ticks(&self, count: usize) -> Vec<ScaleValue> {
        if self.is_degenerate() || count == 0 {
            return Vec::new();
        }
        if count > 1 {
            let calendar = calendar_tick_values(self.start, self.end, count);
            if calendar.len() == count {
                return calendar.into_iter().map(ScaleValue::Time).collect();
            }
        }
        let (start, end) = self.linear.domain_bounds();
        evenly_spaced_values(start, end, count)
            .into_iter()
            .filter_map(unix_seconds_to_datetime)
            .map(ScaleValue::Time)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalendarUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl CalendarUnit {
    const fn approx_seconds(self) -> f64 {
        match self {
            Self::Second => 1.0,
            Self::Minute => 60.0,
            Self::Hour => 3_600.0,
            Self::Day => 86_400.0,
            Self::Week => 604_800.0,
            Self::Month => 2_629_800.0,
            Self::Year => 31_557_600.0,
        }
    }
}

const TICK_INTERVALS: [(CalendarUnit, u32); 18] = [
    (CalendarUnit::Second, 1),
    (CalendarUnit::Second, 5),
    (CalendarUnit::Second, 15),
    (CalendarUnit::Second, 30),
    (CalendarUnit::Minute, 1),
    (CalendarUnit::Minute, 5),
    (CalendarUnit::Minute, 15),
    (CalendarUnit::Minute, 30),
    (CalendarUnit::Hour, 1),
    (CalendarUnit::Hour, 3),
    (CalendarUnit::Hour, 6),
    (CalendarUnit::Hour, 12),
    (CalendarUnit::Day, 1),
    (CalendarUnit::Day, 2),
    (CalendarUnit::Week, 1),
    (CalendarUnit::Month, 1),
    (CalendarUnit::Month, 3),
    (CalendarUnit::Year, 1),
];

const MAX_CALENDAR_CANDIDATES: usize = 10_000;

/// Instants on second/minute/hour/day/week/month/year boundaries whose spacing
/// is closest to `span / count`. Spans below one second yield nothing.
fn calendar_tick_values(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    count: usize,
) -> Vec<DateTime<Utc>> {
    let reversed = end < start;
    let (lo, hi) = if reversed { (end, start) } else { (start, end) };
    let span_seconds = (hi - lo).num_milliseconds() as f64 / 1000.0;
    let target = span_seconds / count as f64;
    if !(target >= 1.0) {
        return Vec::new();
    }

    let (unit, step) = match TICK_INTERVALS
        .iter()
        .position(|(unit, step)| unit.approx_seconds() * f64::from(*step) >= target)
    {
        Some(0) => TICK_INTERVALS[0],
        Some(index) => {
            let (prev_unit, prev_step) = TICK_INTERVALS[index - 1];
            let (next_unit, next_step) = TICK_INTERVALS[index];
            let below = target / (prev_unit.approx_seconds() * f64::from(prev_step));
            let above = next_unit.approx_seconds() * f64::from(next_step) / target;
            if below < above {
                (prev_unit, prev_step)
            } else {
                (next_unit, next_step)
            }
        }
        None => (
            CalendarUnit::Year,
            nice_year_step(target / CalendarUnit::Year.approx_seconds()),
        ),
    };

    let mut values = Vec::new();
    let mut candidate = first_boundary_at_or_after(lo, unit);
    for _ in 0..MAX_CALENDAR_CANDIDATES {
        let Some(time) = candidate else {
            break;
        };
        if time > hi {
            break;
        }
        if is_aligned(time, unit, step) {
            values.push(time);
        }
        candidate = next_boundary(time, unit);
    }
    if candidate.is_some_and(|time| time <= hi) {
        return Vec::new();
    }

    if reversed {
        values.reverse();
    }
    values
}

fn nice_year_step(years: f64) -> u32 {
    let power = years.log10().floor();
    let error = years / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    (factor * 10f64.powf(power)).round().clamp(1.0, f64::from(u32::MAX)) as u32
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}

fn first_boundary_at_or_after(time: DateTime<Utc>, unit: CalendarUnit) -> Option<DateTime<Utc>> {
    let fixed = |seconds: i64| {
        let millis = seconds * 1000;
        let raw = time.timestamp_millis();
        let remainder = raw.rem_euclid(millis);
        let ceiled = if remainder == 0 {
            raw
        } else {
            raw - remainder + millis
        };
        DateTime::from_timestamp_millis(ceiled)
    };
    match unit {
        CalendarUnit::Second => fixed(1),
        CalendarUnit::Minute => fixed(60),
        CalendarUnit::Hour => fixed(3_600),
        CalendarUnit::Day => fixed(86_400),
        CalendarUnit::Week => {
            let mut day = fixed(86_400)?;
            while day.weekday() != Weekday::Sun {
                day = day.checked_add_days(Days::new(1))?;
            }
            Some(day)
        }
        CalendarUnit::Month => {
            let first = midnight(time.date_naive().with_day(1)?)?;
            if first == time {
                Some(first)
            } else {
                first.checked_add_months(Months::new(1))
            }
        }
        CalendarUnit::Year => {
            let first = midnight(NaiveDate::from_ymd_opt(time.year(), 1, 1)?)?;
            if first == time {
                Some(first)
            } else {
                first.checked_add_months(Months::new(12))
            }
        }
    }
}

fn next_boundary(time: DateTime<Utc>, unit: CalendarUnit) -> Option<DateTime<Utc>> {
    match unit {
        CalendarUnit::Second => time.checked_add_signed(chrono::TimeDelta::seconds(1)),
        CalendarUnit::Minute => time.checked_add_signed(chrono::TimeDelta::minutes(1)),
        CalendarUnit::Hour => time.checked_add_signed(chrono::TimeDelta::hours(1)),
        CalendarUnit::Day => time.checked_add_days(Days::new(1)),
        CalendarUnit::Week => time.checked_add_days(Days::new(7)),
        CalendarUnit::Month => time.checked_add_months(Months::new(1)),
        CalendarUnit::Year => time.checked_add_months(Months::new(12)),
    }
}

fn is_aligned(time: DateTime<Utc>, unit: CalendarUnit, step: u32) -> bool {
    let field = match unit {
        CalendarUnit::Second => time.second(),
        CalendarUnit::Minute => time.minute(),
        CalendarUnit::Hour => time.hour(),
        CalendarUnit::Day => time.day() - 1,
        CalendarUnit::Week => return true,
        CalendarUnit::Month => time.month0(),
        CalendarUnit::Year => return i64::from(time.year()).rem_euclid(i64::from(step)) == 0,
    };
    field % step == 0
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::calendar_tick_values;

    #[test]
    fn yearly_boundaries_for_a_multi_year_span() {
        let start = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
        let years: Vec<i32> = calendar_tick_values(start, end, 5)
            .into_iter()
            .map(|time| chrono::Datelike::year(&time))
            .collect();
        assert_eq!(years, vec![2018, 2019, 2020, 2021, 2022]);
        assert_eq!(calendar_tick_values(start, end, 2).len(), 3);
    }

    #[test]
    fn hourly_boundaries_skip_unaligned_start() {
        let start = Utc.with_ymd_and_hms(2020, 3, 1, 0, 30, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2020, 3, 1, 6, 30, 0).unwrap();
        let hours: Vec<u32> = calendar_tick_values(start, end, 6)
            .into_iter()
            .map(|time| chrono::Timelike::hour(&time))
            .collect();
        assert_eq!(hours, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn sub_second_spans_have_no_calendar_ticks() {
        let start = Utc.timestamp_millis_opt(0).unwrap();
        let end = Utc.timestamp_millis_opt(500).unwrap();
        assert!(calendar_tick_values(start, end, 3).is_empty());
    }
}
