//! Turns sparse dated amounts into fixed-width, zero-filled chart series.
//!
//! Buckets are counted from the window start: one per day or month touched by
//! `[from, to]` (inclusive), or one per *whole* year between them. Yearly
//! buckets end at the current year rather than at `to`, so the clock is
//! injected and tests can freeze it.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

use crate::date_utils::{
    ceil_days_between, days_between, month_start, months_between, shift_months, years_between,
};
use crate::error::{ReportError, ReportResult};
use crate::format::{axis_label, DateFormatter};
use crate::models::{
    BucketMode, BucketWindow, BucketedSeries, ChartData, DataPoint, Granularity, SeriesInput,
};

/// Number of buckets covering `window`.
pub fn bucket_count(window: &BucketWindow) -> usize {
    let count = match window.granularity {
        Granularity::Day => days_between(window.from, window.to) + 1,
        Granularity::Month => months_between(window.from, window.to) + 1,
        Granularity::Year => years_between(window.from, window.to),
    };
    usize::try_from(count).unwrap_or(0)
}

pub struct Bucketizer<'a> {
    now: DateTime<Utc>,
    mode: BucketMode,
    formatter: &'a dyn DateFormatter,
}

impl<'a> Bucketizer<'a> {
    pub fn new(now: DateTime<Utc>, formatter: &'a dyn DateFormatter) -> Self {
        Self {
            now,
            mode: BucketMode::default(),
            formatter,
        }
    }

    pub fn with_mode(mut self, mode: BucketMode) -> Self {
        self.mode = mode;
        self
    }

    /// Upper-cased labels, one per bucket.
    pub fn labels(&self, window: &BucketWindow) -> ReportResult<Vec<String>> {
        let count = bucket_count(window);
        let anchor = window.from.date_naive();

        (0..count)
            .map(|i| {
                let date = self
                    .bucket_date(window.granularity, anchor, count, i)
                    .ok_or_else(|| {
                        ReportError::Validation(format!("Bucket {} is outside the calendar", i))
                    })?;
                Ok(self
                    .formatter
                    .format(date, window.granularity)
                    .to_uppercase())
            })
            .collect()
    }

    fn bucket_date(
        &self,
        granularity: Granularity,
        anchor: NaiveDate,
        count: usize,
        i: usize,
    ) -> Option<NaiveDate> {
        match granularity {
            Granularity::Day => anchor.checked_add_days(Days::new(i as u64)),
            Granularity::Month => shift_months(month_start(anchor), i as i64),
            Granularity::Year => {
                let year = self.now.year() as i64 - count as i64 + 1 + i as i64;
                NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, 1, 1)
            }
        }
    }

    /// Absolute amounts per bucket, zero where nothing landed.
    ///
    /// Yearly points older than the first bucket are dropped. Any other point
    /// whose bucket falls outside the window fails the whole aggregation.
    pub fn aggregate(
        &self,
        window: &BucketWindow,
        points: &[DataPoint],
    ) -> ReportResult<Vec<i64>> {
        let len = bucket_count(window);
        let mut values = vec![0i64; len];

        for point in points {
            let Some(index) = self.bucket_index(window, len, point) else {
                tracing::debug!(
                    "Dropping {} point dated {}: before first yearly bucket",
                    window.granularity,
                    point.date
                );
                continue;
            };

            let slot = usize::try_from(index)
                .ok()
                .and_then(|i| values.get_mut(i))
                .ok_or(ReportError::PointOutOfWindow { index, len })?;

            let amount = point.amount_cents.saturating_abs();
            *slot = match self.mode {
                BucketMode::Overwrite => amount,
                BucketMode::Sum => slot.saturating_add(amount),
            };
        }

        Ok(values)
    }

    fn bucket_index(&self, window: &BucketWindow, len: usize, point: &DataPoint) -> Option<i64> {
        match window.granularity {
            Granularity::Year => {
                let years = len as i64;
                let current_year = self.now.year() as i64;
                let point_year = point.date.year() as i64;
                if point_year > current_year - years {
                    Some(years - 1 - (current_year - point_year))
                } else {
                    None
                }
            }
            Granularity::Month => {
                let from = window.from;
                Some(
                    (point.date.month() as i64 - from.month() as i64)
                        + 12 * (point.date.year() as i64 - from.year() as i64),
                )
            }
            Granularity::Day => Some(ceil_days_between(window.from, point.date)),
        }
    }

    /// Labels plus one aligned series per input.
    pub fn chart(&self, window: &BucketWindow, inputs: &[SeriesInput]) -> ReportResult<ChartData> {
        let labels = self.labels(window)?;
        let series = inputs
            .iter()
            .map(|input| {
                Ok(BucketedSeries {
                    name: input.name.clone(),
                    color: input.color.clone(),
                    values: self.aggregate(window, &input.points)?,
                })
            })
            .collect::<ReportResult<Vec<_>>>()?;

        tracing::debug!(
            "Built {} chart with {} buckets and {} series",
            window.granularity,
            labels.len(),
            series.len()
        );

        Ok(ChartData {
            granularity: window.granularity,
            y_axis_labels: y_axis_labels(&series),
            labels,
            series,
        })
    }
}

const Y_AXIS_STEPS: i64 = 4;

fn y_axis_labels(series: &[BucketedSeries]) -> Vec<String> {
    let max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .max()
        .unwrap_or(0);
    if max <= 0 {
        return vec![axis_label(0)];
    }
    (0..=Y_AXIS_STEPS)
        .map(|i| axis_label(max.saturating_mul(i) / Y_AXIS_STEPS))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::LocaleFormatter;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn window(from: DateTime<Utc>, to: DateTime<Utc>, g: Granularity) -> BucketWindow {
        BucketWindow::new(from, to, g).unwrap()
    }

    #[test]
    fn test_bucket_counts() {
        let w = window(at(2024, 3, 1), at(2024, 3, 3), Granularity::Day);
        assert_eq!(bucket_count(&w), 3);
        let w = window(at(2024, 1, 1), at(2024, 3, 1), Granularity::Month);
        assert_eq!(bucket_count(&w), 3);
        let w = window(at(2022, 1, 1), at(2024, 1, 1), Granularity::Year);
        assert_eq!(bucket_count(&w), 2);
        let w = window(at(2024, 3, 1), at(2024, 3, 1), Granularity::Day);
        assert_eq!(bucket_count(&w), 1);
        let w = window(at(2024, 3, 1), at(2024, 3, 1), Granularity::Year);
        assert_eq!(bucket_count(&w), 0);
    }

    #[test]
    fn test_day_labels_roll_over_month_and_year() {
        let fmt = LocaleFormatter::default();
        let b = Bucketizer::new(at(2025, 6, 1), &fmt);
        let w = window(at(2023, 12, 30), at(2024, 1, 2), Granularity::Day);
        assert_eq!(
            b.labels(&w).unwrap(),
            vec!["30 DEC", "31 DEC", "1 JAN", "2 JAN"]
        );
    }

    #[test]
    fn test_month_labels_start_from_month_not_day() {
        let fmt = LocaleFormatter::default();
        let b = Bucketizer::new(at(2025, 6, 1), &fmt);
        let w = window(at(2023, 11, 30), at(2024, 2, 29), Granularity::Month);
        assert_eq!(
            b.labels(&w).unwrap(),
            vec!["NOV-23", "DEC-23", "JAN-24", "FEB-24"]
        );
    }

    #[test]
    fn test_year_labels_end_at_current_year() {
        let fmt = LocaleFormatter::default();
        let b = Bucketizer::new(at(2026, 3, 1), &fmt);
        let w = window(at(2020, 1, 1), at(2023, 6, 1), Granularity::Year);
        assert_eq!(b.labels(&w).unwrap(), vec!["2024", "2025", "2026"]);
    }

    #[test]
    fn test_day_point_between_boundaries_goes_to_next_day() {
        let fmt = LocaleFormatter::default();
        let b = Bucketizer::new(at(2025, 1, 1), &fmt);
        let w = window(at(2024, 3, 1), at(2024, 3, 3), Granularity::Day);
        let points = [DataPoint::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 6, 0, 0).unwrap(),
            -700,
        )];
        assert_eq!(b.aggregate(&w, &points).unwrap(), vec![0, 700, 0]);
    }

    #[test]
    fn test_same_bucket_overwrites_by_default() {
        let fmt = LocaleFormatter::default();
        let b = Bucketizer::new(at(2025, 1, 1), &fmt);
        let w = window(at(2024, 1, 1), at(2024, 3, 1), Granularity::Month);
        let points = [
            DataPoint::new(at(2024, 2, 3), 100),
            DataPoint::new(at(2024, 2, 20), -250),
        ];
        assert_eq!(b.aggregate(&w, &points).unwrap(), vec![0, 250, 0]);

        let summing = Bucketizer::new(at(2025, 1, 1), &fmt).with_mode(BucketMode::Sum);
        assert_eq!(summing.aggregate(&w, &points).unwrap(), vec![0, 350, 0]);
    }

    #[test]
    fn test_month_point_outside_window_fails() {
        let fmt = LocaleFormatter::default();
        let b = Bucketizer::new(at(2025, 1, 1), &fmt);
        let w = window(at(2024, 1, 1), at(2024, 3, 1), Granularity::Month);
        let err = b
            .aggregate(&w, &[DataPoint::new(at(2024, 5, 1), 10)])
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::PointOutOfWindow { index: 4, len: 3 }
        ));
    }

    #[test]
    fn test_old_year_points_are_dropped() {
        let fmt = LocaleFormatter::default();
        let b = Bucketizer::new(at(2024, 7, 1), &fmt);
        let w = window(at(2022, 1, 1), at(2024, 1, 1), Granularity::Year);
        let points = [
            DataPoint::new(at(2021, 5, 1), 999),
            DataPoint::new(at(2022, 5, 1), 111),
            DataPoint::new(at(2023, 5, 1), 300),
            DataPoint::new(at(2024, 5, 1), -400),
        ];
        assert_eq!(b.aggregate(&w, &points).unwrap(), vec![300, 400]);
    }

    #[test]
    fn test_chart_y_axis_scales_to_largest_value() {
        let fmt = LocaleFormatter::default();
        let b = Bucketizer::new(at(2025, 1, 1), &fmt);
        let w = window(at(2024, 1, 1), at(2024, 2, 1), Granularity::Month);
        let inputs = [
            SeriesInput::new(
                "Contributions",
                None,
                vec![DataPoint::new(at(2024, 1, 2), 400_000)],
            ),
            SeriesInput::new(
                "Expenses",
                None,
                vec![DataPoint::new(at(2024, 2, 2), -10_000)],
            ),
        ];
        let chart = b.chart(&w, &inputs).unwrap();
        assert_eq!(chart.y_axis_labels, vec!["0", "1k", "2k", "3k", "4k"]);

        let empty = b.chart(&w, &[]).unwrap();
        assert_eq!(empty.y_axis_labels, vec!["0"]);
    }

    #[test]
    fn test_future_year_point_fails() {
        let fmt = LocaleFormatter::default();
        let b = Bucketizer::new(at(2024, 7, 1), &fmt);
        let w = window(at(2022, 1, 1), at(2024, 1, 1), Granularity::Year);
        let err = b
            .aggregate(&w, &[DataPoint::new(at(2025, 1, 1), 1)])
            .unwrap_err();
        assert!(matches!(err, ReportError::PointOutOfWindow { index: 2, len: 2 }));
    }
}
