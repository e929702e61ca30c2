use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{ReportError, ReportResult};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Parse an upstream instant. Accepts RFC 3339 timestamps as well as bare
/// `YYYY-MM-DD` dates, which are taken as midnight UTC.
pub fn parse_instant(s: &str) -> ReportResult<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| ReportError::Validation(format!("Invalid date: {}", s)))
}

/// Serde adapter for required instants.
pub fn deserialize_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_instant(&s).map_err(serde::de::Error::custom)
}

/// Serde adapter for optional instants. Empty strings count as absent.
pub fn deserialize_optional_instant<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => parse_instant(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Whole days between two instants, truncated toward zero.
pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days()
}

/// Fractional days between two instants, rounded up.
///
/// An instant exactly on `from` gives 0, anything strictly inside the
/// following day gives 1. Instants less than a day before `from` also give 0.
pub fn ceil_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let ms = (to - from).num_milliseconds();
    if ms > 0 {
        (ms + DAY_MS - 1) / DAY_MS
    } else {
        ms / DAY_MS
    }
}

/// Whole calendar months between two instants, truncated toward zero.
///
/// A month is only counted once `from` shifted by that many months (clamped to
/// the end of shorter months) is no later than `to`.
pub fn months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    if to < from {
        return -months_between(to, from);
    }

    let mut months = (to.year() as i64 - from.year() as i64) * 12 + to.month() as i64
        - from.month() as i64;

    if months > 0 {
        let overshoots = u32::try_from(months)
            .ok()
            .and_then(|m| from.checked_add_months(Months::new(m)))
            .map_or(true, |anchor| anchor > to);
        if overshoots {
            months -= 1;
        }
    }

    months
}

/// Whole calendar years between two instants, truncated toward zero.
pub fn years_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    months_between(from, to) / 12
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `months` away from `date`'s month.
pub fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let total_months = date.year() as i64 * 12 + date.month() as i64 - 1 + months;
    let new_year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let new_month = (total_months.rem_euclid(12) + 1) as u32;
    NaiveDate::from_ymd_opt(new_year, new_month, 1)
}

/// Optional bounds picked by the user; gaps are filled in by [`DateInterval::resolve`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateInterval {
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub from: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub to: Option<DateTime<Utc>>,
}

impl DateInterval {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// Fill missing bounds: the start falls back to `created_at`, the end to `now`.
    pub fn resolve(
        &self,
        created_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> ReportResult<(DateTime<Utc>, DateTime<Utc>)> {
        let from = self.from.or(created_at).ok_or_else(|| {
            ReportError::Validation("No start date and no creation date to fall back on".into())
        })?;
        let to = self.to.unwrap_or(now);
        Ok((from, to))
    }
}
