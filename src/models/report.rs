use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

use crate::error::{ReportError, ReportResult};
use crate::models::host::AmountNode;

/// Width of a chart bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    Day,
    Month,
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "DAY",
            Granularity::Month => "MONTH",
            Granularity::Year => "YEAR",
        }
    }
}

impl FromStr for Granularity {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DAY" => Ok(Granularity::Day),
            "MONTH" => Ok(Granularity::Month),
            "YEAR" => Ok(Granularity::Year),
            _ => Err(ReportError::UnsupportedGranularity(s.to_string())),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What happens when several points land in the same bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BucketMode {
    /// The last point seen wins.
    #[default]
    Overwrite,
    /// Points are accumulated.
    Sum,
}

impl FromStr for BucketMode {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" => Ok(BucketMode::Overwrite),
            "sum" => Ok(BucketMode::Sum),
            _ => Err(ReportError::Validation(format!("Unknown bucket mode: {}", s))),
        }
    }
}

/// The `[from, to]` range being charted, with its bucket width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub granularity: Granularity,
}

impl BucketWindow {
    pub fn new(
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        granularity: Granularity,
    ) -> ReportResult<Self> {
        if from > to {
            return Err(ReportError::InvalidWindow { from, to });
        }
        Ok(Self {
            from,
            to,
            granularity,
        })
    }
}

/// A dated amount. Negative amounts are expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPoint {
    pub date: DateTime<Utc>,
    pub amount_cents: i64,
}

impl DataPoint {
    pub fn new(date: DateTime<Utc>, amount_cents: i64) -> Self {
        Self { date, amount_cents }
    }
}

impl From<&AmountNode> for DataPoint {
    fn from(node: &AmountNode) -> Self {
        Self {
            date: node.date,
            amount_cents: node.amount.cents(),
        }
    }
}

/// One named line of a chart, positionally aligned with [`ChartData::labels`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketedSeries {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub granularity: Granularity,
    pub labels: Vec<String>,
    pub series: Vec<BucketedSeries>,
    /// Evenly spaced y-axis tick texts, from zero up to the largest value.
    pub y_axis_labels: Vec<String>,
}

/// A segment of a proportional bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionalArea {
    pub key: String,
    pub percentage: f64,
    pub color: String,
    pub label: String,
}

impl ProportionalArea {
    pub fn new(key: &str, percentage: f64, color: &str, label: String) -> Self {
        Self {
            key: key.to_string(),
            percentage,
            color: color.to_string(),
            label,
        }
    }
}

/// A named, unbucketed input series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInput {
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<DataPoint>,
}

impl SeriesInput {
    pub fn new(name: impl Into<String>, color: Option<&str>, points: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            color: color.map(str::to_string),
            points,
        }
    }
}
