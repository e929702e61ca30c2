use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::date_utils::DateInterval;
use crate::error::{ReportError, ReportResult};
use crate::format::LocaleFormatter;
use crate::models::{
    AmountOverTime, BucketWindow, ChartData, DataPoint, Granularity, HostStats, ProportionalArea,
    SeriesInput,
};
use crate::services::breakdown::{transactions_area, transactions_breakdown};
use crate::services::bucketizer::Bucketizer;

pub const CONTRIBUTIONS_COLOR: &str = "#29CC75";
pub const EXPENSES_COLOR: &str = "#F55882";

/// Everything the host dashboard's transactions section renders.
///
/// The proportional bars never depend on the chart: when the chart cannot be
/// built, `chart` is absent and `chart_error` says why.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionsOverview {
    pub areas: Vec<ProportionalArea>,
    pub breakdown: Vec<ProportionalArea>,
    pub chart: Option<ChartData>,
    pub chart_error: Option<String>,
}

fn series_points(series: Option<&AmountOverTime>) -> Vec<DataPoint> {
    series
        .map(|s| s.nodes.iter().map(DataPoint::from).collect())
        .unwrap_or_default()
}

pub fn transactions_overview(
    host: &HostStats,
    interval: &DateInterval,
    now: DateTime<Utc>,
    config: &Config,
) -> TransactionsOverview {
    let formatter = LocaleFormatter::new(config.locale.as_str());

    let (chart, chart_error) = match overview_chart(host, interval, now, config, &formatter) {
        Ok(chart) => (Some(chart), None),
        Err(e) => {
            tracing::warn!("No transactions chart for {}: {}", host.slug, e);
            (None, Some(e.to_string()))
        }
    };

    TransactionsOverview {
        areas: transactions_area(host, formatter.locale()),
        breakdown: transactions_breakdown(host),
        chart,
        chart_error,
    }
}

fn overview_chart(
    host: &HostStats,
    interval: &DateInterval,
    now: DateTime<Utc>,
    config: &Config,
    formatter: &LocaleFormatter,
) -> ReportResult<ChartData> {
    let (from, to) = interval.resolve(host.created_at, now)?;

    let contributions = host
        .contribution_stats
        .as_ref()
        .and_then(|s| s.contribution_amount_over_time.as_ref());
    let expenses = host
        .expense_stats
        .as_ref()
        .and_then(|s| s.expense_amount_over_time.as_ref());

    // The contributions series drives the bucket width for both lines.
    let granularity: Granularity = contributions
        .and_then(|s| s.time_unit.as_deref())
        .ok_or_else(|| ReportError::UnsupportedGranularity("<none>".into()))?
        .parse()?;

    let window = BucketWindow::new(from, to, granularity)?;
    let inputs = [
        SeriesInput::new(
            "Contributions",
            Some(CONTRIBUTIONS_COLOR),
            series_points(contributions),
        ),
        SeriesInput::new("Expenses", Some(EXPENSES_COLOR), series_points(expenses)),
    ];

    let chart = Bucketizer::new(now, formatter)
        .with_mode(config.bucket_mode)
        .chart(&window, &inputs)?;

    tracing::debug!(
        "Transactions overview for {}: {} buckets from {} to {}",
        host.slug,
        chart.labels.len(),
        from,
        to
    );

    Ok(chart)
}
