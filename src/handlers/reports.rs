use axum::extract::State;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::date_utils::{deserialize_instant, DateInterval};
use crate::error::ReportResult;
use crate::format::LocaleFormatter;
use crate::models::{AmountNode, BucketWindow, ChartData, DataPoint, HostStats, SeriesInput};
use crate::services::bucketizer::Bucketizer;
use crate::services::overview::{transactions_overview, TransactionsOverview};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewRequest {
    pub host: HostStats,
    #[serde(default)]
    pub date_interval: DateInterval,
}

#[derive(Debug, Deserialize)]
pub struct TimeSeriesRequest {
    pub granularity: String,
    #[serde(deserialize_with = "deserialize_instant")]
    pub from: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_instant")]
    pub to: DateTime<Utc>,
    #[serde(default)]
    pub series: Vec<SeriesRequest>,
}

#[derive(Debug, Deserialize)]
pub struct SeriesRequest {
    pub name: String,
    pub color: Option<String>,
    #[serde(default)]
    pub nodes: Vec<AmountNode>,
}

pub async fn transactions_overview_report(
    State(state): State<AppState>,
    Json(request): Json<OverviewRequest>,
) -> Json<TransactionsOverview> {
    Json(transactions_overview(
        &request.host,
        &request.date_interval,
        state.now(),
        &state.config,
    ))
}

pub async fn time_series(
    State(state): State<AppState>,
    Json(request): Json<TimeSeriesRequest>,
) -> ReportResult<Json<ChartData>> {
    let window = BucketWindow::new(request.from, request.to, request.granularity.parse()?)?;

    let inputs: Vec<SeriesInput> = request
        .series
        .iter()
        .map(|s| SeriesInput {
            name: s.name.clone(),
            color: s.color.clone(),
            points: s.nodes.iter().map(DataPoint::from).collect(),
        })
        .collect();

    let formatter = LocaleFormatter::new(state.config.locale.as_str());
    let chart = Bucketizer::new(state.now(), &formatter)
        .with_mode(state.config.bucket_mode)
        .chart(&window, &inputs)?;

    Ok(Json(chart))
}
