//! Host statistics as returned by the reporting query.
//!
//! Field names follow the upstream camelCase payload; anything not sent
//! defaults to zero or absent.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::date_utils::{deserialize_instant, deserialize_optional_instant};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostStats {
    pub slug: String,
    pub currency: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_instant")]
    pub created_at: Option<DateTime<Utc>>,
    pub contribution_stats: Option<ContributionStats>,
    pub expense_stats: Option<ExpenseStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContributionStats {
    pub contributions_count: u64,
    pub one_time_contributions_count: u64,
    pub recurring_contributions_count: u64,
    pub daily_average_income_amount: Option<Amount>,
    pub contribution_amount_over_time: Option<AmountOverTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpenseStats {
    pub expenses_count: u64,
    pub invoices_count: u64,
    pub reimbursements_count: u64,
    pub grants_count: u64,
    pub daily_average_amount: Option<Amount>,
    pub expense_amount_over_time: Option<AmountOverTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Amount {
    pub value: f64,
    pub value_in_cents: Option<i64>,
}

impl Amount {
    /// Minor units; `valueInCents` is authoritative when sent.
    pub fn cents(&self) -> i64 {
        self.value_in_cents
            .unwrap_or_else(|| (self.value * 100.0).round() as i64)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AmountOverTime {
    pub time_unit: Option<String>,
    pub nodes: Vec<AmountNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AmountNode {
    #[serde(deserialize_with = "deserialize_instant")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub amount: Amount,
}
