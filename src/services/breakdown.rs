//! Segments for the proportional bars shown above the transactions chart.
//!
//! Segment widths are fixed per layout and are not derived from the counts
//! they display: two halves for contributions/expenses, quarters for the
//! four-way breakdown, and 0.166 for every segment once grants appear.

use crate::format::format_currency;
use crate::models::{HostStats, ProportionalArea};

const HALF: f64 = 0.5;
const QUARTER: f64 = 0.25;
const WITH_GRANTS: f64 = 0.166;

fn plural(count: u64, one: &str, other: &str) -> String {
    if count == 1 {
        format!("{} {}", count, one)
    } else {
        format!("{} {}", count, other)
    }
}

/// Contributions vs expenses, with counts and daily averages.
pub fn transactions_area(host: &HostStats, locale: &str) -> Vec<ProportionalArea> {
    let currency = host.currency.as_deref().unwrap_or("USD");
    let contributions = host.contribution_stats.clone().unwrap_or_default();
    let expenses = host.expense_stats.clone().unwrap_or_default();

    let income_average = contributions
        .daily_average_income_amount
        .as_ref()
        .map_or(0, |a| a.cents());
    let expense_average = expenses
        .daily_average_amount
        .as_ref()
        .map_or(0, |a| a.cents());

    vec![
        ProportionalArea::new(
            "contributions",
            HALF,
            "green.500",
            format!(
                "{} | Daily average: {}",
                plural(contributions.contributions_count, "contribution", "contributions"),
                format_currency(income_average, currency, locale)
            ),
        ),
        ProportionalArea::new(
            "expenses",
            HALF,
            "red.500",
            format!(
                "{} | Daily average: {}",
                plural(expenses.expenses_count, "expense", "expenses"),
                format_currency(expense_average, currency, locale)
            ),
        ),
    ]
}

/// One-time, recurring, invoices, reimbursements and (only when present) grants.
pub fn transactions_breakdown(host: &HostStats) -> Vec<ProportionalArea> {
    let contributions = host.contribution_stats.clone().unwrap_or_default();
    let expenses = host.expense_stats.clone().unwrap_or_default();
    let has_grants = expenses.grants_count > 0;
    let share = if has_grants { WITH_GRANTS } else { QUARTER };

    let mut areas = vec![
        ProportionalArea::new(
            "one-time",
            share,
            "green.400",
            plural(contributions.one_time_contributions_count, "One-time", "One-time"),
        ),
        ProportionalArea::new(
            "recurring",
            share,
            "green.300",
            plural(contributions.recurring_contributions_count, "Recurring", "Recurring"),
        ),
        ProportionalArea::new(
            "invoices",
            share,
            "red.600",
            plural(expenses.invoices_count, "Invoice", "Invoices"),
        ),
        ProportionalArea::new(
            "receipts",
            share,
            "red.400",
            plural(expenses.reimbursements_count, "Reimbursement", "Reimbursements"),
        ),
    ];

    if has_grants {
        areas.push(ProportionalArea::new(
            "grants",
            WITH_GRANTS,
            "red.300",
            plural(expenses.grants_count, "Grant", "Grants"),
        ));
    }

    areas
}
