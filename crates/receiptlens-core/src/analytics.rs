//! Spending analytics over recorded transactions.
//!
//! All functions take `now` explicitly so reports are reproducible.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::config::AnalyticsConfig;
use crate::models::receipt::{Budget, Transaction};

/// Total spend in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySpendPoint {
    /// Month as `YYYY-MM`.
    pub month: String,
    pub total_amount: Decimal,
}

/// Total spend in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub total_amount: Decimal,
}

/// A category that is near or over its monthly budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub category: String,
    pub spent: Decimal,
    pub limit: Decimal,
    /// Spent as a percentage of the limit, two decimal places.
    pub percentage: Decimal,
    /// Negative while under budget.
    pub over_by: Decimal,
}

/// All reports for one user at one point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingReport {
    pub generated_at: NaiveDateTime,
    pub current_month_spend: Decimal,
    pub monthly_spend: Vec<MonthlySpendPoint>,
    pub category_breakdown: Vec<CategorySpend>,
    pub budget_alerts: Vec<BudgetAlert>,
}

impl SpendingReport {
    pub fn build(
        transactions: &[Transaction],
        budgets: &[Budget],
        now: NaiveDateTime,
        config: &AnalyticsConfig,
    ) -> Self {
        Self {
            generated_at: now,
            current_month_spend: current_month_spend(transactions, now),
            monthly_spend: monthly_spend(transactions, now, config.months),
            category_breakdown: category_breakdown(transactions, now, config.months),
            budget_alerts: budget_alerts(transactions, budgets, now, config.alert_threshold),
        }
    }
}

/// Transactions dated within `[now - months, now]`.
fn in_window<'a>(
    transactions: &'a [Transaction],
    now: NaiveDateTime,
    months: u32,
) -> impl Iterator<Item = &'a Transaction> {
    let start = now
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDateTime::MIN);
    transactions
        .iter()
        .filter(move |t| t.transaction_date >= start && t.transaction_date <= now)
}

fn month_start(now: NaiveDateTime) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(now)
}

/// Monthly totals over the last `months` months, oldest first.
pub fn monthly_spend(transactions: &[Transaction], now: NaiveDateTime, months: u32) -> Vec<MonthlySpendPoint> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in in_window(transactions, now, months) {
        let total = totals
            .entry(txn.transaction_date.format("%Y-%m").to_string())
            .or_default();
        *total = add_amount(*total, txn.amount);
    }

    totals
        .into_iter()
        .map(|(month, total_amount)| MonthlySpendPoint { month, total_amount })
        .collect()
}

/// Category totals over the last `months` months, largest first.
pub fn category_breakdown(transactions: &[Transaction], now: NaiveDateTime, months: u32) -> Vec<CategorySpend> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for txn in in_window(transactions, now, months) {
        let total = totals.entry(txn.category.as_str()).or_default();
        *total = add_amount(*total, txn.amount);
    }

    let mut breakdown: Vec<CategorySpend> = totals
        .into_iter()
        .map(|(category, total_amount)| CategorySpend {
            category: category.to_string(),
            total_amount,
        })
        .collect();
    // Stable sort keeps ties in category-name order.
    breakdown.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    breakdown
}

/// Spend in the calendar month containing `now`, up to `now`.
pub fn current_month_spend(transactions: &[Transaction], now: NaiveDateTime) -> Decimal {
    let start = month_start(now);
    transactions
        .iter()
        .filter(|t| t.transaction_date >= start && t.transaction_date <= now)
        .fold(Decimal::ZERO, |acc, t| add_amount(acc, t.amount))
}

/// Alerts for budgets whose month-to-date spend reached `alert_threshold`
/// (a fraction, e.g. `0.8`) of the limit, or exceeded the limit.
pub fn budget_alerts(
    transactions: &[Transaction],
    budgets: &[Budget],
    now: NaiveDateTime,
    alert_threshold: f64,
) -> Vec<BudgetAlert> {
    let start = month_start(now);
    let threshold = threshold_percent(alert_threshold);
    let hundred = Decimal::ONE_HUNDRED;

    budgets
        .iter()
        .filter_map(|budget| {
            let spent: Decimal = transactions
                .iter()
                .filter(|t| t.category == budget.category)
                .filter(|t| t.transaction_date >= start && t.transaction_date <= now)
                .fold(Decimal::ZERO, |acc, t| add_amount(acc, t.amount));

            let percentage = if budget.monthly_limit > Decimal::ZERO {
                spent
                    .checked_div(budget.monthly_limit)
                    .and_then(|p| p.checked_mul(hundred))
                    .unwrap_or_else(|| {
                        warn!(
                            "Budget {}: percentage of {} over {} out of range, saturating",
                            budget.category, spent, budget.monthly_limit
                        );
                        Decimal::MAX
                    })
            } else {
                Decimal::ZERO
            };
            let over_by = spent.saturating_sub(budget.monthly_limit);

            debug!(
                "Budget {}: spent {} of {} ({}%)",
                budget.category, spent, budget.monthly_limit, percentage
            );

            (percentage >= threshold || over_by > Decimal::ZERO).then(|| BudgetAlert {
                category: budget.category.clone(),
                spent,
                limit: budget.monthly_limit,
                percentage: percentage.round_dp(2),
                over_by,
            })
        })
        .collect()
}

/// Sum two amounts, saturating at the `Decimal` range.
fn add_amount(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!("Spend total overflowed adding {}, saturating", amount);
        total.saturating_add(amount)
    })
}

/// Convert a fractional threshold to an exact percentage.
///
/// Goes through the shortest decimal rendering so `0.8` becomes exactly `80`.
fn threshold_percent(alert_threshold: f64) -> Decimal {
    Decimal::from_str(&alert_threshold.to_string()).unwrap_or(Decimal::ONE) * Decimal::ONE_HUNDRED
}
