use ledgerlens_core::{Category, Flow, Money, Transaction};
use serde::Serialize;

/// Calendar-approximation constants for period averages. Deliberately not
/// calendar-exact; the error is negligible for dashboard figures.
const DAYS_PER_WEEK: f64 = 7.0;
const DAYS_PER_MONTH: f64 = 30.44;
const DAYS_PER_YEAR: f64 = 365.25;

/// Totals per flow type. All four figures are non-negative; signs live in
/// `net_change` only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expense: Money,
    pub investment: Money,
    /// Subset of `income`: inflows recorded as outflows (e.g. a flatmate's
    /// rent contribution), counted by absolute value.
    pub income_offset: Money,
    pub net_change: Money,
}

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = Money::zero();
    let mut expense = Money::zero();
    let mut investment = Money::zero();
    let mut income_offset = Money::zero();

    for tx in transactions {
        match tx.flow() {
            Flow::Income => {
                income = income + tx.money.abs();
                if tx.category == Some(Category::IncomeOffset) {
                    income_offset = income_offset + tx.money.abs();
                }
            }
            Flow::Expense => expense = expense + tx.money.abs(),
            Flow::Investment => investment = investment + tx.money.abs(),
        }
    }

    Totals {
        income,
        expense,
        investment,
        income_offset,
        net_change: income - expense - investment,
    }
}

/// Expense statistics over a transaction set. All zeros when the set has no
/// expenses; never NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ExpenseStats {
    pub daily_average: f64,
    pub weekly_average: f64,
    pub monthly_average: f64,
    pub yearly_average: f64,
    pub variance: f64,
    pub standard_deviation: f64,
}

pub fn expense_stats(transactions: &[Transaction]) -> ExpenseStats {
    let expenses: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.flow() == Flow::Expense)
        .collect();

    if expenses.is_empty() {
        return ExpenseStats::default();
    }

    let amounts: Vec<f64> = expenses.iter().map(|tx| tx.money.abs().to_f64()).collect();
    let total: f64 = amounts.iter().sum();

    // Inclusive day span between earliest and latest expense.
    let earliest = expenses.iter().map(|tx| tx.date).min().unwrap_or_default();
    let latest = expenses.iter().map(|tx| tx.date).max().unwrap_or_default();
    let span_days = ((latest - earliest).num_days() + 1) as f64;

    let daily_average = total / span_days;

    let mean = total / amounts.len() as f64;
    let variance = amounts
        .iter()
        .map(|a| (a - mean).powi(2))
        .sum::<f64>()
        / amounts.len() as f64;

    ExpenseStats {
        daily_average,
        weekly_average: daily_average * DAYS_PER_WEEK,
        monthly_average: daily_average * DAYS_PER_MONTH,
        yearly_average: daily_average * DAYS_PER_YEAR,
        variance,
        standard_deviation: variance.sqrt(),
    }
}
