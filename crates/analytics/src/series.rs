use chrono::NaiveDate;
use ledgerlens_core::{Flow, Money, Transaction};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub balance: Money,
}

fn chronological(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|tx| tx.date);
    ordered
}

fn accumulate<F>(transactions: &[Transaction], start: Money, contribution: F) -> Vec<SeriesPoint>
where
    F: Fn(&Transaction) -> Money,
{
    let mut balance = start;
    chronological(transactions)
        .into_iter()
        .map(|tx| {
            balance = balance + contribution(tx);
            SeriesPoint {
                date: tx.date,
                balance,
            }
        })
        .collect()
}

/// Running sum of signed amounts from zero: net change only, one point per
/// transaction in date order.
pub fn running_balance(transactions: &[Transaction]) -> Vec<SeriesPoint> {
    accumulate(transactions, Money::zero(), |tx| tx.money)
}

/// Balance series calibrated to a known current balance: the starting
/// balance is `current` minus the net change over the whole set, so the
/// final point equals `current` exactly. Decimal arithmetic keeps the
/// anchor exact over arbitrarily long chains.
pub fn anchored_balance(transactions: &[Transaction], current: Money) -> Vec<SeriesPoint> {
    let net: Money = transactions.iter().map(|tx| tx.money).sum();
    accumulate(transactions, current - net, |tx| tx.money)
}

/// Net-worth variant of the relative series: an Investment outflow moves
/// value between asset classes, so it accumulates as a positive amount
/// instead of a drain.
pub fn running_net_worth(transactions: &[Transaction]) -> Vec<SeriesPoint> {
    accumulate(transactions, Money::zero(), |tx| match tx.flow() {
        Flow::Investment => tx.money.abs(),
        _ => tx.money,
    })
}
