use ledgerlens_core::Transaction;

/// Ordinary least-squares slope of signed amount against chronological
/// index. The x axis is the transaction's position in date order, not
/// elapsed time, so the spacing is uniform by count.
///
/// Degenerate inputs (fewer than two points, or a zero denominator) yield a
/// slope of 0 rather than NaN.
pub fn trend_slope(transactions: &[Transaction]) -> f64 {
    if transactions.len() < 2 {
        return 0.0;
    }

    let mut ordered: Vec<&Transaction> = transactions.iter().collect();
    ordered.sort_by_key(|tx| tx.date);

    let n = ordered.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, tx) in ordered.iter().enumerate() {
        let x = i as f64;
        let y = tx.money.to_f64();
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}
