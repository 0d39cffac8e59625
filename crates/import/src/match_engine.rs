use ledgerlens_core::{SecondarySourceData, Transaction};

use crate::csv::SecondaryRecord;

/// Additive confidence weights. Amount dominates because amount collisions
/// are rare in real statements; the textual signals only corroborate.
const AMOUNT_WEIGHT: f64 = 0.60;
const DATE_WEIGHT: f64 = 0.40;
const NAME_WEIGHT: f64 = 0.20;
const KEYWORD_WEIGHT: f64 = 0.10;

/// Processor type labels that are internal transfers or account funding,
/// not real external payments. Compared lowercase.
const INTERNAL_TYPES: &[&str] = &["standard transfer", "bank transfer", "funding"];

/// Generic processor keywords used for the co-occurrence bonus.
const SERVICE_KEYWORDS: &[&str] = &["venmo", "paypal", "payment"];

/// A proposed pairing of one bank transaction and one secondary record.
/// Ephemeral: nothing is persisted until `apply_match` folds it into the
/// bank transaction.
#[derive(Debug, Clone)]
pub struct ProposedMatch {
    pub bank_id: String,
    pub secondary: SecondaryRecord,
    pub confidence: f64,
    pub reason: String,
}

pub struct MatchEngine {
    pub amount_tolerance_cents: i64,
    pub date_window_days: i64,
    /// Strictly-exceeded acceptance bar. At 0.80 the textual bonuses alone
    /// (0.30 combined) can never produce a match without amount agreement.
    pub threshold: f64,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self {
            amount_tolerance_cents: 1,
            date_window_days: 3,
            threshold: 0.80,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Signals {
    amount: bool,
    date_diff: Option<i64>,
    name: bool,
    keyword: bool,
}

impl MatchEngine {
    pub fn new(amount_tolerance_cents: i64, date_window_days: i64, threshold: f64) -> Self {
        Self {
            amount_tolerance_cents,
            date_window_days,
            threshold,
        }
    }

    /// Propose at most one match per secondary record: its best-scoring
    /// bank partner, kept only if the score strictly exceeds the threshold.
    ///
    /// Ties break by scan order (first seen wins). One bank transaction may
    /// be the best partner for several secondary records; global one-to-one
    /// assignment is not enforced at these data volumes.
    pub fn find_matches(
        &self,
        bank: &[Transaction],
        secondary: &[SecondaryRecord],
    ) -> Vec<ProposedMatch> {
        secondary
            .iter()
            .filter(|rec| is_matchable(rec))
            .filter_map(|rec| self.best_match(bank, rec))
            .collect()
    }

    fn best_match(&self, bank: &[Transaction], rec: &SecondaryRecord) -> Option<ProposedMatch> {
        let mut best: Option<(f64, Signals, &Transaction)> = None;

        for tx in bank {
            let signals = self.score_signals(tx, rec);
            let score = self.score(signals);
            // Strict comparison keeps the first-seen candidate on ties.
            if best.map_or(true, |(prev, _, _)| score > prev) {
                best = Some((score, signals, tx));
            }
        }

        let (score, signals, tx) = best?;
        if score <= self.threshold {
            return None;
        }

        Some(ProposedMatch {
            bank_id: tx.id.clone(),
            secondary: rec.clone(),
            confidence: score,
            reason: describe(signals),
        })
    }

    fn score_signals(&self, tx: &Transaction, rec: &SecondaryRecord) -> Signals {
        // Tolerant secondary parsing can leave `total` at zero; fall back
        // to the gross amount in that case.
        let rec_amount = if rec.total.is_zero() { rec.amount } else { rec.total };
        let amount =
            (tx.money.abs().to_cents() - rec_amount.abs().to_cents()).abs()
                <= self.amount_tolerance_cents;

        let days = (tx.date - rec.date).num_days().abs();
        let date_diff = (days <= self.date_window_days).then_some(days);

        let description = tx.description.to_lowercase();
        let counterparty = rec.name.trim().to_lowercase();
        let name = !counterparty.is_empty() && description.contains(&counterparty);

        let type_text = rec.transaction_type.to_lowercase();
        let keyword = SERVICE_KEYWORDS.iter().any(|kw| {
            description.contains(kw) || counterparty.contains(kw) || type_text.contains(kw)
        });

        Signals {
            amount,
            date_diff,
            name,
            keyword,
        }
    }

    fn score(&self, signals: Signals) -> f64 {
        let mut score = 0.0;
        if signals.amount {
            score += AMOUNT_WEIGHT;
        }
        // Flat bonus anywhere inside the window: settlement delay makes the
        // exact day uninformative.
        if signals.date_diff.is_some() {
            score += DATE_WEIGHT;
        }
        if signals.name {
            score += NAME_WEIGHT;
        }
        if signals.keyword {
            score += KEYWORD_WEIGHT;
        }
        score.min(1.0)
    }
}

/// Pre-filter: only completed, external payments take part in matching.
/// An empty status is kept since tolerant parsing may have dropped it.
pub fn is_matchable(rec: &SecondaryRecord) -> bool {
    let type_label = rec.transaction_type.trim().to_lowercase();
    if INTERNAL_TYPES.contains(&type_label.as_str()) {
        return false;
    }
    let status = rec.status.trim().to_lowercase();
    status.is_empty() || status == "complete"
}

/// Advisory text for the reviewing user. Enumerates the criteria that
/// fired; worded independently of the numeric weights.
fn describe(signals: Signals) -> String {
    let mut parts = Vec::new();
    if signals.amount {
        parts.push("Exact amount match".to_string());
    }
    match signals.date_diff {
        Some(0) => parts.push("Same day transaction".to_string()),
        Some(_) => parts.push("Within 3 days".to_string()),
        None => {}
    }
    if signals.name {
        parts.push("Name match in description".to_string());
    }
    if signals.keyword {
        parts.push("Payment service keyword".to_string());
    }
    parts.join(", ")
}

/// Make a proposed match permanent: annotate the description and attach the
/// processor metadata. Identity, date, amount, and category are untouched.
pub fn apply_match(tx: &mut Transaction, proposed: &ProposedMatch) {
    let name = proposed.secondary.name.trim();
    if !name.is_empty() {
        tx.description.push_str(&format!(" ({name})"));
    }
    tx.secondary = Some(SecondarySourceData {
        name: name.to_string(),
        transaction_type: proposed.secondary.transaction_type.clone(),
        transaction_id: proposed.secondary.transaction_id.clone(),
        match_confidence: proposed.confidence,
        match_reason: proposed.reason.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerlens_core::Money;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bank_tx(d: NaiveDate, cents: i64, desc: &str) -> Transaction {
        Transaction::new(d, Money::from_cents(cents), desc)
    }

    fn record(d: NaiveDate, name: &str, total_cents: i64) -> SecondaryRecord {
        SecondaryRecord {
            date: d,
            name: name.to_string(),
            transaction_type: "Payment".to_string(),
            status: "Complete".to_string(),
            currency: "AUD".to_string(),
            amount: Money::from_cents(total_cents),
            fees: Money::zero(),
            total: Money::from_cents(total_cents),
            transaction_id: "4210001".to_string(),
            item_title: String::new(),
        }
    }

    #[test]
    fn amount_and_date_agreement_matches() {
        let engine = MatchEngine::default();
        let bank = vec![bank_tx(date(2025, 7, 27), -2300, "TRANSFER OUT")];
        let secondary = vec![record(date(2025, 7, 28), "Jane Doe", -2300)];
        let matches = engine.find_matches(&bank, &secondary);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].bank_id, bank[0].id);
        assert!((matches[0].confidence - 1.0).abs() < 1e-9);
        assert!(matches[0].reason.contains("Exact amount match"));
        assert!(matches[0].reason.contains("Within 3 days"));
    }

    #[test]
    fn textual_signals_alone_never_match() {
        // Amount off by dollars, date off by a week: name + keyword bonuses
        // cap at 0.30, far below the bar.
        let engine = MatchEngine::default();
        let bank = vec![bank_tx(date(2025, 7, 27), -9900, "VENMO PAYMENT Jane Doe")];
        let secondary = vec![record(date(2025, 7, 6), "Jane Doe", -2300)];
        assert!(engine.find_matches(&bank, &secondary).is_empty());
    }

    #[test]
    fn amount_alone_is_below_threshold() {
        let engine = MatchEngine::default();
        let bank = vec![bank_tx(date(2025, 7, 27), -2300, "CARD 1234")];
        let secondary = vec![record(date(2025, 6, 1), "Jane Doe", -2300)];
        assert!(engine.find_matches(&bank, &secondary).is_empty());
    }

    #[test]
    fn date_alone_is_below_threshold() {
        let engine = MatchEngine::default();
        let bank = vec![bank_tx(date(2025, 7, 27), -9900, "CARD 1234")];
        let secondary = vec![record(date(2025, 7, 27), "Jane Doe", -2300)];
        assert!(engine.find_matches(&bank, &secondary).is_empty());
    }

    #[test]
    fn one_cent_tolerance() {
        let engine = MatchEngine::default();
        let bank = vec![bank_tx(date(2025, 7, 27), -2301, "TRANSFER")];
        let secondary = vec![record(date(2025, 7, 27), "Jane Doe", -2300)];
        assert_eq!(engine.find_matches(&bank, &secondary).len(), 1);

        let bank = vec![bank_tx(date(2025, 7, 27), -2302, "TRANSFER")];
        assert!(engine.find_matches(&bank, &secondary).is_empty());
    }

    #[test]
    fn best_candidate_wins_and_first_seen_breaks_ties() {
        let engine = MatchEngine::default();
        let bank = vec![
            bank_tx(date(2025, 7, 27), -2300, "TRANSFER OUT"),
            bank_tx(date(2025, 7, 27), -2300, "VENMO Jane Doe"),
            bank_tx(date(2025, 7, 27), -2300, "ANOTHER TRANSFER"),
        ];
        let secondary = vec![record(date(2025, 7, 27), "Jane Doe", -2300)];
        let matches = engine.find_matches(&bank, &secondary);
        // Name + keyword make the second transaction strictly better.
        assert_eq!(matches[0].bank_id, bank[1].id);

        // With identical candidates the first in scan order is kept.
        let bank = vec![
            bank_tx(date(2025, 7, 27), -2300, "TRANSFER A"),
            bank_tx(date(2025, 7, 27), -2300, "TRANSFER B"),
        ];
        let matches = engine.find_matches(&bank, &secondary);
        assert_eq!(matches[0].bank_id, bank[0].id);
    }

    #[test]
    fn same_day_reason_wording() {
        let engine = MatchEngine::default();
        let bank = vec![bank_tx(date(2025, 7, 27), -2300, "VENMO Jane Doe")];
        let secondary = vec![record(date(2025, 7, 27), "Jane Doe", -2300)];
        let matches = engine.find_matches(&bank, &secondary);
        assert!(matches[0].reason.contains("Same day transaction"));
        assert!(matches[0].reason.contains("Name match in description"));
    }

    #[test]
    fn internal_transfers_are_prefiltered() {
        let engine = MatchEngine::default();
        let bank = vec![bank_tx(date(2025, 7, 27), -2300, "TRANSFER")];
        let mut rec = record(date(2025, 7, 27), "Jane Doe", -2300);
        rec.transaction_type = "Standard Transfer".to_string();
        assert!(!is_matchable(&rec));
        assert!(engine.find_matches(&bank, &[rec]).is_empty());
    }

    #[test]
    fn incomplete_records_are_prefiltered() {
        let mut rec = record(date(2025, 7, 27), "Jane Doe", -2300);
        rec.status = "Pending".to_string();
        assert!(!is_matchable(&rec));
        rec.status = String::new();
        assert!(is_matchable(&rec));
    }

    #[test]
    fn zero_total_falls_back_to_amount() {
        let engine = MatchEngine::default();
        let bank = vec![bank_tx(date(2025, 7, 27), -2300, "TRANSFER")];
        let mut rec = record(date(2025, 7, 27), "Jane Doe", -2300);
        rec.total = Money::zero();
        assert_eq!(engine.find_matches(&bank, &[rec]).len(), 1);
    }

    #[test]
    fn apply_match_mutates_only_description_and_metadata() {
        let engine = MatchEngine::default();
        let mut tx = bank_tx(date(2025, 7, 27), -2300, "TRANSFER OUT");
        let secondary = vec![record(date(2025, 7, 27), "Jane Doe", -2300)];
        let matches = engine.find_matches(std::slice::from_ref(&tx), &secondary);

        let before = tx.clone();
        apply_match(&mut tx, &matches[0]);

        assert_eq!(tx.id, before.id);
        assert_eq!(tx.date, before.date);
        assert_eq!(tx.money, before.money);
        assert_eq!(tx.category, before.category);
        assert_eq!(tx.description, "TRANSFER OUT (Jane Doe)");
        let attached = tx.secondary.unwrap();
        assert_eq!(attached.name, "Jane Doe");
        assert_eq!(attached.transaction_id, "4210001");
        assert!(attached.match_confidence > 0.8);
    }
}
