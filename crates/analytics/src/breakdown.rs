use ledgerlens_core::{palette_index, Flow, Money, Transaction};
use serde::Serialize;
use std::collections::HashMap;

/// How many categories the dashboard shows.
const TOP_CATEGORIES: usize = 5;

/// Well-known category colors.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("Groceries", "#4caf50"),
    ("Rent", "#f44336"),
    ("Utilities", "#ff9800"),
    ("Transport", "#2196f3"),
    ("Dining", "#9c27b0"),
    ("Entertainment", "#e91e63"),
    ("Health", "#00bcd4"),
    ("Shopping", "#795548"),
    ("Subscriptions", "#607d8b"),
    ("Uncategorized", "#9e9e9e"),
];

/// Fallback palette for user-defined categories, indexed by FNV-1a of the
/// name so a recurring custom category always renders the same color.
const FALLBACK_PALETTE: &[&str] = &[
    "#e57373", "#64b5f6", "#81c784", "#ffb74d", "#ba68c8", "#4db6ac", "#f06292", "#a1887f",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub name: String,
    pub total: Money,
    pub color: String,
}

pub fn color_for(name: &str) -> &'static str {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, color)| *color)
        .unwrap_or_else(|| FALLBACK_PALETTE[palette_index(name, FALLBACK_PALETTE.len())])
}

/// Top spending categories by absolute expense amount. Uncategorized
/// expenses land in an "Uncategorized" bucket. Ordering is deterministic:
/// amount descending, then name ascending on equal amounts.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategorySpend> {
    let mut by_category: HashMap<&str, Money> = HashMap::new();
    for tx in transactions {
        if tx.flow() != Flow::Expense {
            continue;
        }
        let entry = by_category.entry(tx.category_label()).or_insert_with(Money::zero);
        *entry = *entry + tx.money.abs();
    }

    let mut spends: Vec<CategorySpend> = by_category
        .into_iter()
        .map(|(name, total)| CategorySpend {
            name: name.to_string(),
            total,
            color: color_for(name).to_string(),
        })
        .collect();

    spends.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    spends.truncate(TOP_CATEGORIES);
    spends
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerlens_core::Category;

    fn tx(cents: i64, category: Option<&str>) -> Transaction {
        let mut t = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 7, 27).unwrap(),
            Money::from_cents(cents),
            "x",
        );
        t.category = category.map(Category::from_label);
        t
    }

    #[test]
    fn groups_absolute_expenses_by_category() {
        let txs = vec![
            tx(-1000, Some("Groceries")),
            tx(-2000, Some("Groceries")),
            tx(-500, Some("Transport")),
            tx(-300, None),
        ];
        let breakdown = category_breakdown(&txs);
        assert_eq!(breakdown[0].name, "Groceries");
        assert_eq!(breakdown[0].total, Money::from_cents(3000));
        assert_eq!(breakdown[1].name, "Transport");
        assert_eq!(breakdown[2].name, "Uncategorized");
    }

    #[test]
    fn income_and_special_flows_are_excluded() {
        let txs = vec![
            tx(5000, Some("Groceries")), // refund inflow: income, not expense
            tx(-5000, Some("Investment")),
            tx(-5000, Some("Income Offset")),
        ];
        assert!(category_breakdown(&txs).is_empty());
    }

    #[test]
    fn truncates_to_top_five() {
        let txs: Vec<Transaction> = (0..8)
            .map(|i| tx(-100 * (i + 1), Some(&format!("Cat{i}"))))
            .collect();
        let breakdown = category_breakdown(&txs);
        assert_eq!(breakdown.len(), 5);
        // Largest amount first.
        assert_eq!(breakdown[0].name, "Cat7");
    }

    #[test]
    fn equal_amounts_order_by_name() {
        let txs = vec![tx(-1000, Some("Zebra")), tx(-1000, Some("Apple"))];
        let breakdown = category_breakdown(&txs);
        assert_eq!(breakdown[0].name, "Apple");
        assert_eq!(breakdown[1].name, "Zebra");
    }

    #[test]
    fn known_names_use_the_fixed_palette() {
        assert_eq!(color_for("Groceries"), "#4caf50");
        assert_eq!(color_for("Uncategorized"), "#9e9e9e");
    }

    #[test]
    fn unknown_names_hash_into_fallback_palette_deterministically() {
        let color = color_for("Llama Upkeep");
        assert_eq!(color, color_for("Llama Upkeep"));
        assert!(FALLBACK_PALETTE.contains(&color));
    }
}
