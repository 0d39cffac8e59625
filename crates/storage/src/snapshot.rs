use chrono::{DateTime, Utc};
use ledgerlens_core::{CategoryDef, Money, Transaction};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted application state. Field names match the JSON document the
/// storage collaborator reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub categories: Vec<CategoryDef>,
    pub current_balance: Money,
    pub yearly_salary: Money,
    pub last_updated: DateTime<Utc>,
    pub version: u32,
}

impl Snapshot {
    pub fn new(now: DateTime<Utc>) -> Self {
        Snapshot {
            transactions: Vec::new(),
            categories: Vec::new(),
            current_balance: Money::zero(),
            yearly_salary: Money::zero(),
            last_updated: now,
            version: SNAPSHOT_VERSION,
        }
    }
}

/// The backup/restore document: the same transaction and category shapes,
/// without the scalar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<CategoryDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Overwrite the stored transactions and categories.
    Replace,
    /// Set-union by id (transactions) and name (categories); existing
    /// entries win on conflict.
    Combine,
}

/// Append the incoming transactions whose ids are not already present.
/// Because ids are content-derived, re-uploading the same export is a
/// no-op. Returns how many were added.
pub fn merge_transactions(existing: &mut Vec<Transaction>, incoming: Vec<Transaction>) -> usize {
    let known: HashSet<String> = existing.iter().map(|tx| tx.id.clone()).collect();
    let mut added = 0;
    for tx in incoming {
        if !known.contains(&tx.id) {
            existing.push(tx);
            added += 1;
        }
    }
    added
}

pub fn merge_backup(snapshot: &mut Snapshot, backup: Backup, mode: ImportMode) {
    match mode {
        ImportMode::Replace => {
            snapshot.transactions = backup.transactions;
            snapshot.categories = backup.categories;
        }
        ImportMode::Combine => {
            merge_transactions(&mut snapshot.transactions, backup.transactions);
            let known: HashSet<String> = snapshot
                .categories
                .iter()
                .map(|c| c.name.clone())
                .collect();
            snapshot
                .categories
                .extend(
                    backup
                        .categories
                        .into_iter()
                        .filter(|c| !known.contains(&c.name)),
                );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerlens_core::Category;

    fn tx(day: u32, cents: i64, desc: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 7, day).unwrap(),
            Money::from_cents(cents),
            desc,
        )
    }

    fn snapshot_with(txs: Vec<Transaction>) -> Snapshot {
        let mut s = Snapshot::new(Utc::now());
        s.transactions = txs;
        s
    }

    #[test]
    fn merge_transactions_dedups_by_id() {
        let mut existing = vec![tx(27, -2300, "Coles")];
        let added = merge_transactions(
            &mut existing,
            vec![tx(27, -2300, "Coles"), tx(28, 250000, "Salary deposit")],
        );
        assert_eq!(added, 1);
        assert_eq!(existing.len(), 2);
    }

    #[test]
    fn merge_transactions_existing_wins_on_conflict() {
        let mut categorized = tx(27, -2300, "Coles");
        categorized.category = Some(Category::Custom("Groceries".to_string()));
        let mut existing = vec![categorized.clone()];

        // Same id, but the incoming copy is uncategorized.
        merge_transactions(&mut existing, vec![tx(27, -2300, "Coles")]);
        assert_eq!(existing, vec![categorized]);
    }

    #[test]
    fn replace_overwrites_everything() {
        let mut snapshot = snapshot_with(vec![tx(1, -100, "old")]);
        snapshot.categories = vec![CategoryDef {
            name: "Old".to_string(),
            keywords: vec![],
        }];
        let backup = Backup {
            transactions: vec![tx(2, -200, "new")],
            categories: vec![],
        };
        merge_backup(&mut snapshot, backup, ImportMode::Replace);
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.transactions[0].description, "new");
        assert!(snapshot.categories.is_empty());
    }

    #[test]
    fn combine_unions_by_id_and_name() {
        let mut snapshot = snapshot_with(vec![tx(1, -100, "kept")]);
        snapshot.categories = vec![CategoryDef {
            name: "Groceries".to_string(),
            keywords: vec!["coles".to_string()],
        }];
        let backup = Backup {
            transactions: vec![tx(1, -100, "kept"), tx(2, -200, "added")],
            categories: vec![
                CategoryDef {
                    name: "Groceries".to_string(),
                    keywords: vec![], // conflicting copy loses
                },
                CategoryDef {
                    name: "Transport".to_string(),
                    keywords: vec![],
                },
            ],
        };
        merge_backup(&mut snapshot, backup, ImportMode::Combine);
        assert_eq!(snapshot.transactions.len(), 2);
        assert_eq!(snapshot.categories.len(), 2);
        assert_eq!(snapshot.categories[0].keywords, vec!["coles".to_string()]);
    }

    #[test]
    fn snapshot_json_round_trip() {
        let mut snapshot = Snapshot::new(Utc::now());
        let mut t = tx(27, -2300, "Coles");
        t.category = Some(Category::Custom("Groceries".to_string()));
        snapshot.transactions.push(t);
        snapshot.current_balance = Money::from_cents(123456);
        snapshot.yearly_salary = Money::from_cents(9000000);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn snapshot_json_uses_camel_case_keys() {
        let snapshot = Snapshot::new(Utc::now());
        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("currentBalance").is_some());
        assert!(value.get("yearlySalary").is_some());
        assert!(value.get("lastUpdated").is_some());
        assert_eq!(value["version"], SNAPSHOT_VERSION);
    }

    #[test]
    fn backup_tolerates_missing_sections() {
        let backup: Backup = serde_json::from_str(r#"{"transactions":[]}"#).unwrap();
        assert!(backup.categories.is_empty());
    }
}
