use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::fingerprint::transaction_id;
use super::money::Money;

/// Metadata folded into a bank transaction when a payment-processor match
/// is applied. Advisory only; no computation requires it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondarySourceData {
    pub name: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub transaction_id: String,
    pub match_confidence: f64,
    pub match_reason: String,
}

/// Flow type used for aggregation. Every transaction falls into exactly one
/// of these; Income Offset is a subset of `Income`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Expense,
    Income,
    Investment,
}

/// The canonical ledger entry, independent of source format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Content-derived identity: a pure function of (date, money,
    /// description). Re-importing the same rows yields the same ids, which
    /// is what makes re-upload dedup a set operation.
    pub id: String,
    pub date: NaiveDate,
    pub money: Money,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(rename = "isIncome")]
    pub is_income: bool,
    #[serde(
        rename = "secondarySourceData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub secondary: Option<SecondarySourceData>,
}

impl Transaction {
    pub fn new(date: NaiveDate, money: Money, description: &str) -> Self {
        let description = description.trim().to_string();
        Transaction {
            id: transaction_id(date, money, &description),
            date,
            money,
            is_income: money.is_positive(),
            description,
            category: None,
            secondary: None,
        }
    }

    /// Category override first, then sign: Income Offset counts as income
    /// even though it is recorded as an outflow.
    pub fn flow(&self) -> Flow {
        match self.category {
            Some(Category::IncomeOffset) => Flow::Income,
            Some(Category::Investment) if !self.is_income => Flow::Investment,
            _ if self.is_income => Flow::Income,
            _ => Flow::Expense,
        }
    }

    pub fn category_label(&self) -> &str {
        self.category
            .as_ref()
            .map(Category::label)
            .unwrap_or("Uncategorized")
    }
}
