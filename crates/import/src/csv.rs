use chrono::NaiveDate;
use ledgerlens_core::{Money, Transaction};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: invalid amount '{value}'")]
    InvalidAmount { row: usize, value: String },
    #[error("row {row}: missing {field} field")]
    MissingField { row: usize, field: &'static str },
}

/// Parse a primary bank export: headerless rows of `date, amount,
/// description`, dates day-first.
///
/// All-or-nothing: the first row whose date or amount does not parse aborts
/// the batch with its 1-based row number, so a truncated ledger is never
/// silently imported. Zero-amount rows are reconciliation artifacts and are
/// dropped without error.
pub fn parse_bank_csv<R: Read>(data: R) -> Result<Vec<Transaction>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut transactions = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let record = result?;

        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let date_field = record
            .get(0)
            .ok_or(ImportError::MissingField { row, field: "date" })?;
        let date = parse_day_first_date(date_field).ok_or_else(|| ImportError::InvalidDate {
            row,
            value: date_field.to_string(),
        })?;

        let amount_field = record.get(1).ok_or(ImportError::MissingField {
            row,
            field: "amount",
        })?;
        let money = parse_amount(amount_field).ok_or_else(|| ImportError::InvalidAmount {
            row,
            value: amount_field.to_string(),
        })?;
        if money.is_zero() {
            continue;
        }

        let description = record.get(2).unwrap_or_default();
        transactions.push(Transaction::new(date, money, description));
    }

    Ok(transactions)
}

/// One row of the payment-processor export, reduced to the fields the
/// matcher consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryRecord {
    pub date: NaiveDate,
    pub name: String,
    pub transaction_type: String,
    pub status: String,
    pub currency: String,
    pub amount: Money,
    pub fees: Money,
    pub total: Money,
    pub transaction_id: String,
    pub item_title: String,
}

/// Parse the secondary processor export: header-keyed, fixed schema.
///
/// Tolerant per field since this data only enriches the ledger: missing
/// fields default to empty/zero, and a date that will not parse is logged
/// and replaced with `today` rather than aborting the batch. Only transport
/// level failures (IO, malformed CSV) surface as errors.
pub fn parse_secondary_csv<R: Read>(
    data: R,
    today: NaiveDate,
) -> Result<Vec<SecondaryRecord>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let columns: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_lowercase(), idx))
        .collect();

    let field = |record: &csv::StringRecord, name: &str| -> String {
        columns
            .get(name)
            .and_then(|&idx| record.get(idx))
            .unwrap_or_default()
            .to_string()
    };

    let mut records = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let date_field = field(&record, "date");
        let date = parse_day_first_date(&date_field).unwrap_or_else(|| {
            tracing::warn!(
                row = idx + 1,
                value = %date_field,
                "unresolvable date in secondary export, falling back to today"
            );
            today
        });

        records.push(SecondaryRecord {
            date,
            name: field(&record, "name"),
            transaction_type: field(&record, "type"),
            status: field(&record, "status"),
            currency: field(&record, "currency"),
            amount: parse_amount(&field(&record, "amount")).unwrap_or_else(Money::zero),
            fees: parse_amount(&field(&record, "fees")).unwrap_or_else(Money::zero),
            total: parse_amount(&field(&record, "total")).unwrap_or_else(Money::zero),
            transaction_id: field(&record, "transaction id"),
            item_title: field(&record, "item title"),
        });
    }

    Ok(records)
}

/// Day-first `DD/MM/YYYY` with ISO fallback. Day-first goes first because
/// it is unambiguous for the primary bank format even when day > 12.
fn parse_day_first_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%d/%m/%Y")
        .or_else(|_| NaiveDate::from_str(s))
        .ok()
}

/// Strip quoting, currency symbols, and thousands separators, then parse as
/// decimal. Accounting-style parentheses mean negative.
fn parse_amount(s: &str) -> Option<Money> {
    let s = s.trim();
    let (negative, s) = if s.starts_with('(') && s.ends_with(')') && s.len() >= 2 {
        (true, &s[1..s.len() - 1])
    } else {
        (false, s)
    };
    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, ',' | '"' | '$' | '£' | '€' | '+' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let mut dec = Decimal::from_str(&cleaned).ok()?;
    if negative {
        dec = -dec;
    }
    Some(Money::from_decimal(dec))
}
