//! Statement import: raw bank records to canonical transactions.
//!
//! The import boundary produces records with a signed amount in centavos.
//! Normalization converts that to a positive major-unit decimal, splits the
//! sign into the transaction kind, fixes the payment method to the import
//! channel, and leaves categorization to the keyword rules.

use crate::model::{Amount, CategoryRules, Kind, PaymentMethod, Transaction};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// One record from a bank-statement export file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    pub(crate) title: String,
    /// Signed amount in centavos: positive is income, negative is expense.
    pub(crate) amount: i64,
    /// ISO-8601 date or timestamp; only the date part is used.
    pub(crate) date: String,
}

/// A normalized statement record still waiting for a category.
#[derive(Debug, Clone, PartialEq)]
pub struct Imported {
    date: NaiveDate,
    description: String,
    amount: Amount,
    kind: Kind,
}

impl RawRecord {
    /// Converts the external sign-and-minor-unit convention into the
    /// canonical split of positive magnitude plus kind.
    pub fn normalize(&self) -> Result<Imported> {
        let date_part = self
            .date
            .get(..10)
            .with_context(|| format!("Date '{}' is too short for ISO-8601", self.date))?;
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .with_context(|| format!("Invalid ISO-8601 date '{}'", self.date))?;
        let kind = if self.amount > 0 {
            Kind::Income
        } else {
            Kind::Expense
        };
        Ok(Imported {
            date,
            description: self.title.clone(),
            amount: Amount::from_minor_units(self.amount.abs()),
            kind,
        })
    }
}

impl Imported {
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Finishes normalization by assigning a category from the keyword rules.
    pub fn categorize(self, rules: &CategoryRules) -> Transaction {
        let category = rules.classify(&self.description);
        Transaction {
            date: self.date,
            description: self.description,
            amount: self.amount,
            payment_method: PaymentMethod::CreditCard,
            category,
            kind: self.kind,
        }
    }
}

/// Reads raw records from a CSV statement export with `title,amount,date`
/// columns.
pub fn read_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Unable to open statement file {}", path.display()))?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: RawRecord = result.context("Malformed statement row")?;
        records.push(record);
    }
    Ok(records)
}

/// Drops transactions already present in the sheet, keyed on the
/// (description, date, value) triple carried by the sheet rows.
pub fn dedup(new: Vec<Transaction>, existing_rows: &[Vec<String>]) -> Vec<Transaction> {
    let seen: HashSet<String> = existing_rows
        .iter()
        .skip(1) // header
        .filter(|row| row.len() >= 3)
        .map(|row| dedup_key(&row[1], &row[0], &row[2]))
        .collect();

    new.into_iter()
        .filter(|transaction| {
            let row = transaction.to_row();
            !seen.contains(&dedup_key(&row[1], &row[0], &row[2]))
        })
        .collect()
}

fn dedup_key(description: &str, date: &str, value: &str) -> String {
    format!("{description}{date}{value}")
}
