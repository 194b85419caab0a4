//! The canonical transaction record and its spreadsheet row codec.

use crate::model::{Amount, Category, Kind, PaymentMethod};
use crate::{Error, Result};
use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Date format used in every tab: `DD-MM-YYYY`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Header row of the Transações tab, in fixed column order.
pub const TRANSACTION_HEADER: [&str; 6] = [
    "Data",
    "Descrição",
    "Valor",
    "Forma de Pagamento",
    "Categoria",
    "Tipo",
];

/// Header row of the Receitas and Despesas mirror tabs. Same as the
/// Transações header minus the `Tipo` column, which the tab itself implies.
pub const MIRROR_HEADER: [&str; 5] = [
    "Data",
    "Descrição",
    "Valor",
    "Meio de Pagamento",
    "Categoria",
];

/// Represents a single row from the Transações tab.
///
/// `amount` is always a positive magnitude; the cash-flow direction is
/// carried by `kind`. Sources that encode direction in the sign must be
/// normalized on ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    pub(crate) date: NaiveDate,
    pub(crate) description: String,
    pub(crate) amount: Amount,
    pub(crate) payment_method: PaymentMethod,
    pub(crate) category: Category,
    pub(crate) kind: Kind,
}

impl Transaction {
    /// Validates and builds a manually-entered transaction.
    ///
    /// `date` defaults to today when absent. Fails with a validation error
    /// when the amount is not positive or the category does not belong to the
    /// list for `kind`.
    pub fn new_manual(
        date: Option<NaiveDate>,
        description: impl Into<String>,
        amount: Amount,
        payment_method: PaymentMethod,
        category: Category,
        kind: Kind,
    ) -> Result<Self> {
        if !amount.is_positive() {
            return Err(Error::Validation(format!(
                "amount must be positive, got {amount}"
            )));
        }
        if !category.allows(kind) {
            return Err(Error::Validation(format!(
                "'{category}' is not a valid {kind} category"
            )));
        }
        Ok(Self {
            date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            description: description.into(),
            amount,
            payment_method,
            category,
            kind,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The `(year, month)` bucket this transaction falls into.
    pub fn month_key(&self) -> (i32, u32) {
        use chrono::Datelike;
        (self.date.year(), self.date.month())
    }

    /// The row written to the Transações tab, in `TRANSACTION_HEADER` order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.description.clone(),
            self.amount.to_string(),
            self.payment_method.to_string(),
            self.category.to_string(),
            self.kind.to_string(),
        ]
    }

    /// The row written to the Receitas/Despesas mirror tab: everything but
    /// the `Tipo` column.
    pub fn mirror_row(&self) -> Vec<String> {
        let mut row = self.to_row();
        row.pop();
        row
    }

    /// Parses one data row from the Transações tab.
    pub fn from_row(row: &[String]) -> Result<Self> {
        if row.len() < TRANSACTION_HEADER.len() {
            return Err(anyhow!(
                "Transaction row has {} columns, expected {}",
                row.len(),
                TRANSACTION_HEADER.len()
            )
            .into());
        }
        let date = NaiveDate::parse_from_str(&row[0], DATE_FORMAT)
            .with_context(|| format!("Invalid date '{}', expected DD-MM-YYYY", row[0]))?;
        let amount = Amount::from_str(&row[2])?;
        let payment_method = PaymentMethod::from_str(&row[3])
            .with_context(|| format!("Unknown payment method '{}'", row[3]))?;
        let category = Category::from_str(&row[4])
            .with_context(|| format!("Unknown category '{}'", row[4]))?;
        let kind =
            Kind::from_str(&row[5]).with_context(|| format!("Unknown kind '{}'", row[5]))?;
        Ok(Self {
            date,
            description: row[1].clone(),
            amount,
            payment_method,
            category,
            kind,
        })
    }

    /// Parses the full contents of the Transações tab, skipping the header
    /// row. A row that fails to parse carries its 1-based sheet row number in
    /// the error.
    pub fn from_rows(rows: &[Vec<String>]) -> Result<Vec<Self>> {
        let mut transactions = Vec::new();
        for (ix, row) in rows.iter().enumerate().skip(1) {
            if row.is_empty() {
                continue; // Skip empty rows
            }
            let transaction = Self::from_row(row)
                .with_context(|| format!("Failed to parse transaction at sheet row {}", ix + 1))?;
            transactions.push(transaction);
        }
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn amount(s: &str) -> Amount {
        Amount::new(Decimal::from_str(s).unwrap())
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_new_manual_valid() {
        let t = Transaction::new_manual(
            Some(date("01-03-2024")),
            "Mercado",
            amount("100.00"),
            PaymentMethod::Pix,
            Category::Food,
            Kind::Expense,
        )
        .unwrap();
        assert_eq!(t.amount(), amount("100.00"));
        assert_eq!(t.kind(), Kind::Expense);
    }

    #[test]
    fn test_new_manual_rejects_non_positive_amount() {
        for bad in ["0", "-10.00"] {
            let result = Transaction::new_manual(
                Some(date("01-03-2024")),
                "Mercado",
                amount(bad),
                PaymentMethod::Pix,
                Category::Food,
                Kind::Expense,
            );
            assert!(matches!(result, Err(Error::Validation(_))), "accepted {bad}");
        }
    }

    #[test]
    fn test_new_manual_rejects_category_kind_mismatch() {
        let result = Transaction::new_manual(
            Some(date("01-03-2024")),
            "Salário de março",
            amount("5000.00"),
            PaymentMethod::Ted,
            Category::Salary,
            Kind::Expense,
        );
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_row_round_trip() {
        let t = Transaction::new_manual(
            Some(date("15-03-2024")),
            "Uber até o centro",
            amount("25.50"),
            PaymentMethod::CreditCard,
            Category::Transport,
            Kind::Expense,
        )
        .unwrap();
        let row = t.to_row();
        assert_eq!(
            row,
            vec![
                "15-03-2024",
                "Uber até o centro",
                "R$ 25,50",
                "Cartão de Crédito",
                "Transporte",
                "Despesa",
            ]
        );
        assert_eq!(Transaction::from_row(&row).unwrap(), t);
    }

    #[test]
    fn test_mirror_row_drops_kind() {
        let t = Transaction::new_manual(
            Some(date("15-03-2024")),
            "Freela de design",
            amount("800.00"),
            PaymentMethod::Pix,
            Category::Freelance,
            Kind::Income,
        )
        .unwrap();
        let row = t.mirror_row();
        assert_eq!(row.len(), MIRROR_HEADER.len());
        assert_eq!(row[4], "Freelance");
    }

    #[test]
    fn test_from_row_rejects_short_row() {
        let row: Vec<String> = vec!["01-03-2024".into(), "Mercado".into()];
        assert!(Transaction::from_row(&row).is_err());
    }

    #[test]
    fn test_from_rows_skips_header() {
        let rows: Vec<Vec<String>> = vec![
            TRANSACTION_HEADER.iter().map(|h| h.to_string()).collect(),
            vec![
                "01-03-2024".into(),
                "Mercado".into(),
                "R$ 100,00".into(),
                "Pix".into(),
                "Alimentação".into(),
                "Despesa".into(),
            ],
        ];
        let transactions = Transaction::from_rows(&rows).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].category(), Category::Food);
    }

    #[test]
    fn test_month_key() {
        let t = Transaction::new_manual(
            Some(date("31-12-2023")),
            "Ceia",
            amount("300.00"),
            PaymentMethod::Cash,
            Category::Food,
            Kind::Expense,
        )
        .unwrap();
        assert_eq!(t.month_key(), (2023, 12));
    }
}
