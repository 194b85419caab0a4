//! List command: filtered transaction listing with a running total.

use crate::api::{Mode, Sheet, TRANSACTIONS};
use crate::args::ListArgs;
use crate::commands::Out;
use crate::model::{Amount, Transaction};
use crate::{api, Config, Result};
use serde::Serialize;

/// The structured result of a listing: the matching transactions and their
/// formatted total.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    transactions: Vec<Transaction>,
    total: Amount,
}

impl Listing {
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn total(&self) -> Amount {
        self.total
    }
}

pub async fn list(config: Config, mode: Mode, args: ListArgs) -> Result<Out<Listing>> {
    let mut sheet = api::sheet(&config, mode).await?;
    list_with(sheet.as_mut(), &args).await
}

pub(crate) async fn list_with(
    sheet: &mut (dyn Sheet + Send),
    filters: &ListArgs,
) -> Result<Out<Listing>> {
    let rows = sheet.read_all(TRANSACTIONS).await?;
    let transactions: Vec<Transaction> = Transaction::from_rows(&rows)?
        .into_iter()
        .filter(|t| matches(filters, t))
        .collect();

    let total: Amount = transactions.iter().map(Transaction::amount).sum();
    let message = if transactions.is_empty() {
        String::from("No transactions matched")
    } else {
        format!("{} transactions, totaling {total}", transactions.len())
    };
    Ok(Out::new(message, Listing { transactions, total }))
}

fn matches(filters: &ListArgs, transaction: &Transaction) -> bool {
    if let Some(date) = filters.date() {
        if transaction.date() != date {
            return false;
        }
    }
    if let Some(needle) = filters.description() {
        if !transaction
            .description()
            .to_lowercase()
            .contains(&needle.to_lowercase())
        {
            return false;
        }
    }
    if let Some(amount) = filters.amount() {
        if transaction.amount().value() != amount.value() {
            return false;
        }
    }
    if let Some(kind) = filters.kind() {
        if transaction.kind() != kind {
            return false;
        }
    }
    if let Some(payment_method) = filters.payment_method() {
        if transaction.payment_method() != payment_method {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestSheet;
    use clap::Parser;

    fn filters(args: &[&str]) -> ListArgs {
        let mut argv = vec!["list"];
        argv.extend_from_slice(args);
        ListArgs::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    async fn test_list_unfiltered_totals_everything() {
        let mut sheet = TestSheet::default();
        let out = list_with(&mut sheet, &filters(&[])).await.unwrap();
        let listing = out.structure().unwrap();
        // 8 seed transactions, incomes and expenses summed together.
        assert_eq!(listing.transactions().len(), 8);
        assert_eq!(listing.total().to_string(), "R$ 11.222,50");
    }

    #[tokio::test]
    async fn test_list_filter_by_kind() {
        let mut sheet = TestSheet::default();
        let out = list_with(&mut sheet, &filters(&["--kind", "Receita"]))
            .await
            .unwrap();
        let listing = out.structure().unwrap();
        assert_eq!(listing.transactions().len(), 2);
        assert_eq!(listing.total().to_string(), "R$ 10.000,00");
    }

    #[tokio::test]
    async fn test_list_filter_by_description_is_case_insensitive() {
        let mut sheet = TestSheet::default();
        let out = list_with(&mut sheet, &filters(&["--description", "uber"]))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().transactions().len(), 1);
    }

    #[tokio::test]
    async fn test_list_filters_combine() {
        let mut sheet = TestSheet::default();
        let out = list_with(
            &mut sheet,
            &filters(&["--kind", "Despesa", "--payment-method", "Pix"]),
        )
        .await
        .unwrap();
        let listing = out.structure().unwrap();
        assert_eq!(listing.transactions().len(), 2);
        assert_eq!(listing.total().to_string(), "R$ 697,70");
    }

    #[tokio::test]
    async fn test_list_no_match() {
        let mut sheet = TestSheet::default();
        let out = list_with(&mut sheet, &filters(&["--date", "01-01-1999"]))
            .await
            .unwrap();
        assert_eq!(out.structure().unwrap().transactions().len(), 0);
        assert_eq!(out.message(), "No transactions matched");
    }
}
