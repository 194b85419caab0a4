//! Import command: bank-statement CSV to the Transações tab, with dedup.

use crate::api::{Mode, Sheet, TRANSACTIONS};
use crate::args::ImportArgs;
use crate::commands::Out;
use crate::import::{dedup, read_csv, RawRecord};
use crate::model::{CategoryRules, Transaction};
use crate::{api, Config, Result};
use tracing::debug;

pub async fn import(config: Config, mode: Mode, args: ImportArgs) -> Result<Out<usize>> {
    let rules = CategoryRules::load_or_default(&config.rules_path())?;
    let records = read_csv(args.file())?;
    let mut sheet = api::sheet(&config, mode).await?;
    import_with(sheet.as_mut(), &rules, records).await
}

pub(crate) async fn import_with(
    sheet: &mut (dyn Sheet + Send),
    rules: &CategoryRules,
    records: Vec<RawRecord>,
) -> Result<Out<usize>> {
    if records.is_empty() {
        return Ok(Out::new_message("Statement file has no records"));
    }

    let mut transactions = Vec::with_capacity(records.len());
    for record in &records {
        transactions.push(record.normalize()?.categorize(rules));
    }

    let existing = sheet.read_all(TRANSACTIONS).await?;
    let fresh = dedup(transactions, &existing);
    debug!("{} of {} records are new", fresh.len(), records.len());
    if fresh.is_empty() {
        return Ok(Out::new_message(
            "Nothing imported; every statement record is already on the sheet",
        ));
    }

    let rows: Vec<Vec<String>> = fresh.iter().map(Transaction::to_row).collect();
    sheet.append(TRANSACTIONS, &rows).await?;

    let message = format!(
        "Imported {} of {} statement records",
        fresh.len(),
        records.len()
    );
    Ok(Out::new(message, fresh.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestSheet;
    use crate::model::TRANSACTION_HEADER;
    use std::collections::HashMap;

    fn raw(title: &str, amount: i64, date: &str) -> RawRecord {
        RawRecord {
            title: title.to_string(),
            amount,
            date: date.to_string(),
        }
    }

    fn empty_transactions_sheet() -> TestSheet {
        let mut sheet = TestSheet::new(HashMap::new());
        sheet.data.insert(
            TRANSACTIONS.to_string(),
            vec![TRANSACTION_HEADER.iter().map(|h| h.to_string()).collect()],
        );
        sheet
    }

    #[tokio::test]
    async fn test_import_appends_classified_rows() {
        let mut sheet = empty_transactions_sheet();
        let records = vec![
            raw("UBER TRIP", -2550, "2024-03-10"),
            raw("PADARIA IMPERIAL", -1890, "2024-03-11"),
        ];

        let out = import_with(&mut sheet, &CategoryRules::default(), records)
            .await
            .unwrap();
        assert_eq!(out.structure(), Some(&2));

        let rows = sheet.rows(TRANSACTIONS).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1],
            vec![
                "10-03-2024",
                "UBER TRIP",
                "R$ 25,50",
                "Cartão de Crédito",
                "Transporte",
                "Despesa",
            ]
        );
        assert_eq!(rows[2][4], "Alimentação");
    }

    #[tokio::test]
    async fn test_import_skips_duplicates() {
        let mut sheet = empty_transactions_sheet();
        let records = vec![raw("UBER TRIP", -2550, "2024-03-10")];

        import_with(&mut sheet, &CategoryRules::default(), records.clone())
            .await
            .unwrap();
        let out = import_with(&mut sheet, &CategoryRules::default(), records)
            .await
            .unwrap();

        assert!(out.structure().is_none());
        assert_eq!(sheet.rows(TRANSACTIONS).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_import_empty_statement() {
        let mut sheet = empty_transactions_sheet();
        let out = import_with(&mut sheet, &CategoryRules::default(), Vec::new())
            .await
            .unwrap();
        assert!(out.structure().is_none());
        assert_eq!(sheet.rows(TRANSACTIONS).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_signed_income_record() {
        let mut sheet = empty_transactions_sheet();
        let records = vec![raw("Reembolso consulta", 12000, "2024-03-02")];

        import_with(&mut sheet, &CategoryRules::default(), records)
            .await
            .unwrap();

        let rows = sheet.rows(TRANSACTIONS).unwrap();
        assert_eq!(rows[1][2], "R$ 120,00");
        assert_eq!(rows[1][5], "Receita");
    }
}
