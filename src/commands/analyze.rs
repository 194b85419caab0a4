//! Analyze command: recompute the spending analysis and rewrite its tab.
//!
//! The analysis is always a pure function of the full transaction history.
//! Rows are computed before the tab is touched, so a failed run leaves the
//! previous analysis in place.

use crate::analysis::{self, AnalysisRow, ANALYSIS_HEADER};
use crate::api::{Mode, Sheet, ANALYSIS, TRANSACTIONS};
use crate::commands::Out;
use crate::model::Transaction;
use crate::{api, Config, Error, Result};
use tracing::debug;

pub async fn analyze(config: Config, mode: Mode) -> Result<Out<Vec<AnalysisRow>>> {
    let mut sheet = api::sheet(&config, mode).await?;
    analyze_with(sheet.as_mut()).await
}

pub(crate) async fn analyze_with(
    sheet: &mut (dyn Sheet + Send),
) -> Result<Out<Vec<AnalysisRow>>> {
    let rows = sheet.read_all(TRANSACTIONS).await?;
    if rows.len() <= 1 {
        return Ok(Out::new_message("No transactions found to analyze"));
    }
    let transactions = Transaction::from_rows(&rows)?;

    let analysis = match analysis::aggregate(&transactions) {
        Ok(analysis) => analysis,
        Err(Error::EmptyInput) => {
            return Ok(Out::new_message(
                "No expenses recorded, your spending is zero; nothing to analyze",
            ));
        }
        Err(e) => return Err(e),
    };
    debug!("Computed {} analysis rows", analysis.len());

    let out_rows: Vec<Vec<String>> = analysis.iter().map(AnalysisRow::to_row).collect();
    sheet.overwrite(ANALYSIS, &ANALYSIS_HEADER, &out_rows).await?;

    let message = format!("Wrote {} analysis rows to '{ANALYSIS}'", analysis.len());
    Ok(Out::new(message, analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestSheet;
    use crate::model::TRANSACTION_HEADER;
    use std::collections::HashMap;

    fn header_row() -> Vec<String> {
        TRANSACTION_HEADER.iter().map(|h| h.to_string()).collect()
    }

    fn expense_row(date: &str, value: &str, category: &str) -> Vec<String> {
        vec![
            date.to_string(),
            "teste".to_string(),
            value.to_string(),
            "Pix".to_string(),
            category.to_string(),
            "Despesa".to_string(),
        ]
    }

    #[tokio::test]
    async fn test_analyze_writes_analysis_tab() {
        let mut sheet = TestSheet::new(HashMap::new());
        sheet.data.insert(
            TRANSACTIONS.to_string(),
            vec![
                header_row(),
                expense_row("01-03-2024", "R$ 100,00", "Alimentação"),
                expense_row("15-03-2024", "R$ 50,00", "Transporte"),
            ],
        );

        analyze_with(&mut sheet).await.unwrap();

        let analysis = sheet.rows(ANALYSIS).unwrap();
        assert_eq!(analysis.len(), 3);
        assert_eq!(analysis[0], ANALYSIS_HEADER);
        assert_eq!(
            analysis[1],
            vec![
                "03/2024",
                "Alimentação",
                "R$ 100,00",
                "R$ 100,00",
                "66.67%",
                "Alto gasto! Considere cortar despesas supérfluas.",
            ]
        );
        assert_eq!(
            analysis[2],
            vec![
                "03/2024",
                "Transporte",
                "R$ 50,00",
                "R$ 50,00",
                "33.33%",
                "Gasto considerável. Analise se pode economizar.",
            ]
        );
    }

    #[tokio::test]
    async fn test_analyze_replaces_previous_analysis() {
        let mut sheet = TestSheet::default();
        sheet.data.get_mut(ANALYSIS).unwrap().push(vec![
            "01/2020".to_string(),
            "Lazer".to_string(),
            "R$ 1,00".to_string(),
            "R$ 1,00".to_string(),
            "100.00%".to_string(),
            "stale".to_string(),
        ]);

        analyze_with(&mut sheet).await.unwrap();

        let analysis = sheet.rows(ANALYSIS).unwrap();
        assert!(analysis.iter().all(|row| row[0] != "01/2020"));
        // Seed data has expenses in 02/2024 and 03/2024.
        assert!(analysis.iter().any(|row| row[0] == "02/2024"));
        assert!(analysis.iter().any(|row| row[0] == "03/2024"));
    }

    #[tokio::test]
    async fn test_analyze_no_transactions_skips_write() {
        let mut sheet = TestSheet::new(HashMap::new());
        sheet
            .data
            .insert(TRANSACTIONS.to_string(), vec![header_row()]);

        let out = analyze_with(&mut sheet).await.unwrap();
        assert!(out.structure().is_none());
        assert!(sheet.rows(ANALYSIS).is_none());
    }

    #[tokio::test]
    async fn test_analyze_income_only_skips_write() {
        let mut sheet = TestSheet::new(HashMap::new());
        sheet.data.insert(
            TRANSACTIONS.to_string(),
            vec![
                header_row(),
                vec![
                    "05-03-2024".to_string(),
                    "Salário".to_string(),
                    "R$ 5.000,00".to_string(),
                    "Ted".to_string(),
                    "Salário".to_string(),
                    "Receita".to_string(),
                ],
            ],
        );

        let out = analyze_with(&mut sheet).await.unwrap();
        assert!(out.structure().is_none());
        assert!(sheet.rows(ANALYSIS).is_none());
    }
}
