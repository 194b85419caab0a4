//! Init command: create the data directory and bootstrap the workbook tabs.

use crate::analysis::ANALYSIS_HEADER;
use crate::api::{Mode, Sheet, ANALYSIS, EXPENSES, INCOME, TRANSACTIONS};
use crate::commands::Out;
use crate::model::{MIRROR_HEADER, TRANSACTION_HEADER};
use crate::{api, Config, Result};
use anyhow::anyhow;
use std::path::Path;
use tracing::debug;

pub async fn init(home: &Path, sheet_url: &str, mode: Mode) -> Result<Out<String>> {
    let config = Config::create(home, sheet_url).await?;
    debug!("Created config at {}", config.config_path().display());

    let mut sheet = api::sheet(&config, mode).await?;
    bootstrap(sheet.as_mut()).await?;

    Ok(Out::new(
        format!("Initialized fin home at {}", config.root().display()),
        config.spreadsheet_id().to_string(),
    ))
}

/// Ensures every tab exists and starts with its header row. A populated tab
/// under a different header is an error: rewriting its first row could
/// misalign the data below it, so that repair is left to the user.
pub(crate) async fn bootstrap(sheet: &mut (dyn Sheet + Send)) -> Result<()> {
    let tabs: [(&str, &[&str]); 4] = [
        (TRANSACTIONS, &TRANSACTION_HEADER),
        (INCOME, &MIRROR_HEADER),
        (EXPENSES, &MIRROR_HEADER),
        (ANALYSIS, &ANALYSIS_HEADER),
    ];

    for (name, header) in tabs {
        sheet.ensure_sheet(name).await?;
        let rows = sheet.read_all(name).await?;
        match rows.first() {
            None => sheet.overwrite(name, header, &[]).await?,
            Some(first) if !header_matches(first, header) => {
                if rows.len() > 1 {
                    return Err(anyhow!(
                        "Tab '{name}' has data under an unexpected header {first:?}; \
                        fix the header manually"
                    )
                    .into());
                }
                sheet.overwrite(name, header, &[]).await?;
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn header_matches(row: &[String], header: &[&str]) -> bool {
    row.len() == header.len() && row.iter().zip(header).all(|(a, b)| a.as_str() == *b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestSheet;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_bootstrap_creates_missing_tabs() {
        let mut sheet = TestSheet::new(HashMap::new());
        bootstrap(&mut sheet).await.unwrap();
        for name in [TRANSACTIONS, INCOME, EXPENSES, ANALYSIS] {
            let rows = sheet.rows(name).unwrap();
            assert_eq!(rows.len(), 1, "tab '{name}' should only have a header");
        }
        assert_eq!(sheet.rows(TRANSACTIONS).unwrap()[0], TRANSACTION_HEADER);
    }

    #[tokio::test]
    async fn test_bootstrap_leaves_good_tabs_alone() {
        let mut sheet = TestSheet::default();
        let before = sheet.rows(TRANSACTIONS).unwrap().clone();
        bootstrap(&mut sheet).await.unwrap();
        assert_eq!(sheet.rows(TRANSACTIONS).unwrap(), &before);
    }

    #[tokio::test]
    async fn test_bootstrap_refuses_populated_tab_with_bad_header() {
        let mut sheet = TestSheet::new(HashMap::new());
        sheet.data.insert(
            TRANSACTIONS.to_string(),
            vec![
                vec!["Wrong".to_string()],
                vec!["data".to_string()],
            ],
        );
        assert!(bootstrap(&mut sheet).await.is_err());
    }

    #[tokio::test]
    async fn test_bootstrap_fixes_header_only_tab() {
        let mut sheet = TestSheet::new(HashMap::new());
        sheet
            .data
            .insert(ANALYSIS.to_string(), vec![vec!["Wrong".to_string()]]);
        bootstrap(&mut sheet).await.unwrap();
        assert_eq!(sheet.rows(ANALYSIS).unwrap()[0], ANALYSIS_HEADER);
    }
}
